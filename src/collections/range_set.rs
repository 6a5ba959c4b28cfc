/// A set of indices in `0..capacity`, backed by a flag per index
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RangeSet {
    size: usize,
    flags: Vec<bool>,
}

impl RangeSet {
    pub fn new(capacity: usize) -> RangeSet {
        RangeSet {
            size: 0,
            flags: vec![false; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_full(&self) -> bool {
        self.size == self.flags.len()
    }

    /// Grows the range by one index, which is a member iff `present`
    pub fn grow(&mut self, present: bool) {
        self.flags.push(present);
        if present {
            self.size += 1;
        }
    }

    pub fn insert(&mut self, n: usize) -> bool {
        if self.flags[n] {
            return false;
        }
        self.flags[n] = true;
        self.size += 1;
        true
    }

    pub fn remove(&mut self, n: usize) -> bool {
        if !self.flags[n] {
            return false;
        }
        self.flags[n] = false;
        self.size -= 1;
        true
    }

    pub fn contains(&self, n: usize) -> bool {
        self.flags[n]
    }

    pub fn fill(&mut self) {
        for flag in &mut self.flags {
            *flag = true;
        }
        self.size = self.flags.len();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            flags: &self.flags,
            index: 0,
        }
    }
}

pub(crate) struct Iter<'a> {
    flags: &'a [bool],
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        for i in self.index..self.flags.len() {
            if self.flags[i] {
                self.index = i + 1;
                return Some(i);
            }
        }
        self.index = self.flags.len();
        None
    }
}
