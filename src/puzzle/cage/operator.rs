use crate::csp::Value;

/// The math operator of a cage
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// A single-cell cage whose cell equals the target
    Nop,
}

impl Operator {
    /// Retrieve the character representation of the symbol
    pub fn symbol(self) -> Option<char> {
        let symbol = match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Nop => return None,
        };
        Some(symbol)
    }

    /// Retrieve an `Operator` from its corresponding symbol
    pub fn from_symbol(c: char) -> Option<Operator> {
        let o = match c {
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            '*' => Operator::Multiply,
            '/' => Operator::Divide,
            _ => return None,
        };
        Some(o)
    }

    /// Returns true if the operator applied to `values` can produce `target`.
    ///
    /// The operands of `-` and `/` may be taken in any order: one value is reduced by all of
    /// the others. Division must be exact.
    pub fn produces(self, values: &[Value], target: Value) -> bool {
        let values = values.iter().map(|&v| i64::from(v));
        let target = i64::from(target);
        match self {
            Operator::Add => values.sum::<i64>() == target,
            Operator::Multiply => checked_product(values) == Some(target),
            Operator::Subtract => {
                let values: Vec<i64> = values.collect();
                let sum: i64 = values.iter().sum();
                values.len() > 1 && values.iter().any(|&first| first - (sum - first) == target)
            }
            Operator::Divide => {
                let values: Vec<i64> = values.collect();
                values.len() > 1
                    && (0..values.len()).any(|i| {
                        let divisor = checked_product(
                            values
                                .iter()
                                .enumerate()
                                .filter(|&(j, _)| j != i)
                                .map(|(_, &v)| v),
                        );
                        match divisor.and_then(|d| target.checked_mul(d).map(|t| (d, t))) {
                            Some((divisor, dividend)) => divisor != 0 && values[i] == dividend,
                            None => false,
                        }
                    })
            }
            Operator::Nop => {
                let values: Vec<i64> = values.collect();
                values == [target]
            }
        }
    }
}

/// `None` on overflow
fn checked_product(values: impl IntoIterator<Item = i64>) -> Option<i64> {
    values.into_iter().try_fold(1i64, i64::checked_mul)
}
