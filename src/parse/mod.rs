//! Parse puzzles from text
//!
//! The format is the puzzle width, then one cage letter per cell in row order, then the target
//! and operator of each cage in letter order. Letters `A` to `Z` come before `a` to `z`.
//!
//! ```text
//! 4
//! AABB
//! ACCC
//! DEEF
//! DGHH
//! 4+ 2* 6* 4/ 4- 7 3 2-
//! ```

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt::Display;

use crate::csp::Value;
use crate::error::{
    ParseError, ParsePuzzleError, ParsePuzzleErrorType, ParsePuzzleErrorType::*, UNEXPECTED_END,
};
use crate::puzzle::{CageId, Cage, CellId, Operator, Puzzle, MAX_PUZZLE_WIDTH};
use token_iterator::{IndexedToken, TokenIterator};

pub(crate) use token::Token;

mod token;
mod token_iterator;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

const CAGE_LETTERS: usize = 52;

/// The letter of a cage in the text format
pub(crate) fn cage_letter(id: CageId) -> Option<char> {
    let offset = match id {
        0..=25 => b'A' + id as u8,
        26..=51 => b'a' + (id - 26) as u8,
        _ => return None,
    };
    Some(offset as char)
}

/// parse a `Puzzle` from a string
pub fn parse_puzzle(s: &str) -> Result<Puzzle, ParsePuzzleError> {
    let mut s = TokenIterator::new(s);
    let (index, size) = s
        .next_skip_space()?
        .expect_token()?
        .map_or(InvalidSize, Token::number)?;
    if size as usize > MAX_PUZZLE_WIDTH {
        return Err(ParseError::new(SizeTooBig, size, index).into());
    }
    let width = size as usize;
    let cage_cells = read_cage_cells(&mut s, width)?;
    let cage_targets = read_cage_targets(&mut s, cage_cells.len())?;
    debug_assert!(cage_cells.len() == cage_targets.len());
    if let Some((i, t)) = s.next_skip_space()? {
        return Err(ParseError::new(UnexpectedToken, t, i).into());
    }
    let cages: Vec<Cage> = cage_cells
        .into_iter()
        .zip(cage_targets.into_iter())
        .map(|(cells, (target, operator))| Cage::new(cells, operator, target))
        .collect::<Result<_, _>>()?;
    let puzzle = Puzzle::new(width, cages)?;
    debug!("Parsed puzzle with width {} and {} cages", width, puzzle.cages().len());
    Ok(puzzle)
}

fn read_cage_cells(s: &mut TokenIterator<'_>, width: usize) -> Result<Vec<Vec<CellId>>> {
    let mut cage_map: BTreeMap<char, Vec<CellId>> = BTreeMap::new();
    for cell in 0..width.pow(2) {
        let (index, letter) = s
            .next_skip_space()?
            .expect_token()?
            .map_or(InvalidCageId, Token::letter)?;
        if !cage_map.contains_key(&letter) && cage_map.len() == CAGE_LETTERS {
            return Err(ParseError::new(InvalidCageId, letter, index));
        }
        cage_map.entry(letter).or_default().push(cell);
    }
    let cages = cage_map.into_iter().map(|(_id, cells)| cells).collect();
    Ok(cages)
}

fn read_cage_targets(s: &mut TokenIterator<'_>, num_cages: usize) -> Result<Vec<(Value, Operator)>> {
    (0..num_cages)
        .map(|_| -> Result<_> {
            let (index, target) = s
                .next_skip_space()?
                .expect_token()?
                .map_or(InvalidCageTarget, Token::number)?
                .filter_or(InvalidCageTarget, |n| n > 0)?;
            let target =
                Value::try_from(target).map_err(|_| ParseError::new(InvalidCageTarget, target, index))?;
            let operator = if let Some((i, token)) = s.next()? {
                match token {
                    Token::Operator(o) => o,
                    Token::Space => Operator::Nop,
                    _ => return Err(ParseError::new(InvalidOperator, token, i)),
                }
            } else {
                Operator::Nop
            };
            Ok((target, operator))
        })
        .collect()
}

trait TokenOption<T>: Sized {
    fn expect_token(self) -> Result<T>;
}

impl TokenOption<IndexedToken> for Option<IndexedToken> {
    fn expect_token(self) -> Result<IndexedToken> {
        self.ok_or(UNEXPECTED_END)
    }
}

trait IndexedTokenExt<T>: Sized + Into<(usize, T)>
where
    T: Copy + Display,
{
    fn filter_or(
        self,
        error_type: ParsePuzzleErrorType,
        predicate: impl FnOnce(T) -> bool,
    ) -> Result<(usize, T)> {
        let (index, token) = self.into();
        if !predicate(token) {
            return Err(ParseError::new(error_type, token, index));
        }
        Ok((index, token))
    }

    fn map_or<U>(
        self,
        error_type: ParsePuzzleErrorType,
        f: impl FnOnce(T) -> Option<U>,
    ) -> Result<(usize, U)> {
        let (index, token) = self.into();
        let n = f(token).ok_or_else(|| ParseError::new(error_type, token, index))?;
        Ok((index, n))
    }
}

impl<T> IndexedTokenExt<T> for (usize, T) where T: Copy + Display {}

#[cfg(test)]
mod tests {
    use crate::error::ParsePuzzleError;
    use crate::error::ParsePuzzleErrorType;
    use crate::parse::{cage_letter, parse_puzzle};
    use crate::puzzle::{Cage, Operator, Puzzle};

    fn error_type(s: &str) -> ParsePuzzleErrorType {
        match parse_puzzle(s) {
            Err(ParsePuzzleError::Parse(e)) => e.error_type().clone(),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty() {
        assert!(parse_puzzle("").is_err());
    }

    #[test]
    fn test() {
        let str = "\
        4\n\
        A ABB\
        ACCC\
        DEEF \
        DGHH \
        4+ 2* 6* 4/ 4- 7 3 2-";
        let cages = vec![
            Cage::new(vec![0, 1, 4], Operator::Add, 4).unwrap(),
            Cage::new(vec![2, 3], Operator::Multiply, 2).unwrap(),
            Cage::new(vec![5, 6, 7], Operator::Multiply, 6).unwrap(),
            Cage::new(vec![8, 12], Operator::Divide, 4).unwrap(),
            Cage::new(vec![9, 10], Operator::Subtract, 4).unwrap(),
            Cage::new(vec![11], Operator::Nop, 7).unwrap(),
            Cage::new(vec![13], Operator::Nop, 3).unwrap(),
            Cage::new(vec![14, 15], Operator::Subtract, 2).unwrap(),
        ];
        let puzzle = Puzzle::new(4, cages).unwrap();
        assert_eq!(puzzle, parse_puzzle(str).unwrap());
    }

    #[test]
    fn errors() {
        assert_eq!(ParsePuzzleErrorType::UnexpectedEnd, error_type("2\nAA\nB"));
        assert_eq!(ParsePuzzleErrorType::InvalidSize, error_type("A"));
        assert_eq!(ParsePuzzleErrorType::SizeTooBig, error_type("10"));
        assert_eq!(ParsePuzzleErrorType::InvalidCageId, error_type("2\nA1\nBB"));
        assert_eq!(ParsePuzzleErrorType::InvalidOperator, error_type("2\nAA\nBB\n3A 2+"));
        assert_eq!(ParsePuzzleErrorType::InvalidCageTarget, error_type("2\nAA\nBB\n+ 3+"));
        assert_eq!(ParsePuzzleErrorType::UnexpectedToken, error_type("2\nAA\nBB\n3+ 3+ 4"));
        assert_eq!(ParsePuzzleErrorType::InvalidToken, error_type("2\nA#"));
    }

    #[test]
    fn invalid_puzzle() {
        // a single-cell cage with an operator
        assert!(matches!(
            parse_puzzle("1\nA\n1+"),
            Err(ParsePuzzleError::InvalidPuzzle(_))
        ));
    }

    #[test]
    fn letters() {
        assert_eq!(Some('A'), cage_letter(0));
        assert_eq!(Some('Z'), cage_letter(25));
        assert_eq!(Some('a'), cage_letter(26));
        assert_eq!(None, cage_letter(52));
    }
}
