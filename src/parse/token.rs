use std::fmt;
use std::fmt::{Display, Formatter};

use crate::puzzle::Operator;

/// A lexical unit of the puzzle text format
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    /// The cage of a cell
    Letter(char),
    /// The puzzle width or a cage target
    Number(u32),
    Operator(Operator),
    /// One or more whitespace characters
    Space,
}

impl Token {
    pub fn letter(self) -> Option<char> {
        match self {
            Token::Letter(l) => Some(l),
            _ => None,
        }
    }

    pub fn number(self) -> Option<u32> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Token::Letter(l) => write!(f, "{}", l),
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(o) => match o.symbol() {
                Some(symbol) => write!(f, "{}", symbol),
                None => Ok(()),
            },
            Token::Space => f.write_str(" "),
        }
    }
}
