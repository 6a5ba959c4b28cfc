use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ParseError;
use crate::error::ParsePuzzleErrorType::InvalidToken;
use crate::parse::Token;
use crate::puzzle::Operator;

pub(crate) type IndexedToken = (usize, Token);

/// Splits puzzle text into tokens along with their byte offsets
pub(crate) struct TokenIterator<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> TokenIterator<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            chars: s.char_indices().peekable(),
        }
    }

    pub fn next_skip_space(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        loop {
            match self.next()? {
                Some((_, Token::Space)) => {}
                next => return Ok(next),
            }
        }
    }

    /// Consecutive whitespace is one `Space` token
    pub fn next(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        let (index, c) = match self.chars.next() {
            Some(next) => next,
            None => return Ok(None),
        };
        let token = if c.is_whitespace() {
            while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
            Token::Space
        } else if let Some(mut n) = c.to_digit(10) {
            let mut s = c.to_string();
            while let Some((_, d)) = self.chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                s.push(d);
                n = n
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(d.to_digit(10).unwrap_or(0)))
                    .ok_or_else(|| ParseError::new(InvalidToken, &s, index))?;
            }
            Token::Number(n)
        } else if let Some(o) = Operator::from_symbol(c) {
            Token::Operator(o)
        } else if c.is_ascii_alphabetic() {
            Token::Letter(c)
        } else {
            return Err(ParseError::new(InvalidToken, c, index));
        };
        Ok(Some((index, token)))
    }
}
