use common::Pos;
use lexer::Token;
use std::error::Error;
use std::fmt;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub pos: Pos,
    pub message: String,
}

impl ParseError {
    pub fn new(pos: Pos, message: impl Into<String>) -> ParseError {
        ParseError {
            pos,
            message: message.into(),
        }
    }

    /// Builds an "expected X, found Y/end of input" error from the current
    /// lookahead, which is the overwhelming majority of parser failures.
    pub fn unexpected(found: Option<&Token>, expected: &str, fallback_pos: &Pos) -> ParseError {
        match found {
            Some(tok) => ParseError::new(
                tok.pos.clone(),
                format!("expected {}, found `{}`", expected, tok.text),
            ),
            None => ParseError::new(
                fallback_pos.clone(),
                format!("expected {}, found end of input", expected),
            ),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

impl Error for ParseError {}
