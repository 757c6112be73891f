use std::error::Error;
use std::fmt;

/// Line number (starting at one).
pub type Position = u32;

/// A syntax error together with the line it was detected on.
#[derive(Debug, PartialEq)]
pub struct FullSyntaxError {
    pub pos: Position,
    pub error: SyntaxError,
}

impl fmt::Display for FullSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error: line {}: {}", self.pos, self.error)
    }
}

impl Error for FullSyntaxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

/// Everything the lexer and the parser can object to in a source program.
#[derive(Debug, PartialEq)]
pub enum SyntaxError {
    OddIndent(usize),
    UnterminatedString,
    InvalidUtf8,
    BadIntLiteral(String),
    UnexpectedToken(String, String),
    ExpectedIdentifier(String),
    ExpectedLvalue,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::OddIndent(width) => {
                write!(f, "indent size must be even, got {} spaces", width)
            }
            SyntaxError::UnterminatedString => {
                write!(f, "end of input inside string literal")
            }
            SyntaxError::InvalidUtf8 => {
                write!(f, "literal is not valid UTF-8")
            }
            SyntaxError::BadIntLiteral(lit) => {
                write!(f, "cannot parse integer literal: {}", lit)
            }
            SyntaxError::UnexpectedToken(unexpected, expected) => write!(
                f,
                "unexpected token '{}', expected '{}'",
                unexpected, expected
            ),
            SyntaxError::ExpectedIdentifier(got) => {
                write!(f, "expected identifier, got '{}'", got)
            }
            SyntaxError::ExpectedLvalue => {
                write!(f, "left side of '=' is not assignable")
            }
        }
    }
}
