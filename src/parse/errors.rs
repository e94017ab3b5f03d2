use std::fmt::{Display, Formatter};

/// Error type for duration input parsing.
///
/// Always recoverable: callers display the message inline and re-prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    InvalidCharacter(char),
    InvalidNumber(String),
    UnknownUnit(String),
    MixedNotations,
    TooManySeparators,
    MissingNumber,
    NothingSmallerThanMillis(f64),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::InvalidCharacter(ch) => write!(f, "invalid character: {:?}", ch),
            Self::InvalidNumber(s) => write!(f, "invalid number: {:?}", s),
            Self::UnknownUnit(s) => write!(f, "unknown unit: {:?}", s),
            Self::MixedNotations => write!(f, "cannot mix clock and unit notations"),
            Self::TooManySeparators => write!(f, "too many separators (at most d:hh:mm:ss)"),
            Self::MissingNumber => write!(f, "expected a number"),
            Self::NothingSmallerThanMillis(n) => {
                write!(f, "no unit smaller than milliseconds for trailing {}", n)
            }
        }
    }
}

impl std::error::Error for ParseError {}
