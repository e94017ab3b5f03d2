//! Duration input parsing.
//!
//! Turns free-form user text into a millisecond count. Three notations are
//! accepted, and an input must use exactly one of them:
//!
//! - A bare number, read as **minutes**: `"12"` is 12 minutes.
//! - Clock notation with separators: `"6:23:34"` is 6h 23m 34s. The
//!   separator count picks the leading unit (1 -> m:s, 2 -> h:m:s,
//!   3 -> d:h:m:s); at most 3 separators.
//! - Unit letters: `"1h 30m"`. Accepted spellings include common
//!   abbreviations and plurals. A trailing bare number takes the unit one
//!   step below the last explicit one, so `"1m43"` is 1m 43s.
//!
//! Decimals are accepted everywhere, like `"3.5h"`.

pub mod errors;
mod tokens;

pub use errors::ParseError;

use crate::units::TimeUnit;
use tokens::Token;

pub const DEFAULT_SEPARATOR: char = ':';

/// Parses user input into milliseconds using the default `:` separator.
///
/// # Errors
/// Fails on empty input, characters outside the three token classes,
/// malformed numbers, unknown unit words, mixed notations, more than 3
/// separators, and a trailing number after a milliseconds unit.
pub fn parse_input(input: &str) -> Result<i64, ParseError> {
    parse_input_with_separator(input, DEFAULT_SEPARATOR)
}

/// Like [`parse_input`] with a custom clock-notation separator character.
pub fn parse_input_with_separator(input: &str, separator: char) -> Result<i64, ParseError> {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();

    let tokens: Vec<Token> = tokens::scan(&cleaned, separator)?
        .into_iter()
        .map(Token::try_from)
        .collect::<Result<_, _>>()?;

    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    if !tokens.iter().any(|t| matches!(t, Token::Number(_))) {
        return Err(ParseError::MissingNumber);
    }

    let has_separator = tokens.iter().any(|t| matches!(t, Token::Separator));
    let has_unit = tokens.iter().any(|t| matches!(t, Token::Unit(_)));

    let total_ms = match (has_separator, has_unit) {
        (true, true) => return Err(ParseError::MixedNotations),
        (true, false) => parse_clock_notation(&tokens)?,
        (false, true) => parse_unit_notation(&tokens)?,
        // Maximal runs merge adjacent numbers, so this is a single number.
        (false, false) => match tokens[0] {
            Token::Number(n) => TimeUnit::Min.to_millis(n),
            _ => return Err(ParseError::MissingNumber),
        },
    };

    Ok(total_ms.round() as i64)
}

/// `"6:23:34"`-style input. The separator count fixes the leading unit and
/// every separator steps one unit down, so skipped slots like `"5::2"`
/// (5h 0m 2s) work out naturally.
fn parse_clock_notation(tokens: &[Token]) -> Result<f64, ParseError> {
    let separators = tokens
        .iter()
        .filter(|t| matches!(t, Token::Separator))
        .count();

    let Some(mut unit) = u8::try_from(separators)
        .ok()
        .and_then(TimeUnit::above_secs)
    else {
        return Err(ParseError::TooManySeparators);
    };

    let mut total = 0.0;
    for token in tokens {
        match token {
            Token::Number(n) => total += unit.to_millis(*n),
            Token::Separator => {
                unit = unit.smaller_unit().ok_or(ParseError::TooManySeparators)?;
            }
            Token::Unit(_) => return Err(ParseError::MixedNotations),
        }
    }

    Ok(total)
}

/// `"1h 30m"`-style input: each number/unit pair contributes directly.
fn parse_unit_notation(tokens: &[Token]) -> Result<f64, ParseError> {
    let mut total = 0.0;
    let mut pending: Option<f64> = None;
    let mut last_unit: Option<TimeUnit> = None;

    for token in tokens {
        match token {
            Token::Number(n) => pending = Some(*n),
            Token::Unit(unit) => {
                let n = pending.take().ok_or(ParseError::MissingNumber)?;
                total += unit.to_millis(n);
                last_unit = Some(*unit);
            }
            Token::Separator => return Err(ParseError::MixedNotations),
        }
    }

    // A trailing unassigned number takes the unit one step below the last
    // explicit one; there is nothing below milliseconds.
    if let Some(n) = pending {
        let unit = last_unit
            .and_then(TimeUnit::smaller_unit)
            .ok_or(ParseError::NothingSmallerThanMillis(n))?;
        total += unit.to_millis(n);
    }

    Ok(total)
}
