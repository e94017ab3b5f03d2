use super::errors::ParseError;
use crate::units::TimeUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    Number,
    Letter,
    Separator,
}

impl TokenKind {
    fn classify(ch: char, separator: char) -> Result<Self, ParseError> {
        if ch == separator {
            Ok(Self::Separator)
        } else if ch.is_ascii_alphabetic() {
            Ok(Self::Letter)
        } else if ch.is_ascii_digit() || ch == '.' || ch == '-' {
            Ok(Self::Number)
        } else {
            Err(ParseError::InvalidCharacter(ch))
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct RawToken {
    pub kind: TokenKind,
    pub text: String,
}

/// Splits cleaned input into maximal same-class runs.
///
/// A separator always starts a new token, even next to another separator,
/// so `"5::2"` keeps both separators visible to the parser. A `-` is only
/// a leading sign for the whole input; anywhere else it would read as a
/// range or a mixed-sign sum, so it is rejected outright.
pub(super) fn scan(input: &str, separator: char) -> Result<Vec<RawToken>, ParseError> {
    let mut tokens: Vec<RawToken> = vec![];

    for (i, ch) in input.chars().enumerate() {
        if ch == '-' && i != 0 {
            return Err(ParseError::InvalidCharacter('-'));
        }
        let kind = TokenKind::classify(ch, separator)?;

        let extend = match tokens.last() {
            Some(last) => last.kind == kind && kind != TokenKind::Separator,
            None => false,
        };

        if extend {
            tokens
                .last_mut()
                .expect("checked non-empty above")
                .text
                .push(ch);
        } else {
            tokens.push(RawToken {
                kind,
                text: ch.to_string(),
            });
        }
    }

    Ok(tokens)
}

/// A validated token: numbers are finite floats, letters are known units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Token {
    Number(f64),
    Unit(TimeUnit),
    Separator,
}

impl TryFrom<RawToken> for Token {
    type Error = ParseError;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        Ok(match raw.kind {
            TokenKind::Number => {
                let n = raw
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber(raw.text.clone()))?;
                if !n.is_finite() {
                    return Err(ParseError::InvalidNumber(raw.text));
                }
                Token::Number(n)
            }
            TokenKind::Letter => Token::Unit(raw.text.parse::<TimeUnit>()?),
            TokenKind::Separator => Token::Separator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: TokenKind, text: &str) -> RawToken {
        RawToken {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn splits_number_and_unit_runs() {
        assert_eq!(
            scan("1.3h", ':'),
            Ok(vec![
                raw(TokenKind::Number, "1.3"),
                raw(TokenKind::Letter, "h"),
            ])
        );
        assert_eq!(
            scan("1d3h", ':'),
            Ok(vec![
                raw(TokenKind::Number, "1"),
                raw(TokenKind::Letter, "d"),
                raw(TokenKind::Number, "3"),
                raw(TokenKind::Letter, "h"),
            ])
        );
    }

    #[test]
    fn adjacent_separators_stay_separate() {
        assert_eq!(
            scan("1::2", ':'),
            Ok(vec![
                raw(TokenKind::Number, "1"),
                raw(TokenKind::Separator, ":"),
                raw(TokenKind::Separator, ":"),
                raw(TokenKind::Number, "2"),
            ])
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(scan("1!2", ':'), Err(ParseError::InvalidCharacter('!')));
    }

    #[test]
    fn minus_is_only_a_leading_sign() {
        assert_eq!(
            scan("-5", ':'),
            Ok(vec![raw(TokenKind::Number, "-5")])
        );
        assert_eq!(scan("3-5", ':'), Err(ParseError::InvalidCharacter('-')));
        assert_eq!(scan("1:-5", ':'), Err(ParseError::InvalidCharacter('-')));
    }

    #[test]
    fn number_token_must_be_finite() {
        let token = Token::try_from(raw(TokenKind::Number, "1.2.3"));
        assert_eq!(token, Err(ParseError::InvalidNumber("1.2.3".to_string())));

        let token = Token::try_from(raw(TokenKind::Number, "12.5"));
        assert_eq!(token, Ok(Token::Number(12.5)));
    }
}
