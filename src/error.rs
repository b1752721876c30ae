use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
}

/// A lexical error. Scanning stops at the first one.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("[line {line}] Error: {kind}")]
pub struct Error {
    kind: ErrorKind,
    line: usize,
}

impl Error {
    /// `line` is where the literal opened, not where the input ran out.
    pub fn unterminated_string(line: usize) -> Error {
        Error { kind: ErrorKind::UnterminatedString, line }
    }

    pub fn unexpected_character(line: usize, c: char) -> Error {
        Error { kind: ErrorKind::UnexpectedCharacter(c), line }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unterminated_string_message() {
        let e = Error::unterminated_string(4);
        assert_eq!("[line 4] Error: Unterminated string.", e.to_string());
        assert_eq!(&ErrorKind::UnterminatedString, e.kind());
    }

    #[test]
    fn unexpected_character_message() {
        let e = Error::unexpected_character(2, '@');
        assert_eq!("[line 2] Error: Unexpected character '@'.", e.to_string());
        assert_eq!(2, e.line());
    }
}
