//! Lexical scanner for the Lox scripting language.
//!
//! ```
//! use lox_scan::{scan, TokenKind};
//!
//! let tokens = scan("print 1 + 2;").unwrap();
//! assert_eq!(TokenKind::Print, tokens[0].kind);
//! assert_eq!(TokenKind::EndOfFile, tokens.last().unwrap().kind);
//! ```

pub mod error;
pub mod lox;
pub mod scanner;
pub mod token;

pub use crate::{
    error::{Error, ErrorKind, Result},
    scanner::{scan_bytes, Scanner},
    token::{Token, TokenKind},
};

/// Scans `source` in full. Tokens borrow their lexemes from `source`.
pub fn scan(source: &str) -> Result<Vec<Token<'_>>> {
    Scanner::new(source).scan_tokens()
}
