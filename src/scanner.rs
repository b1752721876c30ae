use crate::{
    error::{Error, ErrorKind, Result},
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::{iter::FusedIterator, str::CharIndices};
use tracing::{debug, trace};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

static PUNCTUATION: phf::Map<char, TokenKind> = phf_map! {
    '(' => TokenKind::LeftParen,
    ')' => TokenKind::RightParen,
    '{' => TokenKind::LeftBrace,
    '}' => TokenKind::RightBrace,
    ',' => TokenKind::Comma,
    '.' => TokenKind::Dot,
    '-' => TokenKind::Minus,
    '+' => TokenKind::Plus,
    ';' => TokenKind::Semicolon,
    '*' => TokenKind::Star,
};

/// Single-pass scanner over a borrowed source. Yields tokens in source order,
/// finishing with one `EndOfFile`, and stops for good after the first error.
pub struct Scanner<'src> {
    source: &'src str,
    src: PeekMoreIterator<CharIndices<'src>>,
    line: usize,
    done: bool,
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>>;

    fn next(&mut self) -> Option<Result<Token<'src>>> {
        if self.done {
            return None;
        }

        let token = loop {
            let Some((start, c)) = self.src.next() else {
                self.done = true;
                break Ok(Token {
                    kind: TokenKind::EndOfFile,
                    lexeme: "",
                    line: self.line,
                    offset: self.source.len(),
                });
            };
            if let Some(token) = self.scan_token(start, c) {
                break token;
            }
        };

        match &token {
            Ok(t) => trace!(kind = %t.kind, lexeme = t.lexeme, line = t.line, "token"),
            Err(e) => {
                self.done = true;
                debug!(line = e.line(), error = %e, "scan aborted");
            }
        }
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            src: source.char_indices().peekmore(),
            line: 1,
            done: false,
        }
    }

    pub fn scan_tokens(self) -> Result<Vec<Token<'src>>> {
        let tokens = self.collect::<Result<Vec<_>>>()?;
        if let Some(eof) = tokens.last() {
            debug!(tokens = tokens.len(), lines = eof.line, "scan complete");
        }
        Ok(tokens)
    }

    /// Returns `None` for input that produces no token (whitespace, comments).
    fn scan_token(&mut self, start: usize, c: char) -> Option<Result<Token<'src>>> {
        use TokenKind::*;
        let line = self.line;
        let kind = match c {
            '\n' => {
                self.line += 1;
                return None;
            },
            ' ' | '\r' | '\t' => return None,
            '!' => if self.does_next_match('=') { BangEqual } else { Bang },
            '=' => if self.does_next_match('=') { EqualEqual } else { Equal },
            '<' => if self.does_next_match('=') { LessEqual } else { Less },
            '>' => if self.does_next_match('=') { GreaterEqual } else { Greater },
            '/' => {
                if self.does_next_match('/') {
                    self.advance_while(|n| n != '\n');
                    return None;
                }
                Slash
            },
            '"' => return Some(self.extract_string(start)),
            c if c.is_ascii_digit() => self.extract_number(),
            c if can_start_identifier(c) => self.extract_identifier(start),
            c => match PUNCTUATION.get(&c) {
                Some(kind) => *kind,
                None => return Some(Err(Error::unexpected_character(line, c))),
            },
        };

        let source = self.source;
        let end = self.position();
        Some(Ok(Token {
            kind,
            lexeme: &source[start..end],
            line,
            offset: start,
        }))
    }

    /// Byte offset of the next unconsumed character.
    fn position(&mut self) -> usize {
        self.src.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn does_next_match(&mut self, expected: char) -> bool {
        match self.src.peek() {
            Some(&(_, next)) if next == expected => {
                self.src.next();
                true
            }
            _ => false,
        }
    }

    fn advance_while(&mut self, mut keep_going: impl FnMut(char) -> bool) {
        while let Some(&(_, next)) = self.src.peek() {
            if !keep_going(next) {
                break;
            }
            self.src.next();
        }
    }

    fn extract_string(&mut self, quote: usize) -> Result<Token<'src>> {
        let line = self.line;
        let mut newline_count = 0;
        self.advance_while(|c| {
            if c == '\n' { newline_count += 1 }
            c != '"'
        });
        self.line += newline_count;

        let source = self.source;
        match self.src.next() {
            None => Err(Error::unterminated_string(line)),
            Some((end, _)) => Ok(Token {
                kind: TokenKind::String,
                lexeme: &source[quote + 1..end],
                line,
                offset: quote + 1,
            }),
        }
    }

    fn extract_number(&mut self) -> TokenKind {
        self.advance_while(|n| n.is_ascii_digit());

        // A '.' only belongs to the number when a digit follows it.
        if let Some(&(_, '.')) = self.src.peek() {
            if let Some(&(_, maybe_digit)) = self.src.peek_nth(1) {
                if maybe_digit.is_ascii_digit() {
                    self.src.next();
                    self.advance_while(|n| n.is_ascii_digit());
                }
            }
        }

        TokenKind::Number
    }

    fn extract_identifier(&mut self, start: usize) -> TokenKind {
        self.advance_while(is_part_of_valid_identifier);

        let source = self.source;
        let end = self.position();
        match KEYWORDS.get(&source[start..end]) {
            Some(keyword) => *keyword,
            None => TokenKind::Identifier,
        }
    }
}

/// Scans raw bytes. A byte sequence that is not UTF-8 is an unexpected
/// character on its line, unless the text before it already fails to scan.
pub fn scan_bytes(input: &[u8]) -> Result<Vec<Token<'_>>> {
    let valid_up_to = match std::str::from_utf8(input) {
        Ok(source) => return Scanner::new(source).scan_tokens(),
        Err(e) => e.valid_up_to(),
    };

    let (valid, _) = input.split_at(valid_up_to);
    let prefix = std::str::from_utf8(valid).unwrap_or_default();
    for token in Scanner::new(prefix) {
        match token {
            // The string was only cut short by the invalid byte.
            Err(e) if e.kind() == &ErrorKind::UnterminatedString => break,
            Err(e) => return Err(e),
            Ok(_) => {},
        }
    }

    let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
    debug!(offset = valid_up_to, line, "invalid UTF-8 in source");
    Err(Error::unexpected_character(line, char::REPLACEMENT_CHARACTER))
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
