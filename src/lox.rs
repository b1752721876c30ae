use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::scanner::scan_bytes;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Scanned,
    LexicalError,
}

/// Scans source text and prints one token per line to `out`. Errors go to
/// `err_out`; the caller decides what an error means for the process.
pub struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
}

impl<Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    pub fn new(out: Out, err_out: ErrOut) -> Self {
        Self { out, err_out }
    }

    pub fn run(&mut self, source: &[u8]) -> io::Result<Outcome> {
        match scan_bytes(source) {
            Ok(tokens) => {
                for token in tokens.iter() {
                    writeln!(self.out, "{}", token)?;
                }
                Ok(Outcome::Scanned)
            },
            Err(e) => {
                writeln!(self.err_out, "{}", e)?;
                Ok(Outcome::LexicalError)
            },
        }
    }

    /// Reads and scans `input` line by line until it is exhausted. A bad line
    /// is reported and the session carries on.
    pub fn run_prompt(&mut self, mut input: impl BufRead) -> io::Result<()> {
        let mut buffer = Vec::new();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            buffer.clear();

            let num_bytes = input.read_until(b'\n', &mut buffer)?;
            if num_bytes == 0 { break };

            if self.run(&buffer)? == Outcome::LexicalError {
                debug!(input = %String::from_utf8_lossy(&buffer).trim_end(), "rejected prompt input");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(source: &[u8]) -> (Outcome, String, String) {
        let (mut out, mut err_out) = (Vec::new(), Vec::new());
        let outcome = Lox::new(&mut out, &mut err_out).run(source).unwrap();
        (outcome, String::from_utf8(out).unwrap(), String::from_utf8(err_out).unwrap())
    }

    fn run_prompt(input: &[u8]) -> (String, String) {
        let (mut out, mut err_out) = (Vec::new(), Vec::new());
        Lox::new(&mut out, &mut err_out).run_prompt(input).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err_out).unwrap())
    }

    #[test]
    fn prints_one_token_per_line() {
        let (outcome, out, err_out) = run(b"var x = 12.5;");
        assert_eq!(Outcome::Scanned, outcome);
        assert_eq!("VAR var\nIDENTIFIER x\nEQUAL =\nNUMBER 12.5\nSEMICOLON ;\nEOF\n", out);
        assert_eq!("", err_out);
    }

    #[test]
    fn prints_string_contents_without_quotes() {
        let (_, out, _) = run(b"\"hi there\"");
        assert_eq!("STRING hi there\nEOF\n", out);
    }

    #[test]
    fn reports_error_and_prints_no_tokens() {
        let (outcome, out, err_out) = run(b"a\n+ @");
        assert_eq!(Outcome::LexicalError, outcome);
        assert_eq!("", out);
        assert_eq!("[line 2] Error: Unexpected character '@'.\n", err_out);
    }

    #[test]
    fn reports_invalid_utf8_as_a_lexical_error() {
        let (outcome, out, err_out) = run(b"print 1;\n\xff");
        assert_eq!(Outcome::LexicalError, outcome);
        assert_eq!("", out);
        assert_eq!("[line 2] Error: Unexpected character '\u{fffd}'.\n", err_out);
    }

    #[test]
    fn prompt_continues_after_an_error() {
        let (out, err_out) = run_prompt(b"\"open\n1\n");
        assert_eq!("> > NUMBER 1\nEOF\n> ", out);
        assert_eq!("[line 1] Error: Unterminated string.\n", err_out);
    }

    #[test]
    fn prompt_continues_after_invalid_utf8() {
        let (out, err_out) = run_prompt(b"\xff\n1\n");
        assert_eq!("> > NUMBER 1\nEOF\n> ", out);
        assert_eq!("[line 1] Error: Unexpected character '\u{fffd}'.\n", err_out);
    }

    #[test]
    fn prompt_without_input_only_prompts() {
        let (out, err_out) = run_prompt(b"");
        assert_eq!("> ", out);
        assert_eq!("", err_out);
    }
}
