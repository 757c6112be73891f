//! Indentation-aware lexical analyzer.
//!
//! Besides the usual lexemes, the lexer derives block structure from leading
//! whitespace: it keeps a stack of the widths at which blocks were opened and
//! emits synthetic `Indent`/`Dedent` tokens whenever the width of the next
//! significant line departs from the top of that stack.  Blank and
//! comment-only lines are consumed before tokenization and leave no trace in
//! the token stream.

use std::error::Error;
use std::fmt;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;
use std::str;

use crate::byte_reader::ByteReader;
use crate::ctx::Context;
use crate::diag::{FullSyntaxError, Position, SyntaxError};
use crate::interner::Symbol;
use crate::token::Token;

/// Turn a byte stream into a token stream.
///
/// The first token is scanned eagerly, so `current_token` is defined from
/// construction on.  After the end of input the lexer keeps returning `Eof`.
#[derive(Debug)]
pub struct Lexer<R: BufRead> {
    input: ByteReader<R>,
    ctx: Rc<Context>,
    line: Position,
    current: Token,
    started: bool,

    // Widths at which the currently open blocks started, bottom first.
    // Never empty; the bottom entry is always 0.
    indents: Vec<usize>,
    current_indent: usize,

    // Buffer used when scanning longer tokens.  Allocated here to reuse memory.
    buf: Vec<u8>,
}

impl<R: BufRead> Lexer<R> {
    /// Creates a lexer over `input` and scans the first token.
    pub fn new(input: R, ctx: Rc<Context>) -> Result<Lexer<R>, LexerError> {
        let mut lexer = Lexer {
            input: ByteReader::new(input),
            ctx,
            line: 1,
            current: Token::Eof,
            started: false,
            indents: vec![0],
            current_indent: 0,
            buf: Vec::new(),
        };
        lexer.next_token()?;
        Ok(lexer)
    }

    /// The most recently scanned token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Line of the most recently scanned token.
    pub fn pos(&self) -> Position {
        self.line
    }

    /// Scan the next token and return it.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_insignificant()?;

        let token = if self.current_indent != self.block_indent() {
            self.scan_indent()
        } else {
            match self.input.peek()? {
                Some(b) if b.is_ascii_digit() => self.scan_number()?,
                Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.scan_identifier()?,
                Some(b) if b == b'\'' || b == b'"' => self.scan_string(b)?,
                Some(b) if b == b'!' || b == b'<' || b == b'>' || b == b'=' => {
                    self.scan_operator(b)?
                }
                Some(b'\n') => {
                    self.input.bump()?;
                    self.line += 1;
                    Token::Newline
                }
                Some(b) => {
                    self.input.bump()?;
                    Token::Char(b)
                }
                None => self.eof_token(),
            }
        };

        self.current = token.clone();
        self.started = true;
        Ok(token)
    }

    /// Check that the current token equals `expected`.
    pub fn expect(&self, expected: &Token) -> Result<(), LexerError> {
        if self.current == *expected {
            Ok(())
        } else {
            Err(self.syntax_error(SyntaxError::UnexpectedToken(
                self.current.to_string(),
                expected.to_string(),
            )))
        }
    }

    /// Advance, then check that the new current token equals `expected`.
    pub fn expect_next(&mut self, expected: &Token) -> Result<(), LexerError> {
        self.next_token()?;
        self.expect(expected)
    }

    /// Check that the current token is an identifier and return its symbol.
    pub fn expect_id(&self) -> Result<Symbol, LexerError> {
        if let Token::Id(sym) = &self.current {
            Ok(sym.clone())
        } else {
            Err(self.syntax_error(SyntaxError::ExpectedIdentifier(self.current.to_string())))
        }
    }

    /// Consume spaces, comments and - at the start of a logical line - blank
    /// lines, leaving the reader on the first byte of the next token.
    ///
    /// When the previous token was a `Newline`, the count of leading spaces
    /// of the surviving line becomes the candidate indentation width.
    fn skip_insignificant(&mut self) -> Result<(), LexerError> {
        let after_newline = self.started && self.current == Token::Newline;
        let at_line_start = !self.started || after_newline;

        let mut space_count;
        loop {
            space_count = 0;
            while self.input.eat(b' ')? {
                space_count += 1;
            }

            if self.input.peek()? == Some(b'#') {
                while let Some(b) = self.input.peek()? {
                    if b == b'\n' {
                        break;
                    }
                    self.input.bump()?;
                }
            }

            if at_line_start && self.input.peek()? == Some(b'\n') {
                self.input.bump()?;
                self.line += 1;
            } else {
                break;
            }
        }

        if after_newline && space_count % 2 != 0 {
            return Err(self.syntax_error(SyntaxError::OddIndent(space_count)));
        }
        if after_newline && space_count != self.block_indent() {
            self.current_indent = space_count;
        }
        Ok(())
    }

    /// Emit one step of an indentation change.  Runs again on the following
    /// `next_token` calls until the stack catches up with `current_indent`.
    fn scan_indent(&mut self) -> Token {
        if self.current_indent > self.block_indent() {
            self.indents.push(self.current_indent);
            Token::Indent
        } else {
            self.indents.pop();
            Token::Dedent
        }
    }

    fn block_indent(&self) -> usize {
        *self.indents.last().expect("indent stack is never empty")
    }

    fn eof_token(&self) -> Token {
        // Close the last logical line before reporting end of input, so that
        // every statement is Newline-terminated.
        if !self.started {
            return Token::Eof;
        }
        match self.current {
            Token::Newline | Token::Eof | Token::Dedent => Token::Eof,
            _ => Token::Newline,
        }
    }

    fn scan_number(&mut self) -> Result<Token, LexerError> {
        self.buf.clear();
        while let Some(b) = self.input.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            self.input.bump()?;
            self.buf.push(b);
        }

        let lit = str::from_utf8(&self.buf).expect("digits are ASCII");
        let n = lit
            .parse::<i64>()
            .map_err(|_| self.syntax_error(SyntaxError::BadIntLiteral(lit.to_string())))?;
        Ok(Token::Number(n))
    }

    fn scan_identifier(&mut self) -> Result<Token, LexerError> {
        self.buf.clear();
        while let Some(b) = self.input.peek()? {
            if !(b.is_ascii_alphanumeric() || b == b'_') {
                break;
            }
            self.input.bump()?;
            self.buf.push(b);
        }

        let name = str::from_utf8(&self.buf).expect("identifier bytes are ASCII");
        let sym = self.ctx.symbol(name);
        Ok(match self.ctx.keyword(&sym) {
            Some(token) => token,
            None => Token::Id(sym),
        })
    }

    fn scan_string(&mut self, quote: u8) -> Result<Token, LexerError> {
        self.input.bump()?;
        self.buf.clear();
        loop {
            let b = match self.input.bump()? {
                Some(b) => b,
                None => return Err(self.syntax_error(SyntaxError::UnterminatedString)),
            };
            if b == quote {
                break;
            }
            if b == b'\n' {
                self.line += 1;
                self.buf.push(b);
            } else if b == b'\\' {
                match self.input.peek()? {
                    Some(b'\'') | Some(b'"') => {
                        let q = self.input.bump()?.expect("peeked");
                        self.buf.push(q);
                    }
                    Some(b'n') => {
                        self.input.bump()?;
                        self.buf.push(b'\n');
                    }
                    Some(b't') => {
                        self.input.bump()?;
                        self.buf.push(b'\t');
                    }
                    // Unknown escapes pass through verbatim, backslash included.
                    Some(_) => {
                        let other = self.input.bump()?.expect("peeked");
                        self.buf.push(b'\\');
                        self.buf.push(other);
                    }
                    None => return Err(self.syntax_error(SyntaxError::UnterminatedString)),
                }
            } else {
                self.buf.push(b);
            }
        }

        let value = String::from_utf8(self.buf.clone())
            .map_err(|_| self.syntax_error(SyntaxError::InvalidUtf8))?;
        Ok(Token::Str(value))
    }

    /// Pair `! < > =` with a following `=` into a comparison token; a byte
    /// without one stays a plain `Char` (a bare `=` is how assignment reaches
    /// the parser).
    fn scan_operator(&mut self, first: u8) -> Result<Token, LexerError> {
        self.input.bump()?;
        if self.input.eat(b'=')? {
            Ok(match first {
                b'=' => Token::Eq,
                b'!' => Token::NotEq,
                b'<' => Token::LessOrEq,
                _ => Token::GreaterOrEq,
            })
        } else {
            Ok(Token::Char(first))
        }
    }

    fn syntax_error(&self, error: SyntaxError) -> LexerError {
        LexerError::Syntax(FullSyntaxError {
            pos: self.line,
            error,
        })
    }
}

#[derive(Debug)]
pub enum LexerError {
    Io(io::Error),
    Syntax(FullSyntaxError),
}

impl Error for LexerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LexerError::Io(e) => Some(e),
            LexerError::Syntax(e) => Some(e),
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::Io(e) => write!(f, "read error: {}", e),
            LexerError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl From<io::Error> for LexerError {
    fn from(e: io::Error) -> LexerError {
        LexerError::Io(e)
    }
}
