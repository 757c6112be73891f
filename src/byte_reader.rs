//! Peekable byte source for the tokenizer.
//!
//! Pym source text is consumed byte by byte and the tokenizer needs one byte
//! of lookahead almost everywhere.  `Peekable<Bytes<R>>` exposes the
//! lookahead as `&Result<u8, io::Error>`, which is awkward to branch on, so
//! this thin wrapper flattens both `peek` and `next` to `Option<u8>` and
//! surfaces I/O failures through `Result`.

use std::io;
use std::io::prelude::*;
use std::io::Bytes;
use std::iter::Peekable;

/// A buffered reader viewed as a stream of bytes with single-byte lookahead.
#[derive(Debug)]
pub struct ByteReader<R: BufRead> {
    input: Peekable<Bytes<R>>,
}

impl<R: BufRead> ByteReader<R> {
    pub fn new(input: R) -> ByteReader<R> {
        ByteReader {
            input: input.bytes().peekable(),
        }
    }

    /// Return the next byte without consuming it, or `None` at end of input.
    pub fn peek(&mut self) -> Result<Option<u8>, io::Error> {
        match self.input.peek() {
            Some(Ok(b)) => Ok(Some(*b)),
            Some(Err(_)) => {
                // The error is behind a shared reference; take it by advancing.
                Err(self.input.next().unwrap().unwrap_err())
            }
            None => Ok(None),
        }
    }

    /// Consume and return the next byte, or `None` at end of input.
    pub fn bump(&mut self) -> Result<Option<u8>, io::Error> {
        match self.input.next() {
            Some(Ok(b)) => Ok(Some(b)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Consume the next byte if it equals `expected`.  Returns whether it did.
    pub fn eat(&mut self, expected: u8) -> Result<bool, io::Error> {
        if self.peek()? == Some(expected) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
