use std::{
    io::{self, BufRead, BufReader, Read},
    rc::Rc,
};

use crate::{Line, Position};

pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Whitespace classes understood by [`Reader::skip_while`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whitespace {
    /// Space and tab.
    Horizontal,
    /// Space, tab, CR and LF.
    All,
}

impl Whitespace {
    pub fn contains(self, byte: u8) -> bool {
        match self {
            Whitespace::Horizontal => matches!(byte, b' ' | b'\t'),
            Whitespace::All => matches!(byte, b' ' | b'\t' | b'\r' | b'\n'),
        }
    }
}

/// Byte reader with one byte of lookahead and line/column tracking.
///
/// Every line terminator (`\n`, `\r`, `\n\r`, `\r\n`) is returned as a single `\n`.
pub struct Reader<R> {
    inner: BufReader<R>,
    position: Position,
    exhausted: bool,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R, source: Rc<String>) -> Self {
        Reader::with_capacity(inner, source, DEFAULT_BUFFER_SIZE)
    }

    /// `capacity` is clamped to at least one byte; an empty buffer could never peek.
    pub fn with_capacity(inner: R, source: Rc<String>, capacity: usize) -> Self {
        Reader {
            inner: BufReader::with_capacity(capacity.max(1), inner),
            position: Position::new(source),
            exhausted: false,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Next byte without consuming it. Position is unchanged.
    ///
    /// Once the end of stream has been seen it stays seen, even for sources
    /// such as terminals that could produce more data later.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.exhausted {
            return Ok(None);
        }
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_raw(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    /// Consumes one byte and advances the position.
    ///
    /// Returns `None` at end of stream, which moves the line to [`Line::Eof`].
    pub fn next(&mut self) -> io::Result<Option<u8>> {
        match self.read_raw()? {
            Some(ch @ (b'\n' | b'\r')) => {
                self.newline(ch)?;
                Ok(Some(b'\n'))
            }
            Some(ch) => {
                self.position.column += 1;
                Ok(Some(ch))
            }
            None => {
                self.exhausted = true;
                self.position.line = Line::Eof;
                self.position.column = 0;
                Ok(None)
            }
        }
    }

    fn newline(&mut self, ch: u8) -> io::Result<()> {
        if let Line::Number(line) = self.position.line {
            self.position.line = Line::Number(line + 1);
        }
        self.position.column = 0;

        let next = self.peek()?;
        if (ch == b'\n' && next == Some(b'\r')) || (ch == b'\r' && next == Some(b'\n')) {
            self.inner.consume(1);
        }
        Ok(())
    }

    /// Consumes bytes in `class` and returns the first byte outside it, also consumed.
    pub fn skip_while(&mut self, class: Whitespace) -> io::Result<Option<u8>> {
        loop {
            match self.next()? {
                Some(ch) if class.contains(ch) => continue,
                other => return Ok(other),
            }
        }
    }
}
