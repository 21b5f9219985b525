use std::{io::Read, rc::Rc};

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    reader::{Reader, Whitespace},
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

fn is_decimal(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Identifier bytes; digits are only allowed after the first byte.
fn is_ident(ch: u8, pos: usize) -> bool {
    ch == b'_' || ch.is_ascii_alphabetic() || (pos > 0 && is_decimal(ch))
}

fn lexeme(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}

/// Pull-based tokenizer: one [`Token`] per [`Lexer::scan`] call.
pub struct Lexer<R> {
    reader: Reader<R>,
    newline_before_paren: bool,
    prev_kind: Option<TokenKind>,
}

impl<R: Read> Lexer<R> {
    pub fn new(source: R, file: Option<String>) -> Lexer<R> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer::from_reader(Reader::new(source, file_name))
    }

    pub fn from_reader(reader: Reader<R>) -> Lexer<R> {
        Lexer {
            reader,
            newline_before_paren: false,
            prev_kind: None,
        }
    }

    /// True when the last token is a `(` that directly follows a `)` with a
    /// line break in between, e.g. `f()\n(g)`.
    pub fn newline_before_paren(&self) -> bool {
        self.newline_before_paren
    }

    pub fn position(&self) -> &Position {
        self.reader.position()
    }

    fn error(&self, error: ErrorImpl, token: &[u8]) -> Error {
        Error::new(error, self.reader.position().clone(), lexeme(token))
    }

    fn read_failure(&self, error: std::io::Error) -> Error {
        self.error(
            ErrorImpl::ReadFailure {
                message: error.to_string(),
            },
            &[],
        )
    }

    fn next(&mut self) -> Result<Option<u8>, Error> {
        self.reader.next().map_err(|e| self.read_failure(e))
    }

    fn peek(&mut self) -> Result<Option<u8>, Error> {
        self.reader.peek().map_err(|e| self.read_failure(e))
    }

    fn skip_while(&mut self, class: Whitespace) -> Result<Option<u8>, Error> {
        self.reader.skip_while(class).map_err(|e| self.read_failure(e))
    }

    /// Consumes the next byte if it is `expected`.
    fn match_next(&mut self, expected: u8) -> Result<bool, Error> {
        if self.peek()? == Some(expected) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Produces the next token, skipping whitespace and line comments.
    ///
    /// After the end of input every call returns an `EOF` token. An error
    /// leaves the lexer wherever it stopped; the caller decides whether to
    /// keep scanning.
    pub fn scan(&mut self) -> Result<Token, Error> {
        let mut newline = false;

        loop {
            let mut ch = self.skip_while(Whitespace::Horizontal)?;
            if ch == Some(b'\n') {
                newline = true;
                ch = self.skip_while(Whitespace::All)?;
            }

            self.newline_before_paren = ch == Some(b'(')
                && self.prev_kind == Some(TokenKind::CloseParen)
                && newline;

            let position = self.reader.position().clone();

            let Some(ch) = ch else {
                debug!(source = %position.source, "end of stream");
                self.prev_kind = Some(TokenKind::EOF);
                return Ok(MK_TOKEN!(TokenKind::EOF, Vec::new(), position));
            };

            if ch == b'/' && self.peek()? == Some(b'/') {
                let ended_with_newline = self.skip_line_comment()?;
                debug!(line = %position.line, "skipped line comment");
                newline |= ended_with_newline;
                continue;
            }

            // A failed lexeme still separates `)` from a following `(`.
            let token = match self.scan_token(ch, position) {
                Ok(token) => token,
                Err(e) => {
                    self.prev_kind = None;
                    return Err(e);
                }
            };
            trace!(kind = %token.kind, value = %token.value, pos = %token.position, "token");
            self.prev_kind = Some(token.kind);
            return Ok(token);
        }
    }

    fn scan_token(&mut self, ch: u8, position: Position) -> Result<Token, Error> {
        let mut buf = Vec::new();

        if is_ident(ch, 0) {
            self.scan_ident(ch, &mut buf)?;
            let mut token = MK_TOKEN!(TokenKind::Identifier, buf, position);
            if let Some(kind) = RESERVED_LOOKUP.get(token.value.as_str()) {
                token.kind = *kind;
            }
            return Ok(token);
        }

        if is_decimal(ch) {
            self.scan_number(ch, &mut buf)?;
            return Ok(MK_TOKEN!(TokenKind::Number, buf, position));
        }

        let kind = match ch {
            b'"' | b'\'' => {
                self.scan_string(ch, &mut buf)?;
                return Ok(MK_TOKEN!(TokenKind::String, buf, position));
            }
            b'=' if self.match_next(b'=')? => TokenKind::Equals,
            b'!' if self.match_next(b'=')? => TokenKind::NotEquals,
            b'!' => return Err(self.error(ErrorImpl::InvalidBang, b"!")),
            b'<' if self.match_next(b'=')? => TokenKind::LessEquals,
            b'>' if self.match_next(b'=')? => TokenKind::GreaterEquals,
            _ => match TokenKind::from_punctuation(ch) {
                Some(kind) => kind,
                None => return Err(self.error(ErrorImpl::InvalidToken, &[ch])),
            },
        };

        let raw = kind.as_str().unwrap_or_default().as_bytes().to_vec();
        Ok(MK_TOKEN!(kind, raw, position))
    }

    /// Discards the rest of the physical line, the line break included.
    ///
    /// Returns whether the comment ended at a line break rather than at the
    /// end of the stream.
    fn skip_line_comment(&mut self) -> Result<bool, Error> {
        loop {
            match self.next()? {
                Some(b'\n') => return Ok(true),
                Some(_) => continue,
                None => return Ok(false),
            }
        }
    }

    fn scan_ident(&mut self, ch: u8, buf: &mut Vec<u8>) -> Result<(), Error> {
        buf.push(ch);
        while let Some(next) = self.peek()? {
            if !is_ident(next, buf.len()) {
                break;
            }
            self.next()?;
            buf.push(next);
        }
        Ok(())
    }

    /// Consumes a run of decimal digits and returns how many there were.
    fn scan_decimal(&mut self, buf: &mut Vec<u8>) -> Result<usize, Error> {
        let mut count = 0;
        while let Some(next) = self.peek()? {
            if !is_decimal(next) {
                break;
            }
            self.next()?;
            buf.push(next);
            count += 1;
        }
        Ok(count)
    }

    // Decimal, hexadecimal, floating point and scientific notation.
    // The text is kept exactly as written; `1.` is accepted, `1e` is not.
    fn scan_number(&mut self, ch: u8, buf: &mut Vec<u8>) -> Result<(), Error> {
        buf.push(ch);

        if ch == b'0' {
            if let Some(x @ (b'x' | b'X')) = self.peek()? {
                self.next()?;
                buf.push(x);

                let mut has_value = false;
                while let Some(next) = self.peek()? {
                    if !next.is_ascii_hexdigit() {
                        break;
                    }
                    self.next()?;
                    buf.push(next);
                    has_value = true;
                }

                if !has_value {
                    return Err(self.error(ErrorImpl::IllegalHexadecimal, buf.as_slice()));
                }
                return Ok(());
            }
        }

        self.scan_decimal(buf)?;

        if self.match_next(b'.')? {
            buf.push(b'.');
            self.scan_decimal(buf)?;
        }

        if let Some(e @ (b'e' | b'E')) = self.peek()? {
            self.next()?;
            buf.push(e);
            if let Some(sign @ (b'+' | b'-')) = self.peek()? {
                self.next()?;
                buf.push(sign);
            }
            if self.scan_decimal(buf)? == 0 {
                return Err(self.error(ErrorImpl::MalformedExponent, buf.as_slice()));
            }
        }

        Ok(())
    }

    fn scan_string(&mut self, quote: u8, buf: &mut Vec<u8>) -> Result<(), Error> {
        loop {
            match self.next()? {
                Some(ch) if ch == quote => return Ok(()),
                None | Some(b'\n') => {
                    return Err(self.error(ErrorImpl::UnterminatedString, buf.as_slice()));
                }
                Some(b'\\') => self.scan_escape(buf)?,
                Some(ch) => buf.push(ch),
            }
        }
    }

    fn scan_escape(&mut self, buf: &mut Vec<u8>) -> Result<(), Error> {
        let Some(ch) = self.next()? else {
            return Err(self.error(ErrorImpl::UnterminatedString, buf.as_slice()));
        };

        let byte = match ch {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            // Line continuation. The reader has already counted the line.
            b'\n' => b'\n',
            b'0'..=b'9' => {
                let mut value = u32::from(ch - b'0');
                for _ in 0..2 {
                    match self.peek()? {
                        Some(digit) if is_decimal(digit) => {
                            self.next()?;
                            value = value * 10 + u32::from(digit - b'0');
                        }
                        _ => break,
                    }
                }

                let Ok(code) = u8::try_from(value) else {
                    return Err(self.error(ErrorImpl::EscapeOutOfRange { value }, buf.as_slice()));
                };
                code
            }
            // `\\`, `\"`, `\'` and anything unknown: the byte itself.
            other => other,
        };

        buf.push(byte);
        Ok(())
    }
}

#[tracing::instrument(level = "debug", skip(source))]
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    tokenize_reader(source.as_bytes(), file)
}

#[tracing::instrument(level = "debug", skip(source))]
pub fn tokenize_reader<R: Read>(source: R, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.scan()?;
        let at_eof = token.kind == TokenKind::EOF;
        tokens.push(token);
        if at_eof {
            break;
        }
    }

    debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
