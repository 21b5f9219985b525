use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A lexical error, positioned where the scanner stopped and carrying the
/// lexeme it had gathered so far.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    token: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, token: impl Into<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            token: token.into(),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_token(&self) -> &str {
        &self.token
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalHexadecimal => "IllegalHexadecimal",
            ErrorImpl::MalformedExponent => "MalformedExponent",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::EscapeOutOfRange { .. } => "EscapeOutOfRange",
            ErrorImpl::InvalidBang => "InvalidBang",
            ErrorImpl::InvalidToken => "InvalidToken",
            ErrorImpl::ReadFailure { .. } => "ReadFailure",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalHexadecimal => ErrorTip::Suggestion(String::from(
                "expected at least one hexadecimal digit after `0x`",
            )),
            ErrorImpl::MalformedExponent => ErrorTip::Suggestion(String::from(
                "expected digits after the exponent marker",
            )),
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "strings cannot span lines, end the line with `\\` to continue it",
            )),
            ErrorImpl::EscapeOutOfRange { value } => ErrorTip::Suggestion(format!(
                "decimal escape `\\{}` is above 255",
                value
            )),
            ErrorImpl::InvalidBang => ErrorTip::Suggestion(String::from(
                "did you mean `!=`? use `not` for negation",
            )),
            ErrorImpl::InvalidToken => ErrorTip::None,
            ErrorImpl::ReadFailure { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pos = &self.position;
        if pos.is_eof() {
            write!(f, "{} at EOF: {}", pos.source, self.internal_error)
        } else {
            write!(
                f,
                "{} line:{}(column:{}) near '{}': {}",
                pos.source, pos.line, pos.column, self.token, self.internal_error
            )
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("illegal hexadecimal number")]
    IllegalHexadecimal,
    #[error("malformed number exponent")]
    MalformedExponent,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("decimal escape out of range: {value}")]
    EscapeOutOfRange { value: u32 },
    #[error("Invalid '!' token")]
    InvalidBang,
    #[error("Invalid token")]
    InvalidToken,
    #[error("read failure: {message}")]
    ReadFailure { message: String },
}
