use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("elseif", TokenKind::ElseIf);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("in", TokenKind::In);
        map.insert("nil", TokenKind::Nil);
        map
    };
}

/// Kind of a token.
///
/// Single-byte punctuation uses its ASCII value as discriminant, so
/// `TokenKind::Plus as u16 == b'+' as u16`. Everything else lives above the
/// ASCII range.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u16)]
pub enum TokenKind {
    Identifier = 61601,
    Number,
    String,

    // Reserved
    Func,
    Return,
    If,
    Else,
    ElseIf,
    True,
    False,

    Equals,        // ==
    NotEquals,     // !=
    LessEquals,    // <=
    GreaterEquals, // >=

    For,
    Break,
    Continue,
    And,
    Or,
    Not,
    In,
    Nil,

    EOF,

    Hash = b'#' as u16,
    Percent = b'%' as u16,
    OpenParen = b'(' as u16,
    CloseParen = b')' as u16,
    Star = b'*' as u16,
    Plus = b'+' as u16,
    Comma = b',' as u16,
    Dash = b'-' as u16,
    Slash = b'/' as u16,
    Colon = b':' as u16,
    Semicolon = b';' as u16,
    Less = b'<' as u16,
    Assignment = b'=' as u16,
    Greater = b'>' as u16,
    OpenBracket = b'[' as u16,
    CloseBracket = b']' as u16,
    Caret = b'^' as u16,
    OpenCurly = b'{' as u16,
    CloseCurly = b'}' as u16,
}

impl TokenKind {
    /// Single-byte punctuation for `byte`, if there is one.
    ///
    /// `=`, `<`, `>` and `/` are included; the lexer decides whether they start
    /// a composite or a comment before falling back to this.
    pub fn from_punctuation(byte: u8) -> Option<TokenKind> {
        let kind = match byte {
            b'#' => TokenKind::Hash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'*' => TokenKind::Star,
            b'+' => TokenKind::Plus,
            b',' => TokenKind::Comma,
            b'-' => TokenKind::Dash,
            b'/' => TokenKind::Slash,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b'<' => TokenKind::Less,
            b'=' => TokenKind::Assignment,
            b'>' => TokenKind::Greater,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b'^' => TokenKind::Caret,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Func
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::ElseIf
                | TokenKind::True
                | TokenKind::False
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::Nil
        )
    }

    /// Source spelling for keywords and operators, `None` for literal classes and EOF.
    pub fn as_str(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Identifier | TokenKind::Number | TokenKind::String | TokenKind::EOF => {
                return None
            }
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::ElseIf => "elseif",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::In => "in",
            TokenKind::Nil => "nil",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Hash => "#",
            TokenKind::Percent => "%",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Star => "*",
            TokenKind::Plus => "+",
            TokenKind::Comma => ",",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Less => "<",
            TokenKind::Assignment => "=",
            TokenKind::Greater => ">",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Caret => "^",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
        };
        Some(text)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme as text. Bytes that are not valid UTF-8 show up as U+FFFD here.
    pub value: String,
    /// Lexeme bytes exactly as scanned, escapes already decoded.
    pub raw: Vec<u8>,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line dump used by the `teddy` binary: `line:column Kind (value)`.
    pub fn debug(&self) -> String {
        let pos = &self.position;
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            format!("{}:{} {} ({:?})", pos.line, pos.column, self.kind, self.value)
        } else {
            format!("{}:{} {} ()", pos.line, pos.column, self.kind)
        }
    }
}
