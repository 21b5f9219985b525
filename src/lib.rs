#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// Line component of a [`Position`]. Becomes `Eof` once the stream is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Number(u32),
    Eof,
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Number(line) => write!(f, "{}", line),
            Line::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub source: Rc<String>,
    pub line: Line,
    pub column: u32,
}

impl Position {
    pub fn new(source: Rc<String>) -> Self {
        Position {
            source,
            line: Line::Number(1),
            column: 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.line == Line::Eof
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Only does anything when `RUST_LOG` is set, e.g. `RUST_LOG=teddy=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Returns the text of the 1-based `line` in `content`, without its line break.
///
/// `\r\n`, `\n\r` and lone `\r` count as one break, the same way the reader counts them.
pub fn get_line(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    let bytes = content.as_bytes();
    let mut current = 1;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' || b == b'\r' {
            if current == line {
                return Some(&content[start..i]);
            }
            if let Some(&next) = bytes.get(i + 1) {
                if (b == b'\n' && next == b'\r') || (b == b'\r' && next == b'\n') {
                    i += 1;
                }
            }
            current += 1;
            start = i + 1;
        }
        i += 1;
    }

    if current == line {
        Some(&content[start..])
    } else {
        None
    }
}


pub fn display_error(error: &Error, content: &str) {
    /*
        Error: UnterminatedString (strings cannot span lines)
        -> main.ted
           |
         2 | a = "abc
           | --------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", position.source);

    let Line::Number(line) = position.line else {
        eprintln!("   {}", error);
        return;
    };
    let Some(line_text) = get_line(content, line) else {
        eprintln!("   {}", error);
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
