//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$raw` - The lexeme bytes (`Vec<u8>`); the string value is decoded from them
/// * `$position` - Where the token starts
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, b"42".to_vec(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $raw:expr, $position:expr) => {{
        let raw: Vec<u8> = $raw;
        Token {
            kind: $kind,
            value: String::from_utf8_lossy(&raw).into_owned(),
            raw,
            position: $position,
        }
    }};
}
