//! Error types for the lexer.
//!
//! This module defines the errors a scan can produce. It includes:
//!
//! - Error structures with source position and offending lexeme
//! - One variant per malformed-lexeme case
//! - Error formatting and display functionality
//! - Short suggestions shown next to the error name

pub mod errors;
