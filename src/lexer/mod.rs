//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts a byte stream
//! into a stream of tokens for a parser to pull. It handles:
//!
//! - Byte-level reading with line/column tracking and line break normalization
//! - Recognition of keywords, identifiers, literals, and operators
//! - Numeric literals (decimal, hexadecimal, floating point, exponents)
//! - String literals with escape sequences
//! - Line comments and whitespace

pub mod lexer;
pub mod reader;
pub mod tokens;
