//! The compiler error types.

use compact_str::CompactString;
use thiserror::Error;

use super::token::TokenKind;

/// Errors reported by the lexer. Scanning continues after each one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}' on line {line}")]
    UnexpectedCharacter { found: char, line: u32 },
    #[error("unexpected end of string on line {line}")]
    UnterminatedString { line: u32 },
    #[error("exponent has no digits on line {line}")]
    EmptyExponent { line: u32 },
    #[error("invalid number format {lexeme} on line {line}")]
    InvalidNumber { lexeme: CompactString, line: u32 },
}

/// Syntax diagnostics accumulated by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Line: {line}: Expected next token to be {expected}, got: {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: u32,
    },
    #[error("Line: {line}: No prefix parse function for {found} found")]
    NoPrefixParseFn { found: TokenKind, line: u32 },
    #[error("Line: {line}: Invalid assignment target")]
    InvalidAssignTarget { line: u32 },
    #[error("Line: {line}: Invalid number literal {lexeme}")]
    InvalidNumber { lexeme: CompactString, line: u32 },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::NoPrefixParseFn { line, .. }
            | ParseError::InvalidAssignTarget { line }
            | ParseError::InvalidNumber { line, .. } => *line,
        }
    }
}
