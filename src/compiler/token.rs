//! The token.

use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use compact_str::CompactString;
use text_size::TextRange;

use crate::utils::Location;

/// Enum representing common lexeme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords:
    /// "and"
    And,
    /// "class"
    Class,
    /// "else"
    Else,
    /// "false"
    False,
    /// "for"
    For,
    /// "function"
    Function,
    /// "if"
    If,
    /// "null"
    Null,
    /// "or"
    Or,
    /// "return"
    Return,
    /// "super"
    Super,
    /// "this"
    This,
    /// "true"
    True,
    /// "while"
    While,

    // Two-char tokens:
    /// ":="
    Assign,
    /// "=="
    EqualEqual,
    /// "!="
    BangEqual,
    /// "<="
    LessEqual,
    /// ">="
    GreaterEqual,
    /// ".."
    DotDot,

    // One-char tokens:
    /// "("
    LeftParen,
    /// ")"
    RightParen,
    /// "{"
    LeftBrace,
    /// "}"
    RightBrace,
    /// "["
    LeftBracket,
    /// "]"
    RightBracket,
    /// ","
    Comma,
    /// "."
    Dot,
    /// "-"
    Minus,
    /// "+"
    Plus,
    /// ";"
    Semicolon,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// ":"
    Colon,
    /// "!"
    Bang,
    /// "="
    Equal,
    /// "<"
    Less,
    /// ">"
    Greater,

    // Literals:
    /// Identifier
    Ident,
    /// "12", "0.1", "1e-3"
    Number,
    /// ""abc""
    Str,

    /// End of the token stream.
    Eof,
}

impl TokenKind {
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "null" => TokenKind::Null,
            "or" => TokenKind::Or,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "while" => TokenKind::While,
            _ => return None,
        })
    }

    /// True for `:=` and `=`, both of which introduce an assignment.
    pub fn is_assign(self) -> bool {
        matches!(self, TokenKind::Assign | TokenKind::Equal)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Null => "null",
            TokenKind::Or => "or",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::While => "while",
            TokenKind::Assign => ":=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::DotDot => "..",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Colon => ":",
            TokenKind::Bang => "!",
            TokenKind::Equal => "=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Eof => "EOF",
        })
    }
}

/// The literal value carried by number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(BigDecimal),
    Str(CompactString),
}

/// Parsed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: CompactString,
    pub literal: Option<Literal>,
    pub location: Location,
    pub range: TextRange,
    pub file: Option<Rc<str>>,
}

impl Token {
    pub fn line(&self) -> u32 {
        self.location.line
    }
}
