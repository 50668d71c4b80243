//! The lexer.

use std::{rc::Rc, str::Chars, str::FromStr};

use bigdecimal::BigDecimal;
use compact_str::CompactString;
use text_size::{TextRange, TextSize};

use crate::utils::Location;

use super::{
    error::LexError,
    token::{
        Literal, Token,
        TokenKind::{self, *},
    },
};

/// Peekable iterator over a char sequence.
///
/// Next characters can be peeked via `first` method,
/// and position can be shifted forward via `bump` method.
struct Cursor<'a> {
    /// The input string.
    input: &'a str,
    /// Iterator over chars. Slightly faster than a &str.
    chars: Chars<'a>,
    line: u32,
    column: u32,
}

const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            input,
            chars: input.chars(),
            line: 1,
            column: 1,
        }
    }

    /// Peeks the next symbol from the input stream without consuming it.
    /// If requested position doesn't exist, `EOF_CHAR` is returned.
    /// However, getting `EOF_CHAR` doesn't always mean actual end of file,
    /// it should be checked with `is_eof` method.
    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// Peeks the second symbol from the input stream without consuming it.
    fn second(&self) -> char {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().unwrap_or(EOF_CHAR)
    }

    /// Checks if there is nothing more to consume.
    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Returns position of cursor.
    fn pos(&self) -> TextSize {
        TextSize::try_from(self.input.len() - self.chars.as_str().len()).unwrap_or_default()
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Moves to the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Eats `c` if it matches.
    fn eat(&mut self, c: char) -> bool {
        if self.first() == c {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Eats symbols while predicate returns true or until the end of file is reached.
    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }
}

/// True if `c` is valid as a first character of an identifier.
pub fn is_id_start(c: char) -> bool {
    // This is XID_Start OR '_' (which formally is not a XID_Start).
    c == '_' || unicode_ident::is_xid_start(c)
}

/// True if `c` is valid as a non-first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Transforms the source into tokens. The returned tokens always end with
/// one `Eof` token; malformed lexemes are reported and skipped.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(input, None).run()
}

/// Like [`tokenize`], tagging every token with the source file name.
pub fn tokenize_file(input: &str, file: Rc<str>) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(input, Some(file)).run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: Option<Rc<str>>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, file: Option<Rc<str>>) -> Self {
        Lexer {
            cursor: Cursor::new(input),
            file,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> (Vec<Token>, Vec<LexError>) {
        loop {
            let start = self.cursor.pos();
            let location = self.cursor.location();
            let Some(first_char) = self.cursor.bump() else {
                self.push(Eof, None, start, location);
                break;
            };
            match self.advance_token(first_char, start) {
                Ok(Some((kind, literal))) => self.push(kind, literal, start, location),
                Ok(None) => (),
                Err(e) => {
                    log::error!("{e}");
                    self.errors.push(e);
                }
            }
        }
        (self.tokens, self.errors)
    }

    fn push(
        &mut self,
        kind: TokenKind,
        literal: Option<Literal>,
        start: TextSize,
        location: Location,
    ) {
        let range = TextRange::new(start, self.cursor.pos());
        self.tokens.push(Token {
            kind,
            lexeme: CompactString::from(&self.cursor.input[range]),
            literal,
            location,
            range,
            file: self.file.clone(),
        });
    }

    /// Scans one lexeme. `Ok(None)` means trivia (whitespace or comment).
    fn advance_token(
        &mut self,
        first_char: char,
        start: TextSize,
    ) -> Result<Option<(TokenKind, Option<Literal>)>, LexError> {
        let line = self.cursor.line;
        let kind = match first_char {
            // Slash or line comment.
            '/' => {
                if self.cursor.eat('/') {
                    self.cursor.eat_while(|c| c != '\n');
                    return Ok(None);
                }
                Slash
            }

            // Whitespace.
            ' ' | '\r' | '\t' | '\n' => return Ok(None),

            // Dot or DotDot.
            '.' => {
                if self.cursor.eat('.') {
                    DotDot
                } else {
                    Dot
                }
            }

            // Two-char tokens.
            ':' if self.cursor.eat('=') => Assign,
            '!' if self.cursor.eat('=') => BangEqual,
            '=' if self.cursor.eat('=') => EqualEqual,
            '<' if self.cursor.eat('=') => LessEqual,
            '>' if self.cursor.eat('=') => GreaterEqual,

            // One-symbol tokens.
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            '[' => LeftBracket,
            ']' => RightBracket,
            ',' => Comma,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,
            '%' => Percent,
            ':' => Colon,
            '!' => Bang,
            '=' => Equal,
            '<' => Less,
            '>' => Greater,

            // String literal.
            '"' => return self.string(line).map(Some),

            // Numeric literal.
            '0'..='9' => return self.number(start, line).map(Some),

            // Identifier or keyword.
            c if is_id_start(c) => self.ident_or_keyword(start),

            c => return Err(LexError::UnexpectedCharacter { found: c, line }),
        };
        Ok(Some((kind, None)))
    }

    fn ident_or_keyword(&mut self, start: TextSize) -> TokenKind {
        self.cursor.eat_while(is_id_continue);
        let range = TextRange::new(start, self.cursor.pos());
        TokenKind::keyword(&self.cursor.input[range]).unwrap_or(Ident)
    }

    /// The contents between the quotes are taken verbatim.
    fn string(&mut self, line: u32) -> Result<(TokenKind, Option<Literal>), LexError> {
        let start = usize::from(self.cursor.pos());
        self.cursor.eat_while(|c| c != '"');
        if self.cursor.is_eof() {
            return Err(LexError::UnterminatedString { line });
        }
        let end = usize::from(self.cursor.pos());
        let text = CompactString::from(&self.cursor.input[start..end]);
        // The closing quote.
        self.cursor.bump();
        Ok((Str, Some(Literal::Str(text))))
    }

    fn number(
        &mut self,
        start: TextSize,
        line: u32,
    ) -> Result<(TokenKind, Option<Literal>), LexError> {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        // Fractional part, only when a digit follows the dot.
        if self.cursor.first() == '.' && self.cursor.second().is_ascii_digit() {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        // Exponent part.
        if self.cursor.first() == 'e' {
            self.cursor.bump();
            self.cursor.eat('-');
            if !self.cursor.first().is_ascii_digit() {
                return Err(LexError::EmptyExponent { line });
            }
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let text = &self.cursor.input[TextRange::new(start, self.cursor.pos())];
        BigDecimal::from_str(text)
            .map(|n| (Number, Some(Literal::Number(n))))
            .map_err(|_| LexError::InvalidNumber {
                lexeme: text.into(),
                line,
            })
    }
}
