//! The parser.
//!
//! Expressions are parsed by precedence climbing: every token kind that can
//! start an expression has one prefix parse function, every token kind that
//! can continue one has an infix parse function and a precedence. Syntax
//! errors are recorded and parsing continues with the next statement, so a
//! single pass reports every independent error.

use std::{rc::Rc, str::FromStr};

use bigdecimal::BigDecimal;
use compact_str::CompactString;

use super::{
    ast::*,
    error::ParseError,
    token::{Literal, Token, TokenKind},
};

/// Binding power of operators, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Or,
    And,
    Range,
    Equals,
    LessGreater,
    Sum,
    Product,
    Modulo,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::DotDot => Precedence::Range,
            TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equals,
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Star | TokenKind::Slash => Precedence::Product,
            TokenKind::Percent => Precedence::Modulo,
            TokenKind::LeftParen => Precedence::Call,
            TokenKind::LeftBracket | TokenKind::Dot => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expr>;
type InfixParseFn = fn(&mut Parser, Expr) -> Option<Expr>;

fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn> {
    let f: PrefixParseFn = match kind {
        TokenKind::Ident => Parser::parse_identifier,
        TokenKind::Number => Parser::parse_number,
        TokenKind::Str => Parser::parse_string,
        TokenKind::True | TokenKind::False => Parser::parse_boolean,
        TokenKind::Null => Parser::parse_null,
        TokenKind::This => Parser::parse_this,
        TokenKind::Bang | TokenKind::Minus => Parser::parse_prefix,
        TokenKind::LeftParen => Parser::parse_group,
        TokenKind::LeftBracket => Parser::parse_list,
        TokenKind::LeftBrace => Parser::parse_map,
        TokenKind::Function => Parser::parse_function_literal,
        _ => return None,
    };
    Some(f)
}

fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn> {
    let f: InfixParseFn = match kind {
        TokenKind::Or
        | TokenKind::And
        | TokenKind::DotDot
        | TokenKind::EqualEqual
        | TokenKind::BangEqual
        | TokenKind::Less
        | TokenKind::LessEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => Parser::parse_infix,
        TokenKind::LeftParen => Parser::parse_call,
        TokenKind::LeftBracket => Parser::parse_index,
        TokenKind::Dot => Parser::parse_property,
        _ => return None,
    };
    Some(f)
}

fn infix_operator(kind: TokenKind) -> Option<InfixOp> {
    Some(match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Star => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Percent => InfixOp::Mod,
        TokenKind::EqualEqual => InfixOp::Eq,
        TokenKind::BangEqual => InfixOp::Ne,
        TokenKind::Less => InfixOp::Lt,
        TokenKind::LessEqual => InfixOp::Le,
        TokenKind::Greater => InfixOp::Gt,
        TokenKind::GreaterEqual => InfixOp::Ge,
        TokenKind::And => InfixOp::And,
        TokenKind::Or => InfixOp::Or,
        TokenKind::DotDot => InfixOp::Range,
        _ => return None,
    })
}

/// Parse the token stream into a program, returning the diagnostics with it.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    (program, parser.errors)
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Constructs a new `Parser`. A trailing `Eof` token is added when the
    /// stream does not end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let eof = match tokens.last() {
                Some(last) => Token {
                    kind: TokenKind::Eof,
                    lexeme: CompactString::default(),
                    literal: None,
                    location: last.location,
                    range: last.range,
                    file: last.file.clone(),
                },
                None => Token {
                    kind: TokenKind::Eof,
                    lexeme: CompactString::default(),
                    literal: None,
                    location: crate::utils::Location::new(1, 1),
                    range: text_size::TextRange::default(),
                    file: None,
                },
            };
            tokens.push(eof);
        }
        Parser {
            tokens,
            position: 0,
            errors: Vec::new(),
        }
    }

    /// The diagnostics recorded so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses the whole token stream. Statements that fail to parse are
    /// left out of the program and reported through [`Parser::errors`].
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => {
                    statements.push(stmt);
                    self.advance();
                }
                None => {
                    self.synchronize();
                    // A stray closing brace ends nothing at the top level.
                    if self.current_is(TokenKind::RightBrace) {
                        self.advance();
                    }
                }
            }
        }
        Program { statements }
    }

    /// Skips the rest of a statement that failed to parse. Stops at the
    /// first token on a later line, after a `;`, or at a `}` or `Eof`.
    fn synchronize(&mut self) {
        let line = self.current().line();
        loop {
            match self.current().kind {
                TokenKind::Eof | TokenKind::RightBrace => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                _ if self.current().line() > line => return,
                _ => self.advance(),
            }
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn next(&self) -> &Token {
        &self.tokens[(self.position + 1).min(self.tokens.len() - 1)]
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn next_is(&self, kind: TokenKind) -> bool {
        self.next().kind == kind
    }

    /// Moves to the next token. Never moves past `Eof`.
    fn advance(&mut self) {
        if !self.current_is(TokenKind::Eof) {
            self.position += 1;
        }
    }

    /// Advances if the next token is `kind`, otherwise records an error.
    fn expect_next(&mut self, kind: TokenKind) -> Option<()> {
        if self.next_is(kind) {
            self.advance();
            Some(())
        } else {
            self.next_error(kind);
            None
        }
    }

    fn next_error(&mut self, expected: TokenKind) {
        self.errors.push(ParseError::UnexpectedToken {
            expected,
            found: self.next().kind,
            line: self.current().line(),
        });
    }

    fn next_precedence(&self) -> Precedence {
        Precedence::of(self.next().kind)
    }

    fn expr(&self, kind: ExprKind) -> Expr {
        Expr {
            kind,
            location: self.current().location,
        }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current().kind {
            TokenKind::Semicolon => None,
            TokenKind::Class => self.parse_class_statement(),
            TokenKind::Function if self.next_is(TokenKind::Ident) => {
                self.parse_function_statement()
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        let expr = self.parse_expression(Precedence::Lowest)?;
        let kind = if self.next().kind.is_assign() {
            self.advance();
            let line = self.current().line();
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            match expr.kind {
                ExprKind::Ident(name) => StmtKind::Assign { name, value },
                ExprKind::Property { receiver, property } => StmtKind::PropertyAssign {
                    receiver: *receiver,
                    property,
                    value,
                },
                _ => {
                    self.errors.push(ParseError::InvalidAssignTarget { line });
                    return None;
                }
            }
        } else {
            StmtKind::Expression(expr)
        };
        if self.next_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Stmt { kind, location })
    }

    fn parse_function_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        let function = self.parse_function()?;
        Some(Stmt {
            kind: StmtKind::Function(function),
            location,
        })
    }

    fn parse_class_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        self.expect_next(TokenKind::Ident)?;
        let name = self.current().lexeme.clone();
        let superclass = if self.next_is(TokenKind::Ident) && self.next().lexeme == "extends" {
            self.advance();
            self.expect_next(TokenKind::Ident)?;
            Some(self.expr(ExprKind::Ident(self.current().lexeme.clone())))
        } else {
            None
        };
        self.expect_next(TokenKind::LeftBrace)?;
        self.advance();
        let mut methods = Vec::new();
        while !self.current_is(TokenKind::RightBrace) {
            match self.current().kind {
                TokenKind::Eof => {
                    self.errors.push(ParseError::UnexpectedToken {
                        expected: TokenKind::RightBrace,
                        found: TokenKind::Eof,
                        line: self.current().line(),
                    });
                    break;
                }
                TokenKind::Semicolon => (),
                TokenKind::Function if self.next_is(TokenKind::Ident) => {
                    if let Some(method) = self.parse_function() {
                        methods.push(method);
                    }
                }
                found => self.errors.push(ParseError::UnexpectedToken {
                    expected: TokenKind::Function,
                    found,
                    line: self.current().line(),
                }),
            }
            self.advance();
        }
        Some(Stmt {
            kind: StmtKind::Class(Rc::new(Class {
                name,
                superclass,
                methods,
                location,
            })),
            location,
        })
    }

    fn parse_if_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_next(TokenKind::LeftBrace)?;
        let consequence = self.parse_block();
        let alternative = if self.next_is(TokenKind::Else) {
            self.advance();
            if self.next_is(TokenKind::If) {
                self.advance();
                let nested = self.parse_if_statement()?;
                Some(Block {
                    statements: vec![nested],
                })
            } else {
                self.expect_next(TokenKind::LeftBrace)?;
                Some(self.parse_block())
            }
        } else {
            None
        };
        Some(Stmt {
            kind: StmtKind::If {
                condition,
                consequence,
                alternative,
            },
            location,
        })
    }

    fn parse_while_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_next(TokenKind::LeftBrace)?;
        let body = self.parse_block();
        Some(Stmt {
            kind: StmtKind::While { condition, body },
            location,
        })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        let location = self.current().location;
        let value = match self.next().kind {
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof => None,
            _ => {
                self.advance();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };
        if self.next_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Stmt {
            kind: StmtKind::Return(value),
            location,
        })
    }

    /// Parses statements up to the closing brace. The current token must be
    /// the opening brace; on return it is the closing one.
    fn parse_block(&mut self) -> Block {
        let mut statements = Vec::new();
        self.advance();
        while !self.current_is(TokenKind::RightBrace) {
            if self.current_is(TokenKind::Eof) {
                self.errors.push(ParseError::UnexpectedToken {
                    expected: TokenKind::RightBrace,
                    found: TokenKind::Eof,
                    line: self.current().line(),
                });
                break;
            }
            match self.parse_statement() {
                Some(stmt) => {
                    statements.push(stmt);
                    self.advance();
                }
                None => self.synchronize(),
            }
        }
        Block { statements }
    }

    pub fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let Some(prefix) = prefix_parse_fn(self.current().kind) else {
            self.errors.push(ParseError::NoPrefixParseFn {
                found: self.current().kind,
                line: self.current().line(),
            });
            return None;
        };
        let mut left = prefix(self)?;
        while !self.next_is(TokenKind::Semicolon) && precedence < self.next_precedence() {
            let Some(infix) = infix_parse_fn(self.next().kind) else {
                return Some(left);
            };
            self.advance();
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expr> {
        Some(self.expr(ExprKind::Ident(self.current().lexeme.clone())))
    }

    fn parse_number(&mut self) -> Option<Expr> {
        let token = self.current();
        let number = match &token.literal {
            Some(Literal::Number(n)) => Some(n.clone()),
            _ => BigDecimal::from_str(&token.lexeme).ok(),
        };
        match number {
            Some(n) => Some(self.expr(ExprKind::Number(n))),
            None => {
                let error = ParseError::InvalidNumber {
                    lexeme: self.current().lexeme.clone(),
                    line: self.current().line(),
                };
                self.errors.push(error);
                None
            }
        }
    }

    fn parse_string(&mut self) -> Option<Expr> {
        let token = self.current();
        let text = match &token.literal {
            Some(Literal::Str(s)) => s.clone(),
            _ => CompactString::from(token.lexeme.trim_matches('"')),
        };
        Some(self.expr(ExprKind::Str(text)))
    }

    fn parse_boolean(&mut self) -> Option<Expr> {
        Some(self.expr(ExprKind::Bool(self.current_is(TokenKind::True))))
    }

    fn parse_null(&mut self) -> Option<Expr> {
        Some(self.expr(ExprKind::Null))
    }

    fn parse_this(&mut self) -> Option<Expr> {
        Some(self.expr(ExprKind::This))
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let location = self.current().location;
        let operator = if self.current_is(TokenKind::Bang) {
            PrefixOp::Not
        } else {
            PrefixOp::Neg
        };
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr {
            kind: ExprKind::Prefix {
                operator,
                right: Box::new(right),
            },
            location,
        })
    }

    fn parse_group(&mut self) -> Option<Expr> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_next(TokenKind::RightParen)?;
        Some(expr)
    }

    fn parse_list(&mut self) -> Option<Expr> {
        let location = self.current().location;
        let items = self.parse_expression_list(TokenKind::RightBracket)?;
        Some(Expr {
            kind: ExprKind::List(items),
            location,
        })
    }

    fn parse_map(&mut self) -> Option<Expr> {
        let location = self.current().location;
        let mut pairs = Vec::new();
        while !self.next_is(TokenKind::RightBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_next(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.next_is(TokenKind::RightBrace) {
                self.expect_next(TokenKind::Comma)?;
            }
        }
        self.expect_next(TokenKind::RightBrace)?;
        Some(Expr {
            kind: ExprKind::Map(pairs),
            location,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        let location = self.current().location;
        let function = self.parse_function()?;
        Some(Expr {
            kind: ExprKind::Function(function),
            location,
        })
    }

    /// Parses `function [name](params) { body }` starting at the keyword.
    fn parse_function(&mut self) -> Option<Rc<Function>> {
        let location = self.current().location;
        let name = if self.next_is(TokenKind::Ident) {
            self.advance();
            Some(self.current().lexeme.clone())
        } else {
            None
        };
        self.expect_next(TokenKind::LeftParen)?;
        let params = self.parse_params()?;
        self.expect_next(TokenKind::LeftBrace)?;
        let body = self.parse_block();
        Some(Rc::new(Function {
            name,
            params,
            body,
            location,
        }))
    }

    fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        if self.next_is(TokenKind::RightParen) {
            self.advance();
            return Some(params);
        }
        loop {
            self.expect_next(TokenKind::Ident)?;
            let name = self.current().lexeme.clone();
            let default = if self.next_is(TokenKind::Equal) {
                self.advance();
                self.advance();
                Some(self.parse_expression(Precedence::Lowest)?)
            } else {
                None
            };
            params.push(Param { name, default });
            if !self.next_is(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect_next(TokenKind::RightParen)?;
        Some(params)
    }

    /// Parses comma separated expressions up to `end`; the current token is
    /// the opening delimiter. A trailing comma is allowed.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();
        if self.next_is(end) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.next_is(TokenKind::Comma) {
            self.advance();
            if self.next_is(end) {
                break;
            }
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_next(end)?;
        Some(list)
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let location = self.current().location;
        let kind = self.current().kind;
        let operator = infix_operator(kind)?;
        let precedence = Precedence::of(kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expr {
            kind: ExprKind::Infix {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            location,
        })
    }

    fn parse_call(&mut self, callee: Expr) -> Option<Expr> {
        let location = self.current().location;
        let arguments = self.parse_expression_list(TokenKind::RightParen)?;
        Some(Expr {
            kind: ExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            location,
        })
    }

    fn parse_index(&mut self, receiver: Expr) -> Option<Expr> {
        let location = self.current().location;
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_next(TokenKind::RightBracket)?;
        Some(Expr {
            kind: ExprKind::Index {
                receiver: Box::new(receiver),
                index: Box::new(index),
            },
            location,
        })
    }

    fn parse_property(&mut self, receiver: Expr) -> Option<Expr> {
        let location = self.current().location;
        self.expect_next(TokenKind::Ident)?;
        Some(Expr {
            kind: ExprKind::Property {
                receiver: Box::new(receiver),
                property: self.current().lexeme.clone(),
            },
            location,
        })
    }
}
