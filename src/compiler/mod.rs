//! The Ghost front end: scanning and parsing.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

/// Scans and parses `input`, returning the program with every diagnostic.
pub fn parse(input: &str) -> (ast::Program, Vec<error::LexError>, Vec<error::ParseError>) {
    let (tokens, lex_errors) = lexer::tokenize(input);
    let (program, parse_errors) = parser::parse(tokens);
    (program, lex_errors, parse_errors)
}
