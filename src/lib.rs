//! Ghost Language Interpreter.
//!
//! ```txt
//!        +-------+             +--------+          +-----------+
//! str -> | lexer | - Tokens -> | parser | - AST -> | evaluator | -> Object
//!        +-------+             +--------+          +-----------+
//!                                                        |
//!                                                  +--------------+
//!                                                  | environments |
//!                                                  +--------------+
//! ```
//!
//! # Examples
//!
//! ```rust
//! use ghost_lang::Ghost;
//! let input = r#"
//! function add(a, b = 2) {
//!     return a + b
//! }
//! add(1)
//! "#;
//! let mut ghost = Ghost::new();
//! let value = ghost.run(input).unwrap();
//! assert_eq!(value.to_string(), "3");
//! ```

// Pedantic warnings
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines, clippy::must_use_candidate)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod compiler;
pub mod context;
pub mod environment;
pub mod errors;
pub mod evaluator;
pub mod libs;
pub mod objects;
pub mod utils;

pub use context::*;
