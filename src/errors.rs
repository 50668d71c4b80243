//! The runtime errors.

use compact_str::CompactString;
use thiserror::Error;

use crate::{
    compiler::error::{LexError, ParseError},
    objects::ObjectType,
    utils::{Join, Location},
};

/// Enum representing any ghost error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GhostError {
    #[error("lexical error: {}", .0.iter().join("; "))]
    Lexical(Vec<LexError>),
    #[error("syntax error: {}", .0.iter().join("; "))]
    Syntax(Vec<ParseError>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// An error raised while evaluating, with the location of the node that
/// raised it and the name of the source file when one was given.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "{location}{}: runtime error: {kind}",
    .file.as_ref().map(|file| format!(":{file}")).unwrap_or_default()
)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub location: Location,
    pub file: Option<CompactString>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, location: Location) -> Self {
        RuntimeError {
            kind,
            location,
            file: None,
        }
    }

    /// Names the source file the error was raised in.
    pub fn in_file(mut self, file: Option<&str>) -> Self {
        self.file = file.map(CompactString::from);
        self
    }
}

/// Kind of RuntimeError.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: &'static str,
        right: ObjectType,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownOperator {
        left: ObjectType,
        operator: &'static str,
        right: ObjectType,
    },
    #[error("type mismatch: {operator}{right}")]
    PrefixTypeMismatch {
        operator: &'static str,
        right: ObjectType,
    },
    #[error("undefined variable: {0}")]
    UndefinedVariable(CompactString),
    #[error("unknown property: {receiver}.{property}")]
    UnknownProperty {
        receiver: CompactString,
        property: CompactString,
    },
    #[error("property access not supported: {0}")]
    PropertyNotSupported(ObjectType),
    #[error("property assignment not supported: {0}")]
    PropertyAssignNotSupported(ObjectType),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    #[error("invalid index: {receiver}[{index}]")]
    InvalidIndex {
        receiver: ObjectType,
        index: ObjectType,
    },
    #[error("unusable as map key: {0}")]
    UnusableMapKey(ObjectType),
    #[error("range bounds must be integers")]
    InvalidRange,
    #[error("range is longer than {0} elements")]
    RangeTooLarge(u64),
    #[error("not a function: {0}")]
    NotCallable(ObjectType),
    #[error("missing argument: {0}")]
    MissingArgument(CompactString),
    #[error("too many arguments: expected {expected}, got {given}")]
    TooManyArguments { expected: usize, given: usize },
    #[error("invalid argument to {function}: expected {expected}, got {found}")]
    InvalidArgument {
        function: &'static str,
        expected: ObjectType,
        found: ObjectType,
    },
    #[error("class {0} has no constructor and takes no arguments")]
    NoConstructor(CompactString),
    #[error("superclass must be a class, got {0}")]
    InvalidSuperclass(ObjectType),
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("io error: {0}")]
    Io(CompactString),
}

impl From<std::io::Error> for RuntimeErrorKind {
    fn from(value: std::io::Error) -> Self {
        RuntimeErrorKind::Io(value.to_string().into())
    }
}

/// Checks the argument count of a native function. Missing arguments are
/// reported by position since natives have no parameter names.
pub(crate) fn check_arguments(
    args: &[crate::objects::Object],
    required: usize,
) -> Result<(), RuntimeErrorKind> {
    match args.len() {
        n if n < required => Err(RuntimeErrorKind::MissingArgument(
            compact_str::format_compact!("#{}", n + 1),
        )),
        n if n > required => Err(RuntimeErrorKind::TooManyArguments {
            expected: required,
            given: n,
        }),
        _ => Ok(()),
    }
}
