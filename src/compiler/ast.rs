//! The Ghost Abstract Syntax Tree (AST).
//!
//! Function bodies are shared behind `Rc` so closures can keep them alive
//! after the program that defined them has been dropped.

use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use compact_str::CompactString;

use crate::utils::{Join, Location};

/// The root AST node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statements.iter().join("\n"))
    }
}

/// A braced sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{ {} }}", self.statements.iter().join("; "))
        }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Location,
}

/// Kind of statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    /// `name := value`
    Assign {
        name: CompactString,
        value: Expr,
    },
    /// `receiver.property = value`
    PropertyAssign {
        receiver: Expr,
        property: CompactString,
        value: Expr,
    },
    /// A named function declaration.
    Function(Rc<Function>),
    Class(Rc<Class>),
    If {
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Return(Option<Expr>),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expression(expr) => write!(f, "{expr}"),
            StmtKind::Assign { name, value } => write!(f, "{name} := {value}"),
            StmtKind::PropertyAssign {
                receiver,
                property,
                value,
            } => write!(f, "{receiver}.{property} = {value}"),
            StmtKind::Function(function) => write!(f, "{function}"),
            StmtKind::Class(class) => write!(f, "{class}"),
            StmtKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => write!(f, "while {condition} {body}"),
            StmtKind::Return(Some(value)) => write!(f, "return {value}"),
            StmtKind::Return(None) => write!(f, "return"),
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

/// Kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Ident(CompactString),
    Number(BigDecimal),
    Str(CompactString),
    Bool(bool),
    Null,
    This,
    List(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    Function(Rc<Function>),
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Property {
        receiver: Box<Expr>,
        property: CompactString,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        operator: InfixOp,
        right: Box<Expr>,
    },
    Prefix {
        operator: PrefixOp,
        right: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Number(n) => write!(f, "{n}"),
            ExprKind::Str(s) => write!(f, "\"{s}\""),
            ExprKind::Bool(b) => write!(f, "{b}"),
            ExprKind::Null => write!(f, "null"),
            ExprKind::This => write!(f, "this"),
            ExprKind::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            ExprKind::Map(pairs) => write!(
                f,
                "{{{}}}",
                pairs
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .join(", ")
            ),
            ExprKind::Function(function) => write!(f, "{function}"),
            ExprKind::Call { callee, arguments } => {
                write!(f, "{callee}({})", arguments.iter().join(", "))
            }
            ExprKind::Property { receiver, property } => write!(f, "{receiver}.{property}"),
            ExprKind::Index { receiver, index } => write!(f, "({receiver}[{index}])"),
            ExprKind::Infix {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
            ExprKind::Prefix { operator, right } => write!(f, "({operator}{right})"),
        }
    }
}

/// A function literal or declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<CompactString>,
    pub params: Vec<Param>,
    pub body: Block,
    pub location: Location,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        write!(f, "({}) {}", self.params.iter().join(", "), self.body)
    }
}

/// A function parameter with its optional default expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: CompactString,
    pub default: Option<Expr>,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{} = {default}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: CompactString,
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<Function>>,
    pub location: Location,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.name)?;
        if let Some(superclass) = &self.superclass {
            write!(f, " extends {superclass}")?;
        }
        write!(f, " {{ {} }}", self.methods.iter().join("; "))
    }
}

/// Prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// The `!` operator for logical inversion
    Not,
    /// The `-` operator for negation
    Neg,
}

impl PrefixOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Not => "!",
            PrefixOp::Neg => "-",
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    /// The `+` operator (addition)
    Add,
    /// The `-` operator (subtraction)
    Sub,
    /// The `*` operator (multiplication)
    Mul,
    /// The `/` operator (division)
    Div,
    /// The `%` operator (modulo)
    Mod,
    /// The `==` operator (equality)
    Eq,
    /// The `!=` operator (not equal to)
    Ne,
    /// The `<` operator (less than)
    Lt,
    /// The `<=` operator (less than or equal to)
    Le,
    /// The `>` operator (greater than)
    Gt,
    /// The `>=` operator (greater than or equal to)
    Ge,
    /// The `and` operator (logical and)
    And,
    /// The `or` operator (logical or)
    Or,
    /// The `..` operator (inclusive range)
    Range,
}

impl InfixOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Mod => "%",
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
            InfixOp::Lt => "<",
            InfixOp::Le => "<=",
            InfixOp::Gt => ">",
            InfixOp::Ge => ">=",
            InfixOp::And => "and",
            InfixOp::Or => "or",
            InfixOp::Range => "..",
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
