//! The tree-walking evaluator.
//!
//! Expressions evaluate to `Result<Object, RuntimeError>` and statements to
//! `Result<Flow, RuntimeError>`; every step stops at the first error with
//! `?`. A `return` unwinds as [`Flow::Return`], never as an error.

mod call;
mod class;
mod infix;
mod prefix;
mod property;
mod statement;

use std::rc::Rc;

use crate::{
    compiler::ast::{Block, Expr, ExprKind, Program},
    environment::EnvId,
    errors::{RuntimeError, RuntimeErrorKind},
    objects::{ClosureInner, MapInner, Object},
    utils::Location,
    Context,
};

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Go on with the next statement; carries the statement's value.
    Next(Object),
    /// A `return` is unwinding to the enclosing call.
    Return(Object),
}

pub(crate) trait Locate<T> {
    fn at(self, location: Location) -> Result<T, RuntimeError>;
}

impl<T> Locate<T> for Result<T, RuntimeErrorKind> {
    fn at(self, location: Location) -> Result<T, RuntimeError> {
        self.map_err(|kind| RuntimeError::new(kind, location))
    }
}

impl Context {
    /// Evaluates a program in `env`. The value is the value of the last
    /// statement, or the value of a top-level `return`.
    pub fn evaluate(&mut self, program: &Program, env: EnvId) -> Result<Object, RuntimeError> {
        let mut result = Object::Null;
        for stmt in &program.statements {
            match self.eval_stmt(stmt, env)? {
                Flow::Next(value) => result = value,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(result)
    }

    /// Blocks share the scope they appear in.
    pub(crate) fn eval_block(&mut self, block: &Block, env: EnvId) -> Result<Flow, RuntimeError> {
        let mut result = Object::Null;
        for stmt in &block.statements {
            match self.eval_stmt(stmt, env)? {
                Flow::Next(value) => result = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Next(result))
    }

    pub fn eval_expr(&mut self, expr: &Expr, env: EnvId) -> Result<Object, RuntimeError> {
        match &expr.kind {
            ExprKind::Ident(name) => self.envs.resolve(env, name).at(expr.location),
            ExprKind::Number(n) => Ok(Object::Number(n.clone())),
            ExprKind::Str(s) => Ok(Object::String(s.clone())),
            ExprKind::Bool(b) => Ok(Object::Boolean(*b)),
            ExprKind::Null => Ok(Object::Null),
            ExprKind::This => self.envs.resolve(env, "this").at(expr.location),
            ExprKind::List(items) => Ok(Object::from(self.eval_expressions(items, env)?)),
            ExprKind::Map(pairs) => {
                let mut map = MapInner::new();
                for (key, value) in pairs {
                    let k = self.eval_expr(key, env)?;
                    let v = self.eval_expr(value, env)?;
                    map.insert(k, v).at(key.location)?;
                }
                Ok(Object::Map(Rc::new(map)))
            }
            ExprKind::Function(function) => Ok(Object::Closure(Rc::new(ClosureInner::new(
                Rc::clone(function),
                env,
            )))),
            ExprKind::Call { callee, arguments } => {
                self.eval_call(callee, arguments, expr.location, env)
            }
            ExprKind::Property { receiver, property } => {
                let receiver = self.eval_expr(receiver, env)?;
                self.get_property(receiver, property, expr.location)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval_expr(receiver, env)?;
                let index = self.eval_expr(index, env)?;
                property::index(&receiver, &index).at(expr.location)
            }
            ExprKind::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                infix::infix(*operator, left, right).at(expr.location)
            }
            ExprKind::Prefix { operator, right } => {
                let right = self.eval_expr(right, env)?;
                prefix::prefix(*operator, right).at(expr.location)
            }
        }
    }

    /// Evaluates expressions left to right.
    pub(crate) fn eval_expressions(
        &mut self,
        exprs: &[Expr],
        env: EnvId,
    ) -> Result<Vec<Object>, RuntimeError> {
        exprs.iter().map(|expr| self.eval_expr(expr, env)).collect()
    }
}
