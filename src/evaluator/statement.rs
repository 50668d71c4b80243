use std::rc::Rc;

use crate::{
    compiler::ast::{Stmt, StmtKind},
    environment::EnvId,
    errors::{RuntimeError, RuntimeErrorKind},
    objects::{ClosureInner, Object},
    Context,
};

use super::Flow;

impl Context {
    pub(crate) fn eval_stmt(&mut self, stmt: &Stmt, env: EnvId) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            StmtKind::Expression(expr) => Ok(Flow::Next(self.eval_expr(expr, env)?)),
            StmtKind::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                self.envs.assign(env, name, value);
                Ok(Flow::Next(Object::Null))
            }
            StmtKind::PropertyAssign {
                receiver,
                property,
                value,
            } => {
                let receiver = self.eval_expr(receiver, env)?;
                let value = self.eval_expr(value, env)?;
                match receiver {
                    Object::Instance(instance) => {
                        self.envs.define(instance.fields, property.clone(), value);
                        Ok(Flow::Next(Object::Null))
                    }
                    receiver => Err(RuntimeError::new(
                        RuntimeErrorKind::PropertyAssignNotSupported(receiver.object_type()),
                        stmt.location,
                    )),
                }
            }
            StmtKind::Function(function) => {
                let closure = Object::Closure(Rc::new(ClosureInner::new(Rc::clone(function), env)));
                if let Some(name) = &function.name {
                    self.envs.define(env, name.clone(), closure);
                }
                Ok(Flow::Next(Object::Null))
            }
            StmtKind::Class(class) => {
                let object = self.eval_class(class, env)?;
                self.envs.define(env, class.name.clone(), object);
                Ok(Flow::Next(Object::Null))
            }
            StmtKind::If {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Flow::Next(Object::Null))
                }
            }
            StmtKind::While { condition, body } => {
                while self.eval_expr(condition, env)?.is_truthy() {
                    if let flow @ Flow::Return(_) = self.eval_block(body, env)? {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Next(Object::Null))
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval_expr(value, env)?,
                    None => Object::Null,
                };
                Ok(Flow::Return(value))
            }
        }
    }
}
