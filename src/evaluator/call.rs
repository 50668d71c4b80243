use std::rc::Rc;

use crate::{
    compiler::ast::{Expr, ExprKind},
    environment::EnvId,
    errors::{RuntimeError, RuntimeErrorKind},
    objects::{Closure, NativeFunction, Object},
    utils::Location,
    Context,
};

use super::{Flow, Locate};

impl Context {
    /// Evaluates the callee, then the arguments left to right, then calls.
    pub(crate) fn eval_call(
        &mut self,
        callee: &Expr,
        arguments: &[Expr],
        location: Location,
        env: EnvId,
    ) -> Result<Object, RuntimeError> {
        let function = match &callee.kind {
            ExprKind::Property { receiver, property } => {
                let receiver = self.eval_expr(receiver, env)?;
                if let Object::LibraryModule(module) = &receiver {
                    let Some(native) = module.get(property).copied() else {
                        return Err(RuntimeError::new(
                            RuntimeErrorKind::UnknownProperty {
                                receiver: module.name.clone(),
                                property: property.clone(),
                            },
                            callee.location,
                        ));
                    };
                    let args = self.eval_expressions(arguments, env)?;
                    return self.call_native(native, args, location);
                }
                self.get_property(receiver, property, callee.location)?
            }
            _ => self.eval_expr(callee, env)?,
        };
        let args = self.eval_expressions(arguments, env)?;
        self.call_object(function, args, location)
    }

    /// Calls a closure, a native function, or a class.
    pub fn call_object(
        &mut self,
        function: Object,
        args: Vec<Object>,
        location: Location,
    ) -> Result<Object, RuntimeError> {
        match function {
            Object::Closure(closure) => self.call_closure(&closure, args, location),
            Object::Native(native) => self.call_native(native, args, location),
            Object::Class(class) => self.instantiate(class, args, location),
            other => Err(RuntimeError::new(
                RuntimeErrorKind::NotCallable(other.object_type()),
                location,
            )),
        }
    }

    pub(crate) fn call_native(
        &mut self,
        native: NativeFunction,
        args: Vec<Object>,
        location: Location,
    ) -> Result<Object, RuntimeError> {
        log::trace!("call native {} with {} arguments", native.name, args.len());
        native.call(self, args).at(location)
    }

    /// Runs the body in a new scope enclosed by the closure's defining scope.
    /// Parameters without an argument take their default, evaluated now in
    /// the new scope.
    pub(crate) fn call_closure(
        &mut self,
        closure: &Closure,
        args: Vec<Object>,
        location: Location,
    ) -> Result<Object, RuntimeError> {
        let function = Rc::clone(&closure.function);
        log::trace!("call {} with {} arguments", closure.name(), args.len());
        if args.len() > function.params.len() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::TooManyArguments {
                    expected: function.params.len(),
                    given: args.len(),
                },
                location,
            ));
        }

        let call_env = self.envs.child(closure.env);
        let mut args = args.into_iter();
        for param in &function.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default, call_env)?,
                (None, None) => {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::MissingArgument(param.name.clone()),
                        location,
                    ))
                }
            };
            self.envs.define(call_env, param.name.clone(), value);
        }

        match self.eval_block(&function.body, call_env)? {
            Flow::Return(value) => Ok(value),
            Flow::Next(_) => Ok(Object::Null),
        }
    }
}
