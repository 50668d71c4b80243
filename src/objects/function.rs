use std::{fmt, rc::Rc};

use crate::{
    compiler::ast::Function, environment::EnvId, errors::RuntimeErrorKind, objects::Object,
    Context,
};

pub type Closure = Rc<ClosureInner>;

/// A function together with the scope it was defined in.
#[derive(Debug)]
pub struct ClosureInner {
    pub function: Rc<Function>,
    pub env: EnvId,
}

impl ClosureInner {
    pub fn new(function: Rc<Function>, env: EnvId) -> Self {
        ClosureInner { function, env }
    }

    pub fn name(&self) -> &str {
        self.function.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// The signature of every function the host provides.
pub type NativeFn = fn(&mut Context, Vec<Object>) -> Result<Object, RuntimeErrorKind>;

/// A named host function.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub function: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, function: NativeFn) -> Self {
        NativeFunction { name, function }
    }

    pub fn call(&self, ctx: &mut Context, args: Vec<Object>) -> Result<Object, RuntimeErrorKind> {
        (self.function)(ctx, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native {}>", self.name)
    }
}
