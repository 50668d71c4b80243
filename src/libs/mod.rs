//! The Ghost Standard Library.

mod builtin;
mod ghost;
mod math;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{
    environment::{EnvId, Environments},
    objects::{LibraryModule, NativeFunction, Object},
};

pub use builtin::load_builtin;
pub use ghost::ghost_lib;
pub use math::math_lib;

/// Names the host provides to every script. Filled once when the runtime
/// is built, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    globals: IndexMap<CompactString, Object, FxBuildHasher>,
}

impl Registry {
    /// A registry holding the builtins and the standard modules.
    pub fn new() -> Self {
        let mut registry = Registry::default();
        load_builtin(&mut registry);
        registry.register_module(math_lib());
        registry.register_module(ghost_lib());
        registry
    }

    pub fn register_function(&mut self, function: NativeFunction) {
        self.globals
            .insert(function.name.into(), Object::Native(function));
    }

    pub fn register_module(&mut self, module: LibraryModule) {
        self.globals
            .insert(module.name.clone(), Object::LibraryModule(module));
    }

    /// Binds every registered name in `env`.
    pub fn bind(&self, envs: &mut Environments, env: EnvId) {
        for (name, object) in &self.globals {
            envs.define(env, name.clone(), object.clone());
        }
    }
}
