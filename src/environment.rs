//! Lexical scopes.
//!
//! Every scope lives in one arena owned by the runtime and is addressed by
//! an [`EnvId`]. A closure holds the id of the scope it was defined in, so a
//! closure stored inside its own defining scope is not an ownership cycle.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use index_vec::IndexVec;
use rustc_hash::FxHashMap;

use crate::{errors::RuntimeErrorKind, objects::Object};

index_vec::define_index_type! {
    /// Handle of a scope in [`Environments`].
    pub struct EnvId = u32;
}

/// A scope: local bindings plus the handle of the enclosing scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub values: FxHashMap<CompactString, Object>,
    pub parent: Option<EnvId>,
}

/// The arena of all scopes created by one runtime.
#[derive(Debug, Clone)]
pub struct Environments {
    scopes: IndexVec<EnvId, Scope>,
    root: EnvId,
    /// Working directory, an attribute of the root scope.
    directory: Option<PathBuf>,
}

impl Environments {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope::default());
        Environments {
            scopes,
            root,
            directory: None,
        }
    }

    /// The root scope, the only one without a parent.
    pub fn root(&self) -> EnvId {
        self.root
    }

    /// Creates a new empty scope enclosed by `parent`.
    pub fn child(&mut self, parent: EnvId) -> EnvId {
        self.scopes.push(Scope {
            values: FxHashMap::default(),
            parent: Some(parent),
        })
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Inserts or overwrites a binding in `env` itself.
    pub fn define(&mut self, env: EnvId, name: impl Into<CompactString>, value: Object) {
        self.scopes[env].values.insert(name.into(), value);
    }

    /// Looks a binding up in `env` only.
    pub fn get_local(&self, env: EnvId, name: &str) -> Option<&Object> {
        self.scopes[env].values.get(name)
    }

    /// Finds the scope in the chain starting at `env` that binds `name`.
    pub fn owner(&self, env: EnvId, name: &str) -> Option<EnvId> {
        let mut current = Some(env);
        while let Some(id) = current {
            let scope = &self.scopes[id];
            if scope.values.contains_key(name) {
                return Some(id);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolves `name` through the scope chain.
    pub fn resolve(&self, env: EnvId, name: &str) -> Result<Object, RuntimeErrorKind> {
        self.owner(env, name)
            .and_then(|id| self.scopes[id].values.get(name).cloned())
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.into()))
    }

    /// Updates the nearest existing binding of `name`, or creates one in
    /// `env` when no scope in the chain binds it.
    pub fn assign(&mut self, env: EnvId, name: &str, value: Object) {
        let owner = self.owner(env, name).unwrap_or(env);
        self.define(owner, name, value);
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = Some(directory.into());
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl Default for Environments {
    fn default() -> Self {
        Environments::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: i32) -> Object {
        Object::Number(n.into())
    }

    #[test]
    fn test_resolve_through_parents() {
        let mut envs = Environments::new();
        let root = envs.root();
        envs.define(root, "a", number(1));
        let child = envs.child(root);
        let grandchild = envs.child(child);
        assert_eq!(envs.resolve(grandchild, "a"), Ok(number(1)));
        assert_eq!(
            envs.resolve(grandchild, "b"),
            Err(RuntimeErrorKind::UndefinedVariable("b".into()))
        );
    }

    #[test]
    fn test_define_shadows() {
        let mut envs = Environments::new();
        let root = envs.root();
        envs.define(root, "a", number(1));
        let child = envs.child(root);
        envs.define(child, "a", number(2));
        assert_eq!(envs.resolve(child, "a"), Ok(number(2)));
        assert_eq!(envs.resolve(root, "a"), Ok(number(1)));
    }

    #[test]
    fn test_assign_find_or_create() {
        let mut envs = Environments::new();
        let root = envs.root();
        envs.define(root, "a", number(1));
        let child = envs.child(root);

        envs.assign(child, "a", number(2));
        assert_eq!(envs.get_local(root, "a"), Some(&number(2)));
        assert_eq!(envs.get_local(child, "a"), None);

        envs.assign(child, "b", number(3));
        assert_eq!(envs.get_local(child, "b"), Some(&number(3)));
        assert_eq!(envs.get_local(root, "b"), None);
    }

    #[test]
    fn test_directory() {
        let mut envs = Environments::new();
        assert_eq!(envs.directory(), None);
        envs.set_directory("/tmp/scripts");
        assert_eq!(envs.directory(), Some(Path::new("/tmp/scripts")));
    }
}
