use std::rc::Rc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{compiler::ast::Function, environment::EnvId};

pub type Class = Rc<ClassInner>;

#[derive(Debug)]
pub struct ClassInner {
    pub name: CompactString,
    pub methods: IndexMap<CompactString, Rc<Function>, FxBuildHasher>,
    /// The scope the class was declared in; methods close over it.
    pub env: EnvId,
    pub superclass: Option<Class>,
}

impl ClassInner {
    /// Finds a method on this class or the nearest superclass defining it.
    pub fn find_method(&self, name: &str) -> Option<(&ClassInner, &Rc<Function>)> {
        let mut class = Some(self);
        while let Some(current) = class {
            if let Some(method) = current.methods.get(name) {
                return Some((current, method));
            }
            class = current.superclass.as_deref();
        }
        None
    }

    /// The inheritance chain, root class first.
    pub fn lineage(&self) -> Vec<&ClassInner> {
        let mut chain = Vec::new();
        let mut class = Some(self);
        while let Some(current) = class {
            chain.push(current);
            class = current.superclass.as_deref();
        }
        chain.reverse();
        chain
    }
}

pub type Instance = Rc<InstanceInner>;

/// An instance owns a field scope; bound methods live there next to the
/// fields.
#[derive(Debug)]
pub struct InstanceInner {
    pub class: Class,
    pub fields: EnvId,
}
