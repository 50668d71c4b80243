use std::rc::Rc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::objects::{NativeFn, NativeFunction};

pub type LibraryModule = Rc<LibraryModuleInner>;

/// A read-only table of native functions exposed under one name.
#[derive(Debug)]
pub struct LibraryModuleInner {
    pub name: CompactString,
    pub methods: IndexMap<CompactString, NativeFunction, FxBuildHasher>,
}

impl LibraryModuleInner {
    pub fn new(name: impl Into<CompactString>) -> Self {
        LibraryModuleInner {
            name: name.into(),
            methods: IndexMap::with_hasher(FxBuildHasher),
        }
    }

    /// Adds a method, builder style.
    pub fn with(mut self, name: &'static str, function: NativeFn) -> Self {
        self.methods
            .insert(name.into(), NativeFunction::new(name, function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.methods.get(name)
    }
}
