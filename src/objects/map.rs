use std::{fmt, rc::Rc};

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{errors::RuntimeErrorKind, objects::Object};

pub type Map = Rc<MapInner>;

/// The hashable identity of an object used as a map key. Objects of
/// different types never share a key, and equal numbers share one key
/// however they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Number(CompactString),
    String(CompactString),
    Boolean(bool),
    Null,
}

/// Map entries in insertion order. The key object as written is kept next to
/// the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapInner {
    pub pairs: IndexMap<MapKey, (Object, Object), FxBuildHasher>,
}

impl MapInner {
    pub fn new() -> Self {
        MapInner::default()
    }

    pub fn get(&self, key: &Object) -> Result<Option<&Object>, RuntimeErrorKind> {
        Ok(self.pairs.get(&key.map_key()?).map(|(_, value)| value))
    }

    /// Looks up a string key, as used by property access.
    pub fn get_str(&self, key: &str) -> Option<&Object> {
        self.pairs
            .get(&MapKey::String(key.into()))
            .map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: Object, value: Object) -> Result<(), RuntimeErrorKind> {
        self.pairs.insert(key.map_key()?, (key, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for MapInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.pairs.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
