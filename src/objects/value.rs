use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use compact_str::CompactString;

use crate::{
    errors::RuntimeErrorKind,
    objects::{Class, Closure, Instance, LibraryModule, Map, MapKey, NativeFunction},
    utils::{impl_enum_from, Join},
};

/// An immutable list of objects.
pub type List = Rc<Vec<Object>>;

/// Enum of all ghost objects.
#[derive(Debug, Clone, Default)]
pub enum Object {
    /// `NUMBER` - An arbitrary-precision decimal.
    Number(BigDecimal),
    /// `STRING` - A UTF-8 string.
    String(CompactString),
    /// `BOOLEAN` - A `true` / `false` value.
    Boolean(bool),
    /// `NULL` - A null value.
    #[default]
    Null,
    /// `LIST` - An ordered list.
    List(List),
    /// `MAP` - An insertion-ordered map.
    Map(Map),
    /// `FUNCTION` - A user-defined function.
    Closure(Closure),
    /// `FUNCTION` - A function provided by the host.
    Native(NativeFunction),
    /// `CLASS` - A class.
    Class(Class),
    /// `INSTANCE` - An instance of a class.
    Instance(Instance),
    /// `LIBRARY_MODULE` - A named table of native functions.
    LibraryModule(LibraryModule),
}

impl_enum_from!(Object, {
    Number(BigDecimal),
    String(CompactString),
    Boolean(bool),
    List(List),
    Map(Map),
    Closure(Closure),
    Native(NativeFunction),
    Class(Class),
    Instance(Instance),
    LibraryModule(LibraryModule),
});

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(value.into())
    }
}

impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Object::List(Rc::new(value))
    }
}

impl Object {
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Object::Number(_) => ObjectType::Number,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::List(_) => ObjectType::List,
            Object::Map(_) => ObjectType::Map,
            Object::Closure(_) | Object::Native(_) => ObjectType::Function,
            Object::Class(_) => ObjectType::Class,
            Object::Instance(_) => ObjectType::Instance,
            Object::LibraryModule(_) => ObjectType::LibraryModule,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// `false` and `null` are falsy, every other object is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// The key this object is stored under in a map.
    pub fn map_key(&self) -> Result<MapKey, RuntimeErrorKind> {
        match self {
            Object::Number(n) => Ok(MapKey::Number(n.normalized().to_string().into())),
            Object::String(s) => Ok(MapKey::String(s.clone())),
            Object::Boolean(b) => Ok(MapKey::Boolean(*b)),
            Object::Null => Ok(MapKey::Null),
            _ => Err(RuntimeErrorKind::UnusableMapKey(self.object_type())),
        }
    }
}

/// Integers are written out in full up to this many trailing zeros.
const MAX_EXPANDED_ZEROS: i64 = 100;

/// Formats a number without trailing zeros. Integers with more than
/// [`MAX_EXPANDED_ZEROS`] trailing zeros keep an exponent.
pub fn format_number(n: &BigDecimal) -> String {
    let n = n.normalized();
    let scale = n.fractional_digit_count();
    if scale < 0 && scale >= -MAX_EXPANDED_ZEROS {
        n.with_scale(0).to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(n) => f.write_str(&format_number(n)),
            Object::String(s) => f.write_str(s),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Null => f.write_str("null"),
            Object::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Object::Map(map) => write!(f, "{map}"),
            Object::Closure(_) | Object::Native(_) => f.write_str("function"),
            Object::Class(class) => write!(f, "class {}", class.name),
            Object::Instance(instance) => write!(f, "{} instance", instance.class.name),
            Object::LibraryModule(module) => write!(f, "library module {{{}}}", module.name),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Number(l), Object::Number(r)) => l == r,
            (Object::String(l), Object::String(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::List(l), Object::List(r)) => l == r,
            (Object::Map(l), Object::Map(r)) => l == r,
            (Object::Closure(l), Object::Closure(r)) => Rc::ptr_eq(l, r),
            (Object::Native(l), Object::Native(r)) => l.name == r.name,
            (Object::Class(l), Object::Class(r)) => Rc::ptr_eq(l, r),
            (Object::Instance(l), Object::Instance(r)) => Rc::ptr_eq(l, r),
            (Object::LibraryModule(l), Object::LibraryModule(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

/// The type of Object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Number,
    String,
    Boolean,
    Null,
    List,
    Map,
    Function,
    Class,
    Instance,
    LibraryModule,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Number => "NUMBER",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::List => "LIST",
            ObjectType::Map => "MAP",
            ObjectType::Function => "FUNCTION",
            ObjectType::Class => "CLASS",
            ObjectType::Instance => "INSTANCE",
            ObjectType::LibraryModule => "LIBRARY_MODULE",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn number(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&number("0.1")), "0.1");
        assert_eq!(format_number(&number("2.50")), "2.5");
        assert_eq!(format_number(&number("100")), "100");
        assert_eq!(format_number(&number("1e2")), "100");
        assert_eq!(format_number(&number("-7.000")), "-7");
        assert_eq!(format_number(&number("1e100")), format!("1{}", "0".repeat(100)));
        assert_eq!(format_number(&number("1e101")), "1e+101");
        assert_eq!(format_number(&number("1e20000000")), "1e+20000000");
    }

    #[test]
    fn test_map_key_is_canonical() {
        let a = Object::Number(number("1.0")).map_key().unwrap();
        let b = Object::Number(number("1")).map_key().unwrap();
        assert_eq!(a, b);
        assert_ne!(
            Object::from("1").map_key().unwrap(),
            Object::Number(number("1")).map_key().unwrap()
        );
        assert_eq!(
            Object::from(Vec::<Object>::new()).map_key(),
            Err(RuntimeErrorKind::UnusableMapKey(ObjectType::List))
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(Object::Number(number("0")).is_truthy());
        assert!(Object::from("").is_truthy());
    }
}
