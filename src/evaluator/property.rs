use bigdecimal::{BigDecimal, ToPrimitive};
use compact_str::ToCompactString;

use crate::{
    errors::{RuntimeError, RuntimeErrorKind},
    objects::Object,
    utils::Location,
    Context,
};

use super::Locate;

impl Context {
    /// `receiver.property`.
    ///
    /// An instance answers from its own fields and a missing field is an
    /// error. A library module invokes the named native with no arguments.
    /// A map reads the property as a string key and a missing key is `null`.
    pub(crate) fn get_property(
        &mut self,
        receiver: Object,
        property: &str,
        location: Location,
    ) -> Result<Object, RuntimeError> {
        match receiver {
            Object::Instance(instance) => self
                .envs
                .get_local(instance.fields, property)
                .cloned()
                .ok_or_else(|| RuntimeErrorKind::UnknownProperty {
                    receiver: instance.class.name.clone(),
                    property: property.into(),
                })
                .at(location),
            Object::LibraryModule(module) => {
                let Some(native) = module.get(property).copied() else {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::UnknownProperty {
                            receiver: module.name.clone(),
                            property: property.into(),
                        },
                        location,
                    ));
                };
                self.call_native(native, Vec::new(), location)
            }
            Object::Map(map) => Ok(map.get_str(property).cloned().unwrap_or_default()),
            receiver => Err(RuntimeError::new(
                RuntimeErrorKind::PropertyNotSupported(receiver.object_type()),
                location,
            )),
        }
    }
}

/// `receiver[index]`. Misses and out of range positions are `null`.
pub(super) fn index(receiver: &Object, index: &Object) -> Result<Object, RuntimeErrorKind> {
    match (receiver, index) {
        (Object::List(items), Object::Number(n)) => Ok(position(n)
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or_default()),
        (Object::String(s), Object::Number(n)) => Ok(position(n)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Object::String(c.to_compact_string()))
            .unwrap_or_default()),
        (Object::Map(map), key) => Ok(map.get(key)?.cloned().unwrap_or_default()),
        (Object::List(_) | Object::String(_), index) => Err(RuntimeErrorKind::InvalidIndex {
            receiver: receiver.object_type(),
            index: index.object_type(),
        }),
        (receiver, _) => Err(RuntimeErrorKind::IndexNotSupported(receiver.object_type())),
    }
}

fn position(n: &BigDecimal) -> Option<usize> {
    if n.is_integer() {
        n.to_usize()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::objects::{MapInner, ObjectType};

    #[test]
    fn test_index() {
        let list = Object::from(vec![Object::from("a"), Object::from("b")]);
        assert_eq!(index(&list, &Object::Number(1.into())), Ok(Object::from("b")));
        assert_eq!(index(&list, &Object::Number(2.into())), Ok(Object::Null));
        assert_eq!(index(&list, &Object::Number((-1).into())), Ok(Object::Null));

        let s = Object::from("ghost");
        assert_eq!(index(&s, &Object::Number(0.into())), Ok(Object::from("g")));

        let mut map = MapInner::new();
        map.insert(Object::Boolean(true), Object::from("yes")).unwrap();
        let map = Object::Map(Rc::new(map));
        assert_eq!(index(&map, &Object::Boolean(true)), Ok(Object::from("yes")));
        assert_eq!(index(&map, &Object::Boolean(false)), Ok(Object::Null));

        assert_eq!(
            index(&Object::Null, &Object::Number(0.into())),
            Err(RuntimeErrorKind::IndexNotSupported(ObjectType::Null))
        );
        assert_eq!(
            index(&list, &Object::from("0")),
            Err(RuntimeErrorKind::InvalidIndex {
                receiver: ObjectType::List,
                index: ObjectType::String,
            })
        );
    }
}
