use bigdecimal::BigDecimal;
use compact_str::CompactString;

use crate::{
    errors::{check_arguments, RuntimeErrorKind},
    libs::Registry,
    objects::{NativeFunction, Object, ObjectType},
    utils::Join,
};

pub fn load_builtin(registry: &mut Registry) {
    registry.register_function(NativeFunction::new("print", |ctx, args| {
        let line = args.iter().join(" ");
        writeln!(ctx.output(), "{line}")?;
        Ok(Object::Null)
    }));
    registry.register_function(NativeFunction::new("type", |_, args| {
        check_arguments(&args, 1)?;
        Ok(Object::String(CompactString::const_new(
            args[0].object_type().name(),
        )))
    }));
    registry.register_function(NativeFunction::new("len", |_, args| {
        check_arguments(&args, 1)?;
        let len = match &args[0] {
            Object::String(s) => s.chars().count(),
            Object::List(items) => items.len(),
            Object::Map(map) => map.len(),
            other => {
                return Err(RuntimeErrorKind::InvalidArgument {
                    function: "len",
                    expected: ObjectType::String,
                    found: other.object_type(),
                })
            }
        };
        Ok(Object::Number(BigDecimal::from(len as u64)))
    }));
}
