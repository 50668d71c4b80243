use std::rc::Rc;

use bigdecimal::{num_bigint::BigInt, BigDecimal, RoundingMode};

use crate::{
    errors::{check_arguments, RuntimeErrorKind},
    objects::{LibraryModule, LibraryModuleInner, Object, ObjectType},
};

fn number<'a>(
    function: &'static str,
    arg: &'a Object,
) -> Result<&'a BigDecimal, RuntimeErrorKind> {
    match arg {
        Object::Number(n) => Ok(n),
        other => Err(RuntimeErrorKind::InvalidArgument {
            function,
            expected: ObjectType::Number,
            found: other.object_type(),
        }),
    }
}

pub fn math_lib() -> LibraryModule {
    Rc::new(
        LibraryModuleInner::new("math")
            .with("pi", |_, args| {
                check_arguments(&args, 0)?;
                let digits = BigInt::from(3_141_592_653_589_793_238_462_643_383_279_u128);
                Ok(Object::Number(BigDecimal::new(digits, 30)))
            })
            .with("abs", |_, args| {
                check_arguments(&args, 1)?;
                Ok(Object::Number(number("abs", &args[0])?.abs()))
            })
            .with("max", |_, args| {
                check_arguments(&args, 2)?;
                let (a, b) = (number("max", &args[0])?, number("max", &args[1])?);
                Ok(Object::Number((if a >= b { a } else { b }).clone()))
            })
            .with("min", |_, args| {
                check_arguments(&args, 2)?;
                let (a, b) = (number("min", &args[0])?, number("min", &args[1])?);
                Ok(Object::Number((if a <= b { a } else { b }).clone()))
            })
            // Halves round away from zero.
            .with("round", |_, args| {
                check_arguments(&args, 1)?;
                let n = number("round", &args[0])?;
                Ok(Object::Number(n.with_scale_round(0, RoundingMode::HalfUp)))
            }),
    )
}
