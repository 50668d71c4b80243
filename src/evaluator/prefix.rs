use crate::{compiler::ast::PrefixOp, errors::RuntimeErrorKind, objects::Object};

/// `-` takes a number and `!` a boolean.
pub(super) fn prefix(operator: PrefixOp, right: Object) -> Result<Object, RuntimeErrorKind> {
    match (operator, right) {
        (PrefixOp::Neg, Object::Number(n)) => Ok(Object::Number(-n)),
        (PrefixOp::Not, Object::Boolean(b)) => Ok(Object::Boolean(!b)),
        (operator, right) => Err(RuntimeErrorKind::PrefixTypeMismatch {
            operator: operator.as_str(),
            right: right.object_type(),
        }),
    }
}
