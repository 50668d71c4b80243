use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use compact_str::CompactString;

use crate::{compiler::ast::InfixOp, errors::RuntimeErrorKind, objects::Object};

/// Applies a binary operator to two evaluated operands.
pub(super) fn infix(
    operator: InfixOp,
    left: Object,
    right: Object,
) -> Result<Object, RuntimeErrorKind> {
    match (left, right) {
        (Object::Number(l), Object::Number(r)) => number_infix(operator, &l, &r),
        (Object::String(l), Object::String(r)) => string_infix(operator, l, &r),
        (Object::Boolean(l), Object::Boolean(r)) => boolean_infix(operator, l, r),
        (Object::Null, Object::Null) => match operator {
            InfixOp::Eq => Ok(Object::Boolean(true)),
            InfixOp::Ne => Ok(Object::Boolean(false)),
            _ => Err(unknown_operator(operator, &Object::Null, &Object::Null)),
        },
        (l, r) if l.object_type() != r.object_type() => Err(RuntimeErrorKind::TypeMismatch {
            left: l.object_type(),
            operator: operator.as_str(),
            right: r.object_type(),
        }),
        (l, r) => Err(unknown_operator(operator, &l, &r)),
    }
}

fn unknown_operator(operator: InfixOp, left: &Object, right: &Object) -> RuntimeErrorKind {
    RuntimeErrorKind::UnknownOperator {
        left: left.object_type(),
        operator: operator.as_str(),
        right: right.object_type(),
    }
}

fn number_infix(
    operator: InfixOp,
    l: &BigDecimal,
    r: &BigDecimal,
) -> Result<Object, RuntimeErrorKind> {
    Ok(match operator {
        InfixOp::Add => Object::Number(l + r),
        InfixOp::Sub => Object::Number(l - r),
        InfixOp::Mul => Object::Number(l * r),
        InfixOp::Div => {
            if r.is_zero() {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            Object::Number(l / r)
        }
        InfixOp::Mod => {
            if r.is_zero() {
                return Err(RuntimeErrorKind::ModuloByZero);
            }
            Object::Number(l % r)
        }
        InfixOp::Eq => Object::Boolean(l == r),
        InfixOp::Ne => Object::Boolean(l != r),
        InfixOp::Lt => Object::Boolean(l < r),
        InfixOp::Le => Object::Boolean(l <= r),
        InfixOp::Gt => Object::Boolean(l > r),
        InfixOp::Ge => Object::Boolean(l >= r),
        InfixOp::Range => range(l, r)?,
        InfixOp::And | InfixOp::Or => {
            let n = Object::Number(BigDecimal::zero());
            return Err(unknown_operator(operator, &n, &n));
        }
    })
}

/// Longest list a range may produce.
const MAX_RANGE_LEN: u64 = 1 << 24;

/// `a .. b` with integral bounds, both ends included.
fn range(l: &BigDecimal, r: &BigDecimal) -> Result<Object, RuntimeErrorKind> {
    if !l.is_integer() || !r.is_integer() {
        return Err(RuntimeErrorKind::InvalidRange);
    }
    let (Some(start), Some(end)) = (l.to_i64(), r.to_i64()) else {
        return Err(RuntimeErrorKind::InvalidRange);
    };
    if start.abs_diff(end) >= MAX_RANGE_LEN {
        return Err(RuntimeErrorKind::RangeTooLarge(MAX_RANGE_LEN));
    }
    let items: Vec<Object> = if start <= end {
        (start..=end).map(|i| Object::Number(i.into())).collect()
    } else {
        (end..=start).rev().map(|i| Object::Number(i.into())).collect()
    };
    Ok(Object::from(items))
}

fn string_infix(
    operator: InfixOp,
    l: CompactString,
    r: &CompactString,
) -> Result<Object, RuntimeErrorKind> {
    match operator {
        InfixOp::Add => {
            let mut s = l;
            s.push_str(r);
            Ok(Object::String(s))
        }
        InfixOp::Eq => Ok(Object::Boolean(l == *r)),
        InfixOp::Ne => Ok(Object::Boolean(l != *r)),
        _ => Err(unknown_operator(
            operator,
            &Object::String(l),
            &Object::String(r.clone()),
        )),
    }
}

fn boolean_infix(operator: InfixOp, l: bool, r: bool) -> Result<Object, RuntimeErrorKind> {
    match operator {
        InfixOp::Eq => Ok(Object::Boolean(l == r)),
        InfixOp::Ne => Ok(Object::Boolean(l != r)),
        InfixOp::And => Ok(Object::Boolean(l && r)),
        InfixOp::Or => Ok(Object::Boolean(l || r)),
        _ => Err(unknown_operator(
            operator,
            &Object::Boolean(l),
            &Object::Boolean(r),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::objects::ObjectType;

    fn number(s: &str) -> Object {
        Object::Number(BigDecimal::from_str(s).unwrap())
    }

    #[test]
    fn test_number_arithmetic() {
        assert_eq!(
            infix(InfixOp::Add, number("0.1"), number("0.2")),
            Ok(number("0.3"))
        );
        assert_eq!(
            infix(InfixOp::Div, number("10"), number("4")),
            Ok(number("2.5"))
        );
        assert_eq!(
            infix(InfixOp::Mod, number("7"), number("3")),
            Ok(number("1"))
        );
        assert_eq!(
            infix(InfixOp::Le, number("2"), number("2.0")),
            Ok(Object::Boolean(true))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            infix(InfixOp::Div, number("1"), number("0")),
            Err(RuntimeErrorKind::DivisionByZero)
        );
        assert_eq!(
            infix(InfixOp::Mod, number("1"), number("0.0")),
            Err(RuntimeErrorKind::ModuloByZero)
        );
    }

    #[test]
    fn test_range() {
        assert_eq!(
            infix(InfixOp::Range, number("1"), number("3")),
            Ok(Object::from(vec![number("1"), number("2"), number("3")]))
        );
        assert_eq!(
            infix(InfixOp::Range, number("2"), number("0")),
            Ok(Object::from(vec![number("2"), number("1"), number("0")]))
        );
        assert_eq!(
            infix(InfixOp::Range, number("1.5"), number("3")),
            Err(RuntimeErrorKind::InvalidRange)
        );
        assert_eq!(
            infix(InfixOp::Range, number("1"), number("1000000000000")),
            Err(RuntimeErrorKind::RangeTooLarge(MAX_RANGE_LEN))
        );
        assert_eq!(
            infix(InfixOp::Range, number("0"), number("-16777216")),
            Err(RuntimeErrorKind::RangeTooLarge(MAX_RANGE_LEN))
        );
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(
            infix(InfixOp::Add, number("5"), Object::from("a"))
                .unwrap_err()
                .to_string(),
            "type mismatch: NUMBER + STRING"
        );
        assert_eq!(
            infix(InfixOp::Add, Object::Boolean(true), Object::Boolean(false)),
            Err(RuntimeErrorKind::UnknownOperator {
                left: ObjectType::Boolean,
                operator: "+",
                right: ObjectType::Boolean,
            })
        );
        assert_eq!(
            infix(
                InfixOp::Eq,
                Object::from(Vec::<Object>::new()),
                Object::from(Vec::<Object>::new())
            )
            .unwrap_err()
            .to_string(),
            "unknown operator: LIST == LIST"
        );
    }

    #[test]
    fn test_string_and_boolean() {
        assert_eq!(
            infix(InfixOp::Add, Object::from("gh"), Object::from("ost")),
            Ok(Object::from("ghost"))
        );
        assert_eq!(
            infix(InfixOp::Ne, Object::from("a"), Object::from("b")),
            Ok(Object::Boolean(true))
        );
        assert_eq!(
            infix(InfixOp::Or, Object::Boolean(false), Object::Boolean(true)),
            Ok(Object::Boolean(true))
        );
        assert_eq!(
            infix(InfixOp::Eq, Object::Null, Object::Null),
            Ok(Object::Boolean(true))
        );
    }
}
