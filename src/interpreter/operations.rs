//! The operations module defines prefix and infix operator behavior
//! over runtime values.

use crate::ast::node::{InfixOp, PrefixOp};

use super::value::{Kind, Value};
use super::RuntimeError;

/// Evaluates a prefix operator against its operand.
pub fn prefix(operator: PrefixOp, right: Value) -> Result<Value, RuntimeError> {
    match operator {
        // !true -> false, !false -> true, !null -> true,
        // anything else (including 0 and "") -> false
        PrefixOp::Not => Ok(Value::Boolean(matches!(
            right,
            Value::Boolean(false) | Value::Null
        ))),
        PrefixOp::Neg => match right {
            Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
            other => Err(RuntimeError::UnknownPrefixOperator {
                operator,
                right: other.kind(),
            }),
        },
    }
}

/// Evaluates an infix operator for a given left and right value.
///
/// Both integers: arithmetic and comparison. Both strings: `+` only.
/// Otherwise `==`/`!=` compare identity, mismatched types are a type
/// error, and any other combination is an unknown operator.
pub fn infix(operator: InfixOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => integer_infix(operator, left, right),
        (Value::String(left), Value::String(right)) => string_infix(operator, left, right),
        (left, right) => match operator {
            InfixOp::Eq => Ok(Value::Boolean(left == right)),
            InfixOp::Ne => Ok(Value::Boolean(left != right)),
            _ if left.kind() != right.kind() => Err(RuntimeError::TypeMismatch {
                left: left.kind(),
                operator,
                right: right.kind(),
            }),
            _ => Err(RuntimeError::UnknownInfixOperator {
                left: left.kind(),
                operator,
                right: right.kind(),
            }),
        },
    }
}

/// Integer arithmetic wraps on overflow (two's complement), matching
/// the behavior of 64-bit machine integers.
fn integer_infix(operator: InfixOp, left: i64, right: i64) -> Result<Value, RuntimeError> {
    Ok(match operator {
        InfixOp::Plus => Value::Integer(left.wrapping_add(right)),
        InfixOp::Minus => Value::Integer(left.wrapping_sub(right)),
        InfixOp::Mul => Value::Integer(left.wrapping_mul(right)),
        InfixOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Integer(left.wrapping_div(right))
        }
        InfixOp::Lt => Value::Boolean(left < right),
        InfixOp::Gt => Value::Boolean(left > right),
        InfixOp::Eq => Value::Boolean(left == right),
        InfixOp::Ne => Value::Boolean(left != right),
    })
}

fn string_infix(operator: InfixOp, left: String, right: String) -> Result<Value, RuntimeError> {
    match operator {
        InfixOp::Plus => Ok(Value::String(left + right.as_str())),
        _ => Err(RuntimeError::UnknownInfixOperator {
            left: Kind::String,
            operator,
            right: Kind::String,
        }),
    }
}
