//! Lookup tables converting operator spellings into AST operator kinds.
//! Infix lookups also carry the operator's binding power, which the
//! shunting-yard pass in the builder uses to nest the flat operand list.

use cached::proc_macro::cached;

use super::node::{InfixOp, PrefixOp};
use super::AstError;

/// Binding power of an infix operator; higher binds tighter.
/// All tamarin infix operators are left-associative.
pub type Precedence = u8;

/// Converts the spelling of an infix operator into its kind and
/// binding power.
#[cached]
pub fn infix(op: String) -> Result<(InfixOp, Precedence), AstError> {
    Ok(match op.as_str() {
        "==" => (InfixOp::Eq, 1),
        "!=" => (InfixOp::Ne, 1),

        "<" => (InfixOp::Lt, 2),
        ">" => (InfixOp::Gt, 2),

        "+" => (InfixOp::Plus, 3),
        "-" => (InfixOp::Minus, 3),

        "*" => (InfixOp::Mul, 4),
        "/" => (InfixOp::Div, 4),

        _ => return Err(AstError::InvalidOperator(op)),
    })
}

/// Converts the spelling of a prefix operator into its kind.
#[cached]
pub fn prefix(op: String) -> Result<PrefixOp, AstError> {
    Ok(match op.as_str() {
        "!" => PrefixOp::Not,
        "-" => PrefixOp::Neg,
        _ => return Err(AstError::InvalidOperator(op)),
    })
}
