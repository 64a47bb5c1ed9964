//! Quote and unquote. `quote(expr)` captures its argument as an AST
//! value instead of evaluating it, after rewriting every
//! `unquote(inner)` site with the evaluated value of `inner`.

use std::{cell::RefCell, rc::Rc};

use crate::ast::modify;
use crate::ast::node::Expression;

use super::value::{Environment, Value};
use super::{eval_exp, resolve, RuntimeError};

/// Captures the argument of a `quote(...)` call, splicing unquotes.
pub fn quote(exp: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let rewritten = eval_unquote_calls(exp.clone(), env)?;
    Ok(Value::Quote(Box::new(rewritten)))
}

/// Walks the quoted tree and replaces every call shaped
/// `unquote(<inner>)` with the literal form of `<inner>`'s value,
/// evaluated in the current environment.
fn eval_unquote_calls(
    exp: Expression,
    env: &Rc<RefCell<Environment>>,
) -> Result<Expression, RuntimeError> {
    modify::modify_expression(exp, &mut |node| {
        let argument = match unquote_argument(&node) {
            Some(argument) => argument,
            None => return Ok(node),
        };

        let value = resolve(eval_exp(&argument, env)?);
        expression_from(value)
    })
}

/// Matches the `unquote(<single argument>)` call shape. Any other
/// arity keeps the node untouched, like any ordinary call would be.
fn unquote_argument(node: &Expression) -> Option<Expression> {
    if let Expression::Call {
        function,
        arguments,
    } = node
    {
        if let Expression::Identifier(identifier) = function.as_ref() {
            if identifier.name == "unquote" && arguments.len() == 1 {
                return Some(arguments[0].clone());
            }
        }
    }

    None
}

/// Converts a runtime value back into the AST node that denotes it.
/// Only values with a literal form can be spliced; anything else
/// (arrays, functions, instances, ...) is a runtime error rather than
/// a hole in the tree.
fn expression_from(value: Value) -> Result<Expression, RuntimeError> {
    match value {
        Value::Integer(value) => Ok(Expression::Integer(value)),
        Value::Boolean(value) => Ok(Expression::Boolean(value)),
        Value::String(value) => Ok(Expression::String(value)),
        Value::Quote(node) => Ok(*node),
        other => Err(RuntimeError::UnquoteUnsupported(other.kind())),
    }
}
