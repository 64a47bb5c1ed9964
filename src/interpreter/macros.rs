//! Macro definition and expansion. Both run before evaluation: macro
//! definitions are pulled out of the program into their own
//! environment, then every call to a defined macro is rewritten into
//! the expression its body returns.

use std::{cell::RefCell, rc::Rc};

use crate::ast::modify;
use crate::ast::node::{Expression, Program, Statement};

use super::value::{Environment, Macro, Value};
use super::{eval_block, unwrap_return, RuntimeError};

/// Moves every top-level `let name = macro(...) { ... }` statement out
/// of the program, binding the macro in the macro environment.
pub fn define_macros(program: &mut Program, env: &Rc<RefCell<Environment>>) {
    let mut kept = Vec::with_capacity(program.statements.len());

    for statement in program.statements.drain(..) {
        match statement {
            Statement::Let {
                name,
                value: Expression::Macro { parameters, body },
            } => {
                env.borrow_mut().set(
                    &name,
                    Value::Macro(Rc::new(Macro {
                        parameters,
                        body,
                        env: env.clone(),
                    })),
                );
            }
            other => kept.push(other),
        }
    }

    program.statements = kept;
}

/// Rewrites every call to a defined macro. Arguments are passed to the
/// macro body unevaluated, as Quote values; the body must produce a
/// Quote, whose node replaces the call site.
pub fn expand_macros(
    program: Program,
    env: &Rc<RefCell<Environment>>,
) -> Result<Program, RuntimeError> {
    modify::modify_program(program, &mut |node| {
        let (makro, arguments) = match macro_call(&node, env) {
            Some(found) => found,
            None => return Ok(node),
        };

        let quoted = arguments
            .into_iter()
            .map(|argument| Value::Quote(Box::new(argument)));

        let macro_env = Rc::new(RefCell::new(Environment::new_sub(&makro.env)));
        for (parameter, argument) in makro.parameters.iter().zip(quoted) {
            macro_env.borrow_mut().set(parameter, argument);
        }

        let result = eval_block(&makro.body, &macro_env)?;
        match unwrap_return(result) {
            Value::Quote(node) => Ok(*node),
            other => Err(RuntimeError::MacroResultNotQuote(other.kind())),
        }
    })
}

/// Matches a call whose callee is an identifier bound to a macro in
/// the macro environment. Everything else expands to itself.
fn macro_call(
    node: &Expression,
    env: &Rc<RefCell<Environment>>,
) -> Option<(Rc<Macro>, Vec<Expression>)> {
    if let Expression::Call {
        function,
        arguments,
    } = node
    {
        if let Expression::Identifier(identifier) = function.as_ref() {
            if let Some(Value::Macro(makro)) = env.borrow().get(&identifier.name) {
                return Some((makro, arguments.clone()));
            }
        }
    }

    None
}
