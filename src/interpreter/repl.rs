//! Session state for the REPL: one value environment and one macro
//! environment, both living for the whole session.

use std::{cell::RefCell, rc::Rc};

use crate::ast::node::Program;

use super::value::Environment;
use super::{eval_env, macros, RuntimeError, Value};

/// Repl maintains its environments for repeated evaluation of programs
/// in the same session.
pub struct Repl {
    environment: Rc<RefCell<Environment>>,
    macro_environment: Rc<RefCell<Environment>>,
}

#[allow(clippy::new_without_default)]
impl Repl {
    pub fn new() -> Repl {
        Repl {
            environment: Rc::new(RefCell::new(Environment::new())),
            macro_environment: Rc::new(RefCell::new(Environment::new())),
        }
    }

    /// Runs a parsed program through the full pipeline in the session
    /// environments: macro definition, macro expansion, evaluation.
    /// Macros defined on earlier lines stay usable on later ones.
    pub fn run_program(&self, mut program: Program) -> Result<Value, RuntimeError> {
        macros::define_macros(&mut program, &self.macro_environment);
        let expanded = macros::expand_macros(program, &self.macro_environment)?;
        eval_env(&expanded, &self.environment)
    }
}
