use std::{cell::RefCell, rc::Rc};

pub use tamarin::{
    ast::node::*,
    interpreter::{self, value::Environment, RuntimeError, Value},
};

/// Parses source, panicking on front-end failures so evaluator tests
/// only ever report evaluator problems.
pub fn parse(source: &str) -> Program {
    tamarin::parse_program(source)
        .unwrap_or_else(|err| panic!("parse error in {:?}: {}", source, err))
}

/// Parses and evaluates a program in a fresh environment.
pub fn run_program(source: &str) -> Result<Value, RuntimeError> {
    interpreter::eval(&parse(source))
}

/// Parses, defines and expands macros, then evaluates.
pub fn run_expanded(source: &str) -> Result<Value, RuntimeError> {
    let mut program = parse(source);
    let macro_env = new_env();
    interpreter::macros::define_macros(&mut program, &macro_env);
    let expanded = interpreter::macros::expand_macros(program, &macro_env)?;
    interpreter::eval(&expanded)
}

pub fn new_env() -> Rc<RefCell<Environment>> {
    Rc::new(RefCell::new(Environment::new()))
}
