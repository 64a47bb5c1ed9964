#[macro_use]
extern crate pest_derive;

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::fs;
use std::rc::Rc;

pub mod ast;
pub mod interpreter;
pub mod parser;
pub mod repl;

pub use parser::{Rule, TamarinParser};
pub use pest::Parser;

use interpreter::value::Environment;

/// Interpreter run configuration, parsed from the CLI argument list.
pub struct Config {
    pub filename: String,
}

impl Config {
    pub fn new(args: &[String]) -> Result<Config, &'static str> {
        if args.len() < 2 {
            return Err("not enough arguments");
        }

        Ok(Config {
            filename: args[1].clone(),
        })
    }
}

/// Any failure on the way from source text to a final value.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse(Box<pest::error::Error<Rule>>),
    Build(ast::AstError),
    Runtime(interpreter::RuntimeError),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::Parse(err) => write!(f, "{}", err),
            Error::Build(err) => write!(f, "{}", err),
            Error::Runtime(err) => write!(f, "ERROR: {}", err),
        }
    }
}

/// Parses source text into a program AST.
pub fn parse_program(source: &str) -> Result<ast::node::Program, Error> {
    let mut pairs = TamarinParser::parse(Rule::program, source)
        .map_err(|err| Error::Parse(Box::new(err)))?;
    ast::build_program(pairs.next().unwrap()).map_err(Error::Build)
}

/// Executes the file named by config through the full pipeline: macro
/// definition, macro expansion, then evaluation in a fresh environment.
pub fn run(config: Config) -> Result<interpreter::Value, Error> {
    let source = fs::read_to_string(&config.filename).map_err(Error::Io)?;

    let mut program = parse_program(&source)?;
    let macro_env = Rc::new(RefCell::new(Environment::new()));
    interpreter::macros::define_macros(&mut program, &macro_env);
    let expanded =
        interpreter::macros::expand_macros(program, &macro_env).map_err(Error::Runtime)?;

    interpreter::eval(&expanded).map_err(Error::Runtime)
}
