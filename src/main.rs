//! Main entrypoint of the tamarin interpreter binary.

use std::{env, process};

use tamarin::interpreter::Value;
use tamarin::repl;

/// Main with no arguments begins a tamarin REPL session.
/// If a filepath is passed, the interpreter instead executes the
/// contained program, printing a non-null top-level value to stdout.
fn main() {
    let args: Vec<String> = env::args().collect();

    // if no additional arguments are passed, start the REPL
    if args.len() == 1 {
        repl::start_repl();
    }

    // otherwise, parse the args into config, and run
    let config = tamarin::Config::new(&args).unwrap_or_else(|err| {
        eprintln!("Argument Parsing Error: {}", err);
        process::exit(1);
    });

    match tamarin::run(config) {
        // a null program value is not printed
        Ok(Value::Null) => {}
        Ok(value) => println!("{}", value),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
