use std::io;
use std::io::Write;

use pest::Parser;

use crate::ast;
use crate::interpreter::repl::Repl;
use crate::interpreter::Value;
use crate::parser::Rule;
use crate::TamarinParser;

/// Starts the tamarin REPL.
pub fn start_repl() -> ! {
    println!("Welcome to the tamarin REPL!");
    println!("(Ctrl-D to exit)\n");

    // Repl environments
    let repl = Repl::new();
    let mut buffer = String::new();

    // REPL loop
    loop {
        // REPL read
        let bytes = readline(&mut buffer);
        if bytes == 0 {
            println!();
            std::process::exit(0);
        }

        // REPL evaluate and print
        match TamarinParser::parse(Rule::program, &buffer) {
            Ok(mut pairs) => match ast::build_program(pairs.next().unwrap()) {
                Ok(program) => match repl.run_program(program) {
                    // `let` and friends have nothing to show
                    Ok(Value::Null) => {}
                    Ok(value) => println!("{}", value),
                    Err(err) => println!("ERROR: {}", err),
                },
                Err(err) => eprintln!("{}", err),
            },
            Err(err) => eprintln!("{}", err),
        }

        buffer.clear();
    }
}

/// reads a line from stdin into buffer, returning number of bytes read
fn readline(buffer: &mut String) -> usize {
    print!(">> ");
    // flush stdout to display the prompt
    io::stdout().flush().expect("Output Error");

    io::stdin().read_line(buffer).expect("Input Error")
}
