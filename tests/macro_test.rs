mod common;

use common::*;
use tamarin::interpreter::macros::{define_macros, expand_macros};

fn run(source: &str) -> Value {
    run_program(source).unwrap_or_else(|err| panic!("{:?}: {}", source, err))
}

/// Runs a program and returns the printed form of the quote it yields.
fn run_quote(source: &str) -> String {
    match run(source) {
        Value::Quote(node) => node.to_string(),
        other => panic!("{:?}: expected quote, got {:?}", source, other),
    }
}

/// Expands a program's macros and returns its printed form.
fn expand(source: &str) -> String {
    let mut program = parse(source);
    let macro_env = new_env();
    define_macros(&mut program, &macro_env);
    expand_macros(program, &macro_env)
        .unwrap_or_else(|err| panic!("{:?}: {}", source, err))
        .to_string()
}

#[test]
fn test_quote() {
    let tests = vec![
        ("quote(5)", "5"),
        ("quote(5 + 8)", "(5 + 8)"),
        ("quote(foobar)", "foobar"),
        ("quote(foobar + barfoo)", "(foobar + barfoo)"),
        // the argument is captured, not evaluated: unbound names are fine
        ("quote(undefined_thing)", "undefined_thing"),
    ];

    for (input, want) in tests {
        assert_eq!(want, run_quote(input), "{}", input);
    }
}

#[test]
fn test_quote_inspect() {
    assert_eq!("QUOTE((5 + 8))", run("quote(5 + 8)").to_string());
}

#[test]
fn test_quote_arity() {
    let err = run_program("quote(1, 2)").unwrap_err();
    assert_eq!("wrong number of arguments. got=2, want=1", err.to_string());
}

#[test]
fn test_quote_unquote() {
    let tests = vec![
        ("quote(unquote(4))", "4"),
        ("quote(unquote(4 + 4))", "8"),
        ("quote(8 + unquote(4 + 4))", "(8 + 8)"),
        ("quote(unquote(4 + 4) + 8)", "(8 + 8)"),
        ("let foobar = 8; quote(foobar)", "foobar"),
        ("let foobar = 8; quote(unquote(foobar))", "8"),
        ("quote(unquote(true))", "true"),
        ("quote(unquote(true == false))", "false"),
        ("quote(unquote(quote(4 + 4)))", "(4 + 4)"),
        (
            "let quotedInfixExpression = quote(4 + 4);
             quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
            "(8 + (4 + 4))",
        ),
        // strings splice as string literals
        (r#"quote(unquote("hi"))"#, r#""hi""#),
    ];

    for (input, want) in tests {
        assert_eq!(want, run_quote(input), "{}", input);
    }
}

#[test]
fn test_unquote_of_member_reference() {
    let source = "
        class Box {
            let constructor = fn(v) { this.v = v; };
        }
        let b = Box(41);
        quote(unquote(b.v) + 1);
    ";
    assert_eq!("(41 + 1)", run_quote(source));
}

#[test]
fn test_unquote_without_literal_form_is_an_error() {
    let err = run_program("quote(unquote([1, 2]))").unwrap_err();
    assert_eq!(
        "unquote: cannot splice ARRAY into an expression",
        err.to_string()
    );
}

// a call that merely mentions unquote with the wrong shape stays as-is
#[test]
fn test_unquote_needs_exactly_one_argument() {
    assert_eq!("unquote(1, 2)", run_quote("quote(unquote(1, 2))"));
}

#[test]
fn test_define_macros() {
    let mut program = parse(
        "let number = 1;
         let function = fn(x, y) { x + y };
         let mymacro = macro(x, y) { x + y; };",
    );
    let macro_env = new_env();

    define_macros(&mut program, &macro_env);

    // only the macro definition is removed from the program
    assert_eq!(2, program.statements.len());
    assert!(macro_env.borrow().get("number").is_none());
    assert!(macro_env.borrow().get("function").is_none());

    let borrowed_env = macro_env.borrow();
    match borrowed_env.get("mymacro") {
        Some(Value::Macro(makro)) => {
            assert_eq!(vec!["x".to_string(), "y".to_string()], makro.parameters);
            assert_eq!("{ (x + y) }", makro.body.to_string());
        }
        other => panic!("expected macro binding, got {:?}", other),
    }
}

#[test]
fn test_expand_macros() {
    let tests = vec![
        (
            "let infixExpression = macro() { quote(1 + 2); };
             infixExpression();",
            "(1 + 2)",
        ),
        (
            "let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); };
             reverse(2 + 2, 10 - 5);",
            "((10 - 5) - (2 + 2))",
        ),
        (
            r#"let unless = macro(condition, consequence, alternative) {
                quote(if (!(unquote(condition))) {
                    unquote(consequence);
                } else {
                    unquote(alternative);
                });
            };
            unless(10 > 5, puts("not greater"), puts("greater"));"#,
            r#"if ((!(10 > 5))) { puts("not greater") } else { puts("greater") }"#,
        ),
    ];

    for (input, want) in tests {
        assert_eq!(want, expand(input), "{}", input);
    }
}

// the arguments reach the macro body unevaluated
#[test]
fn test_macro_arguments_are_quoted() {
    let source = "
        let show = macro(x) { x; };
        show(1 / 0);
    ";
    let mut program = parse(source);
    let macro_env = new_env();
    define_macros(&mut program, &macro_env);

    // dividing by zero would be a runtime error if the argument were
    // evaluated; as a quote it just splices back in
    assert_eq!("(1 / 0)", expand_macros(program, &macro_env).unwrap().to_string());
}

#[test]
fn test_macro_must_return_quote() {
    let source = "
        let bad = macro() { 1; };
        bad();
    ";
    let mut program = parse(source);
    let macro_env = new_env();
    define_macros(&mut program, &macro_env);

    let err = expand_macros(program, &macro_env).unwrap_err();
    assert_eq!(
        "macros must return a quoted expression, got INTEGER",
        err.to_string()
    );
}

#[test]
fn test_unless_end_to_end() {
    let falsy = "
        let unless = macro(cond, body) { quote(if (!(unquote(cond))) { unquote(body) }) };
        unless(10 > 1, 99);
    ";
    assert_eq!(Value::Null, run_expanded(falsy).unwrap());

    let truthy = "
        let unless = macro(cond, body) { quote(if (!(unquote(cond))) { unquote(body) }) };
        unless(1 > 10, 99);
    ";
    assert_eq!(Value::Integer(99), run_expanded(truthy).unwrap());
}

#[test]
fn test_macro_env_is_separate() {
    // the macro is gone from the runtime program and environment
    let source = "
        let m = macro() { quote(1); };
        m;
    ";
    let err = run_expanded(source).unwrap_err();
    assert_eq!("identifier not found: m", err.to_string());
}

#[test]
fn test_expansion_at_every_call_site() {
    let source = "
        let double_site = macro(x) { quote(unquote(x) + unquote(x)); };
        double_site(3) * double_site(4);
    ";
    assert_eq!(Value::Integer(48), run_expanded(source).unwrap());
}
