use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tamarin::{ast, interpreter, Parser, Rule, TamarinParser};

fn build(program: &str) -> ast::node::Program {
    let mut parsed = TamarinParser::parse(Rule::program, program).unwrap();
    ast::build_program(parsed.next().unwrap()).unwrap()
}

pub fn fib_15_recursive(c: &mut Criterion) {
    let program = r"
    let fib = fn(n) {
        if (n < 2) {
            return n;
        }
        return fib(n - 1) + fib(n - 2);
    };
    fib(15);
    ";

    let prog_ast = build(program);

    c.bench_function("fib 15", |b| {
        b.iter(|| interpreter::eval(black_box(&prog_ast)))
    });
}

pub fn counter_class_100(c: &mut Criterion) {
    let program = r"
    class Counter {
        let constructor = fn() { this.count = 0; };
        let inc = fn() { this.count = this.count + 1; };
    }
    let c = Counter();
    let spin = fn(n) {
        if (n == 0) {
            return c.count;
        }
        c.inc();
        return spin(n - 1);
    };
    spin(100);
    ";

    let prog_ast = build(program);

    c.bench_function("counter 100", |b| {
        b.iter(|| interpreter::eval(black_box(&prog_ast)))
    });
}

criterion_group!(benches, fib_15_recursive, counter_class_100);
criterion_main!(benches);
