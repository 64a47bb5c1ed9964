extern crate pest;

#[derive(Parser)]
#[grammar = "tamarin.pest"]
pub struct TamarinParser;

#[cfg(test)]
mod test {

    use pest::Parser;

    use super::*;

    #[test]
    fn test_program() {
        TamarinParser::parse(
            Rule::program,
            r#"
        let x = 5;
        if (x < 5) {
            puts("hello world!");
        } else {
            puts(x * 2);
        }
        "#,
        )
        .unwrap();
    }

    #[test]
    fn test_name() {
        let tests = vec![
            "valid",
            "valid1",
            "valid_1",
            "alpha_num3r1c_and_underscores",
            "a",
            "letter",
            "classes",
            "thistle",
        ];
        for test in tests {
            let pairs = TamarinParser::parse(Rule::name, test).unwrap();
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end_pos().pos(), test.len());
        }
    }

    #[test]
    fn test_let() {
        let tests = vec![
            r"let x = 5;",
            r"let x = 5",
            r"let add = fn(a, b) { return a + b; };",
            r"let arr = [1, 2, 3];",
            r#"let h = {"k": 1, 2: "two"};"#,
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::let_statement, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end_pos().pos(), test.len());
        }
    }

    #[test]
    fn test_return() {
        let tests = vec![r"return 5", r"return arr[5]", r"return arr[5] + 5"];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::return_statement, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end_pos().pos(), test.len());
        }
    }

    #[test]
    fn test_assign() {
        let tests = vec![
            r"x = 5",
            r"x = 5 + 5",
            r"x = y = 5",
            r"this.v = v",
            r"box.value = box.value + 1",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::assign, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end_pos().pos(), test.len());
        }
    }

    #[test]
    fn test_block() {
        let tests = vec![
            r#"{
        }
        "#,
            r#"{
            if (thing) {
                nice;
            }
        }
        "#,
            r#"{
            statement;
        }"#,
        ];
        for test in tests {
            TamarinParser::parse(Rule::block, test).expect(test);
        }
    }

    #[test]
    fn test_array_literal() {
        let tests = vec![
            r"[]",
            r"[5]",
            r"[5 + 5]",
            r"[call()]",
            r"[call(5, a, arr[5])]",
            r#"[1, "two", true]"#,
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::array_literal, test).unwrap();
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len());
        }
    }

    #[test]
    fn test_hash_literal() {
        let tests = vec![
            r"{}",
            r#"{"one": 1}"#,
            r#"{"one": 1, 2: "two", true: 3}"#,
            r#"{1 + 1: 2 * 2}"#,
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::hash_literal, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_prefix() {
        let tests = vec![
            r"-5",
            r"-55",
            r"-(5)",
            r"!(x == y)",
            r"-name",
            r"-arr[5]",
            r"!!true",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::prefix, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_function_literal() {
        let tests = vec![
            r"fn(){}",
            r"fn(a){}",
            r"fn(a, b, c) {
                return a + b + c;
            }",
            r"fn(outer){
                let inner = fn(a) {
                    return a;
                };
                return inner(outer);
            }",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::function_literal, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_macro_literal() {
        let tests = vec![
            r"macro(){}",
            r"macro(x){ quote(unquote(x)); }",
            r"macro(a, b){ quote(unquote(b) - unquote(a)); }",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::macro_literal, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_class_literal() {
        let tests = vec![
            r"class Empty {}",
            r"class Box {
                let constructor = fn(v) { this.v = v; };
                let get = fn() { return this.v; };
            }",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::class_literal, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_postfix_chains() {
        let tests = vec![
            r"func()",
            r"func(a, b, c)",
            r"func(1, 1+1, 1+1+1)",
            r"arr[1]",
            r"arr[call(a, b, x[55]) + 123]",
            r"box.value",
            r"box.get()",
            r"make()[0].field",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::postfix, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_if() {
        let tests = vec![
            r"if (a) {
                b;
            }",
            r"if (a == b) {
                c;
            } else {
                d;
            }",
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::if_exp, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }

    #[test]
    fn test_exp() {
        let tests = vec![
            r"1+1",
            r"1+1+1",
            r"1+(1+1)",
            r"-1+(1+1)",
            r"a+(1+1)",
            r"1-(1+1)/1",
            r"1 < 2 == true",
            r#""foo" + "bar""#,
        ];

        for test in tests {
            let pairs = TamarinParser::parse(Rule::exp, test).expect(test);
            let last = pairs.last().unwrap();
            assert_eq!(last.as_span().end(), test.len(), "{}", last);
        }
    }
}
