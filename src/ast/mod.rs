//! Builds the tamarin AST out of the pest parse tree. The grammar keeps
//! infix expressions flat; `build_infix` orders them here with the
//! shunting-yard algorithm and the binding powers from `lookup`.

use pest::iterators::Pair;

use crate::parser::Rule;

use node::*;

pub mod lookup;
pub mod modify;
pub mod node;


#[derive(Debug, Clone, PartialEq)]
pub enum AstError {
    UnexpectedRule { expected: &'static str, got: Rule },
    ChildMismatch { expected: usize, got: usize },
    InvalidOperator(String),
    InvalidInteger(String),
}

impl std::fmt::Display for AstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstError::UnexpectedRule { expected, got } => {
                write!(f, "expected {}, got {:?}", expected, got)
            }
            AstError::ChildMismatch { expected, got } => {
                write!(f, "expected {} children, got {}", expected, got)
            }
            AstError::InvalidOperator(op) => write!(f, "invalid operator: {}", op),
            AstError::InvalidInteger(text) => write!(f, "invalid integer literal: {}", text),
        }
    }
}

// Rule: program
pub fn build_program(program: Pair<Rule>) -> Result<Program, AstError> {
    if program.as_rule() != Rule::program {
        return Err(unexpected("program", &program));
    }

    let mut statements = Vec::new();
    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::statement => statements.push(build_statement(pair)?),
            Rule::EOI => break,
            _ => return Err(unexpected("statement", &pair)),
        }
    }

    Ok(Program { statements })
}

// Rule: statement
pub fn build_statement(statement: Pair<Rule>) -> Result<Statement, AstError> {
    let mut children = children(statement);
    expect_children(1, children.len())?;
    let child = children.remove(0);

    match child.as_rule() {
        Rule::let_statement => build_let(child),
        Rule::return_statement => build_return(child),
        Rule::exp_statement => build_exp_statement(child),
        _ => Err(unexpected("let, return, or expression statement", &child)),
    }
}

// Rule: let_statement
fn build_let(let_statement: Pair<Rule>) -> Result<Statement, AstError> {
    let mut children = children(let_statement);
    expect_children(2, children.len())?;

    let name = children.remove(0).as_str().to_string();
    let value = build_exp(children.remove(0))?;

    Ok(Statement::Let { name, value })
}

// Rule: return_statement
fn build_return(return_statement: Pair<Rule>) -> Result<Statement, AstError> {
    let mut children = children(return_statement);
    expect_children(1, children.len())?;

    Ok(Statement::Return(build_exp(children.remove(0))?))
}

// Rule: exp_statement
fn build_exp_statement(exp_statement: Pair<Rule>) -> Result<Statement, AstError> {
    let mut children = children(exp_statement);
    expect_children(1, children.len())?;

    Ok(Statement::Expression(build_exp(children.remove(0))?))
}

// Rule: exp
pub fn build_exp(exp: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(exp);
    expect_children(1, children.len())?;
    let child = children.remove(0);

    match child.as_rule() {
        Rule::assign => build_assign(child),
        Rule::infix => build_infix(child),
        _ => Err(unexpected("assignment or infix expression", &child)),
    }
}

// Rule: assign
// The left-hand side is marked as a reference so evaluation yields its
// slot instead of its value. Only the outermost node is the target:
// in `a.b.c = 5`, `a.b` is still an ordinary read.
fn build_assign(assign: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(assign);
    expect_children(2, children.len())?;

    let mut target = build_postfix(children.remove(0))?;
    match &mut target {
        Expression::Identifier(identifier) => identifier.reference = true,
        Expression::Dot { reference, .. } => *reference = true,
        _ => {}
    }
    let value = build_exp(children.remove(0))?;

    Ok(Expression::Assign {
        target: Box::new(target),
        value: Box::new(value),
    })
}

// Rule: infix
// Shunting-yard over the flat `operand (op operand)*` list. Operands go
// to an output stack; operators wait on a second stack and reduce into
// Infix nodes whenever an equal-or-tighter operator is on top.
fn build_infix(infix: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(infix);
    let first = build_prefix(children.remove(0))?;

    let mut output: Vec<Expression> = vec![first];
    let mut operators: Vec<(InfixOp, lookup::Precedence)> = Vec::new();

    while !children.is_empty() {
        let (operator, precedence) = lookup::infix(children.remove(0).as_str().to_string())?;

        while let Some(&(_, top_precedence)) = operators.last() {
            if top_precedence >= precedence {
                reduce(&mut output, &mut operators);
            } else {
                break;
            }
        }

        operators.push((operator, precedence));
        output.push(build_prefix(children.remove(0))?);
    }

    while !operators.is_empty() {
        reduce(&mut output, &mut operators);
    }

    expect_children(1, output.len())?;
    Ok(output.remove(0))
}

/// Pops one operator and its two operands, pushing the combined Infix
/// node back onto the output stack. Stacks are balanced by construction.
fn reduce(output: &mut Vec<Expression>, operators: &mut Vec<(InfixOp, lookup::Precedence)>) {
    let (operator, _) = operators.pop().unwrap();
    let right = output.pop().unwrap();
    let left = output.pop().unwrap();

    output.push(Expression::Infix {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    });
}

// Rule: prefix
fn build_prefix(prefix: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(prefix);

    let postfix = build_postfix(children.pop().unwrap())?;

    let mut operators = Vec::with_capacity(children.len());
    for child in children {
        operators.push(lookup::prefix(child.as_str().to_string())?);
    }

    // innermost operator applies first
    Ok(operators
        .into_iter()
        .rev()
        .fold(postfix, |right, operator| Expression::Prefix {
            operator,
            right: Box::new(right),
        }))
}

// Rule: postfix
fn build_postfix(postfix: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(postfix);
    let mut expression = build_primary(children.remove(0))?;

    for postop in children {
        let mut inner = self::children(postop);
        expect_children(1, inner.len())?;
        let op = inner.remove(0);

        expression = match op.as_rule() {
            Rule::call_args => Expression::Call {
                function: Box::new(expression),
                arguments: build_exp_list_of(op)?,
            },
            Rule::index_brackets => {
                let mut index = self::children(op);
                expect_children(1, index.len())?;
                Expression::Index {
                    left: Box::new(expression),
                    index: Box::new(build_exp(index.remove(0))?),
                }
            }
            Rule::member => {
                let mut member = self::children(op);
                expect_children(1, member.len())?;
                Expression::Dot {
                    target: Box::new(expression),
                    member: member.remove(0).as_str().to_string(),
                    reference: false,
                }
            }
            _ => return Err(unexpected("call, index, or member access", &op)),
        };
    }

    Ok(expression)
}

// Rule: primary
fn build_primary(primary: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(primary);
    expect_children(1, children.len())?;
    let child = children.remove(0);

    match child.as_rule() {
        Rule::group => {
            let mut inner = self::children(child);
            expect_children(1, inner.len())?;
            build_exp(inner.remove(0))
        }
        Rule::if_exp => build_if(child),
        Rule::function_literal => build_function(child),
        Rule::macro_literal => build_macro(child),
        Rule::class_literal => build_class(child),
        Rule::array_literal => Ok(Expression::Array(build_exp_list_of(child)?)),
        Rule::hash_literal => build_hash(child),
        Rule::this_exp => Ok(Expression::This),
        Rule::boolean => Ok(Expression::Boolean(child.as_str() == "true")),
        Rule::name => Ok(Expression::Identifier(Identifier {
            name: child.as_str().to_string(),
            reference: false,
        })),
        Rule::integer => build_integer(child),
        Rule::string => build_string(child),
        _ => Err(unexpected("primary expression", &child)),
    }
}

// Rule: if_exp
fn build_if(if_exp: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(if_exp);
    if children.len() != 2 && children.len() != 3 {
        return Err(AstError::ChildMismatch {
            expected: 2,
            got: children.len(),
        });
    }

    let condition = build_exp(children.remove(0))?;
    let consequence = build_block(children.remove(0))?;
    let alternative = match children.pop() {
        Some(block) => Some(build_block(block)?),
        None => None,
    };

    Ok(Expression::If {
        condition: Box::new(condition),
        consequence,
        alternative,
    })
}

// Rule: function_literal
fn build_function(function: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(function);
    expect_children(2, children.len())?;

    Ok(Expression::Function {
        parameters: build_params(children.remove(0))?,
        body: build_block(children.remove(0))?,
    })
}

// Rule: macro_literal
fn build_macro(makro: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(makro);
    expect_children(2, children.len())?;

    Ok(Expression::Macro {
        parameters: build_params(children.remove(0))?,
        body: build_block(children.remove(0))?,
    })
}

// Rule: class_literal
fn build_class(class: Pair<Rule>) -> Result<Expression, AstError> {
    let mut children = children(class);
    expect_children(2, children.len())?;

    Ok(Expression::Class {
        name: children.remove(0).as_str().to_string(),
        body: build_block(children.remove(0))?,
    })
}

// Rule: param_list
fn build_params(params: Pair<Rule>) -> Result<Vec<String>, AstError> {
    if params.as_rule() != Rule::param_list {
        return Err(unexpected("parameter list", &params));
    }

    Ok(params
        .into_inner()
        .map(|name| name.as_str().to_string())
        .collect())
}

// Rule: block
pub fn build_block(block: Pair<Rule>) -> Result<BlockStatement, AstError> {
    if block.as_rule() != Rule::block {
        return Err(unexpected("block", &block));
    }

    let mut statements = Vec::new();
    for pair in block.into_inner() {
        match pair.as_rule() {
            Rule::statement => statements.push(build_statement(pair)?),
            _ => return Err(unexpected("statement", &pair)),
        }
    }

    Ok(BlockStatement { statements })
}

// Rule: hash_literal
fn build_hash(hash: Pair<Rule>) -> Result<Expression, AstError> {
    let mut entries = Vec::new();
    for pair in children(hash) {
        let mut kv = children(pair);
        expect_children(2, kv.len())?;
        let key = build_exp(kv.remove(0))?;
        let value = build_exp(kv.remove(0))?;
        entries.push((key, value));
    }

    Ok(Expression::Hash(entries))
}

// Rule: integer
fn build_integer(integer: Pair<Rule>) -> Result<Expression, AstError> {
    integer
        .as_str()
        .parse()
        .map(Expression::Integer)
        .map_err(|_| AstError::InvalidInteger(integer.as_str().to_string()))
}

// Rule: string
// The grammar keeps the surrounding quotes in the span; strip them here.
fn build_string(string: Pair<Rule>) -> Result<Expression, AstError> {
    let text = string.as_str();
    Ok(Expression::String(text[1..text.len() - 1].to_string()))
}

/// Flattens an optional `exp_list` child into built expressions.
/// Handles `call_args` and `array_literal`, which both wrap one.
fn build_exp_list_of(pair: Pair<Rule>) -> Result<Vec<Expression>, AstError> {
    let mut children = children(pair);
    if children.is_empty() {
        return Ok(Vec::new());
    }

    expect_children(1, children.len())?;
    self::children(children.remove(0))
        .into_iter()
        .map(build_exp)
        .collect()
}

/// Collects a pair's children, dropping keyword markers.
fn children(pair: Pair<Rule>) -> Vec<Pair<Rule>> {
    pair.into_inner()
        .filter(|child| {
            !matches!(
                child.as_rule(),
                Rule::kw_let
                    | Rule::kw_return
                    | Rule::kw_fn
                    | Rule::kw_macro
                    | Rule::kw_class
                    | Rule::kw_if
                    | Rule::kw_else
            )
        })
        .collect()
}

fn expect_children(expected: usize, got: usize) -> Result<(), AstError> {
    if expected != got {
        return Err(AstError::ChildMismatch { expected, got });
    }

    Ok(())
}

fn unexpected(expected: &'static str, pair: &Pair<Rule>) -> AstError {
    AstError::UnexpectedRule {
        expected,
        got: pair.as_rule(),
    }
}
