//! A generic rewriting traversal over the AST. `modify_expression`
//! rebuilds an expression bottom-up, handing every node to the modifier
//! after its children have been rewritten. Quote/unquote splicing and
//! macro expansion are both built on top of it.

use super::node::{BlockStatement, Expression, Program, Statement};

/// Rewrites every expression in a program, post-order.
pub fn modify_program<F, E>(program: Program, modifier: &mut F) -> Result<Program, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    let statements = program
        .statements
        .into_iter()
        .map(|statement| modify_statement(statement, modifier))
        .collect::<Result<Vec<Statement>, E>>()?;

    Ok(Program { statements })
}

pub fn modify_statement<F, E>(statement: Statement, modifier: &mut F) -> Result<Statement, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    Ok(match statement {
        Statement::Let { name, value } => Statement::Let {
            name,
            value: modify_expression(value, modifier)?,
        },
        Statement::Return(value) => Statement::Return(modify_expression(value, modifier)?),
        Statement::Expression(value) => Statement::Expression(modify_expression(value, modifier)?),
    })
}

pub fn modify_block<F, E>(block: BlockStatement, modifier: &mut F) -> Result<BlockStatement, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    let statements = block
        .statements
        .into_iter()
        .map(|statement| modify_statement(statement, modifier))
        .collect::<Result<Vec<Statement>, E>>()?;

    Ok(BlockStatement { statements })
}

/// Rewrites an expression tree. Children are rewritten first so the
/// modifier always sees fully-rewritten subtrees.
pub fn modify_expression<F, E>(expression: Expression, modifier: &mut F) -> Result<Expression, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    let expression = match expression {
        Expression::Prefix { operator, right } => Expression::Prefix {
            operator,
            right: modify_boxed(right, modifier)?,
        },
        Expression::Infix {
            operator,
            left,
            right,
        } => Expression::Infix {
            operator,
            left: modify_boxed(left, modifier)?,
            right: modify_boxed(right, modifier)?,
        },
        Expression::Assign { target, value } => Expression::Assign {
            target: modify_boxed(target, modifier)?,
            value: modify_boxed(value, modifier)?,
        },
        Expression::Dot {
            target,
            member,
            reference,
        } => Expression::Dot {
            target: modify_boxed(target, modifier)?,
            member,
            reference,
        },
        Expression::If {
            condition,
            consequence,
            alternative,
        } => Expression::If {
            condition: modify_boxed(condition, modifier)?,
            consequence: modify_block(consequence, modifier)?,
            alternative: match alternative {
                Some(alternative) => Some(modify_block(alternative, modifier)?),
                None => None,
            },
        },
        Expression::Function { parameters, body } => Expression::Function {
            parameters,
            body: modify_block(body, modifier)?,
        },
        Expression::Macro { parameters, body } => Expression::Macro {
            parameters,
            body: modify_block(body, modifier)?,
        },
        Expression::Class { name, body } => Expression::Class {
            name,
            body: modify_block(body, modifier)?,
        },
        Expression::Call {
            function,
            arguments,
        } => Expression::Call {
            function: modify_boxed(function, modifier)?,
            arguments: modify_expressions(arguments, modifier)?,
        },
        Expression::Index { left, index } => Expression::Index {
            left: modify_boxed(left, modifier)?,
            index: modify_boxed(index, modifier)?,
        },
        Expression::Array(elements) => Expression::Array(modify_expressions(elements, modifier)?),
        Expression::Hash(entries) => {
            let entries = entries
                .into_iter()
                .map(|(key, value)| {
                    Ok((
                        modify_expression(key, modifier)?,
                        modify_expression(value, modifier)?,
                    ))
                })
                .collect::<Result<Vec<(Expression, Expression)>, E>>()?;
            Expression::Hash(entries)
        }
        // leaves: identifiers, literals, `this`
        leaf => leaf,
    };

    modifier(expression)
}

fn modify_boxed<F, E>(expression: Box<Expression>, modifier: &mut F) -> Result<Box<Expression>, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    Ok(Box::new(modify_expression(*expression, modifier)?))
}

fn modify_expressions<F, E>(
    expressions: Vec<Expression>,
    modifier: &mut F,
) -> Result<Vec<Expression>, E>
where
    F: FnMut(Expression) -> Result<Expression, E>,
{
    expressions
        .into_iter()
        .map(|expression| modify_expression(expression, modifier))
        .collect()
}
