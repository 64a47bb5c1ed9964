//! AST node types for the tamarin language, plus their source-shaped
//! `Display` renderings. The renderings are load-bearing: quoted
//! expressions and function values print through them.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let { name: String, value: Expression },
    Return(Expression),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

/// An identifier use. `reference` is true for bare identifiers in
/// assignment-target position, which evaluate to an assignable slot
/// instead of the bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    String(String),
    Boolean(bool),
    This,
    Prefix {
        operator: PrefixOp,
        right: Box<Expression>,
    },
    Infix {
        operator: InfixOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Assign {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    Dot {
        target: Box<Expression>,
        member: String,
        /// true in assignment-target position, where the member slot
        /// may not exist yet
        reference: bool,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    Macro {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    Class {
        name: String,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Array(Vec<Expression>),
    Hash(Vec<(Expression, Expression)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Plus,
    Minus,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    Ne,
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            InfixOp::Plus => "+",
            InfixOp::Minus => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
        };
        write!(f, "{}", op)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_statements(&self.statements))
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(value) => write!(f, "{}", value),
        }
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ {} }}", join_statements(&self.statements))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{}", identifier.name),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::String(value) => write!(f, "\"{}\"", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::This => write!(f, "this"),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::Assign { target, value } => write!(f, "({} = {})", target, value),
            Expression::Dot { target, member, .. } => write!(f, "{}.{}", target, member),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expression::Macro { parameters, body } => {
                write!(f, "macro({}) {}", parameters.join(", "), body)
            }
            Expression::Class { name, body } => write!(f, "class {} {}", name, body),
            Expression::Call {
                function,
                arguments,
            } => {
                let arguments = arguments
                    .iter()
                    .map(Expression::to_string)
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{}({})", function, arguments)
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(Expression::to_string)
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "[{}]", elements)
            }
            Expression::Hash(entries) => {
                let entries = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{{}}}", entries)
            }
        }
    }
}

fn join_statements(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(Statement::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}
