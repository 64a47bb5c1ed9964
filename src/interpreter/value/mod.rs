//! The value module defines the runtime value universe of tamarin.
//! A `Value` is the tagged container every expression evaluates to.
//! Heap-backed kinds (arrays, hashes, functions, classes, instances)
//! are shared handles: cloning a `Value` never copies their contents,
//! and `==` on them compares identity.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::ast::node::{BlockStatement, Expression};

pub mod builtin;
pub mod environment;
pub use builtin::Builtin;
pub use environment::Environment;

/// Value holds the data of tamarin types.
#[derive(Clone)]
pub enum Value {
    /// implicit result of empty blocks, missing lookups, and `let`
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Rc<RefCell<Vec<Value>>>),
    /// key hashes map to the original key/value pair
    Hash(Rc<RefCell<HashMap<HashKey, HashPair>>>),
    /// closure: parameters, body, and the environment it was defined in
    Function(Rc<Function>),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
    /// an assignable slot: an environment plus a name in it
    Reference(Reference),
    /// wrapper carrying `return` out of nested blocks
    Return(Box<Value>),
    Builtin(Builtin),
    /// an AST node captured by `quote`
    Quote(Box<Expression>),
    /// like Function, but lives in the macro environment and receives
    /// its arguments as Quote values
    Macro(Rc<Macro>),
}

pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

pub struct Class {
    pub name: String,
    pub body: BlockStatement,
}

pub struct Instance {
    pub class: Rc<Class>,
    /// the environment the class body was evaluated in; holds the
    /// members and the `this` binding
    pub members: Rc<RefCell<Environment>>,
}

#[derive(Clone)]
pub struct Reference {
    pub env: Rc<RefCell<Environment>>,
    pub name: String,
}

pub struct Macro {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

impl Reference {
    /// Reads the referenced slot; a dangling reference reads as null.
    pub fn value(&self) -> Value {
        self.env.borrow().get(&self.name).unwrap_or(Value::Null)
    }

    /// Writes the referenced slot in the environment captured when the
    /// reference was produced, never an enclosing one.
    pub fn assign(&self, value: Value) {
        self.env.borrow_mut().set(&self.name, value);
    }
}

/// The type tag of a value, also used as the type half of a `HashKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Class,
    Instance,
    Reference,
    ReturnValue,
    Builtin,
    Quote,
    Macro,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Kind::Integer => "INTEGER",
            Kind::Boolean => "BOOLEAN",
            Kind::String => "STRING",
            Kind::Null => "NULL",
            Kind::Array => "ARRAY",
            Kind::Hash => "HASH",
            Kind::Function => "FUNCTION",
            Kind::Class => "CLASS",
            Kind::Instance => "INSTANCE",
            Kind::Reference => "REFERENCE",
            Kind::ReturnValue => "RETURN_VALUE",
            Kind::Builtin => "BUILTIN",
            Kind::Quote => "QUOTE",
            Kind::Macro => "MACRO",
        };
        write!(f, "{}", tag)
    }
}

/// Hash keys pair a type tag with a 64-bit datum so that keys of
/// different types never collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: Kind,
    pub value: u64,
}

/// 64-bit FNV-1a over raw bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x100_0000_01b3;

    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
        })
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Hash(_) => Kind::Hash,
            Value::Function(_) => Kind::Function,
            Value::Class(_) => Kind::Class,
            Value::Instance(_) => Kind::Instance,
            Value::Reference(_) => Kind::Reference,
            Value::Return(_) => Kind::ReturnValue,
            Value::Builtin(_) => Kind::Builtin,
            Value::Quote(_) => Kind::Quote,
            Value::Macro(_) => Kind::Macro,
        }
    }

    /// tamarin truthiness: only false and null are falsy.
    /// Zero and the empty string are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// The hash-key capability. Only integers, booleans, and strings
    /// can key a hash; everything else returns None.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey {
                kind: Kind::Integer,
                value: *n as u64,
            }),
            Value::Boolean(b) => Some(HashKey {
                kind: Kind::Boolean,
                value: *b as u64,
            }),
            Value::String(s) => Some(HashKey {
                kind: Kind::String,
                value: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare by value; heap values compare by handle
    /// identity. This is exactly the `==` the language exposes for
    /// operands that are not both integers.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Reference(a), Value::Reference(b)) => {
                Rc::ptr_eq(&a.env, &b.env) && a.name == b.name
            }
            (Value::Return(a), Value::Return(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Quote(a), Value::Quote(b)) => a == b,
            (Value::Macro(a), Value::Macro(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Circular reference display
const CIRCULAR_REF: &str = "...";

/// Display renders a value the way the REPL shows it.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                write!(f, "{}", stringify_array(elements, &mut HashSet::new()))
            }
            Value::Hash(pairs) => write!(f, "{}", stringify_hash(pairs, &mut HashSet::new())),
            Value::Function(function) => {
                write!(f, "fn({}) {}", function.parameters.join(", "), function.body)
            }
            Value::Class(class) => write!(f, "class {} {}", class.name, class.body),
            Value::Instance(instance) => write!(f, "instance of {}", instance.class.name),
            Value::Reference(reference) => match reference.env.borrow().get(&reference.name) {
                Some(value) => write!(f, "{}", value),
                None => write!(f, "<missing reference>"),
            },
            Value::Return(inner) => write!(f, "{}", inner),
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Quote(node) => write!(f, "QUOTE({})", node),
            Value::Macro(makro) => {
                write!(f, "macro({}) {}", makro.parameters.join(", "), makro.body)
            }
        }
    }
}

/// Shallow debug rendering; environments are cyclic through instances,
/// so no variant prints its captured environment.
impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Integer(n) => write!(f, "Integer({})", n),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(elements) => write!(f, "Array(len={})", elements.borrow().len()),
            Value::Hash(pairs) => write!(f, "Hash(len={})", pairs.borrow().len()),
            Value::Function(function) => write!(f, "Function(fn({}))", function.parameters.join(", ")),
            Value::Class(class) => write!(f, "Class({})", class.name),
            Value::Instance(instance) => write!(f, "Instance({})", instance.class.name),
            Value::Reference(reference) => write!(f, "Reference({})", reference.name),
            Value::Return(inner) => write!(f, "Return({:?})", inner),
            Value::Builtin(b) => write!(f, "{:?}", b),
            Value::Quote(node) => write!(f, "Quote({})", node),
            Value::Macro(makro) => write!(f, "Macro(macro({}))", makro.parameters.join(", ")),
        }
    }
}

/// Safely stringifies the contents of an array, replacing circular
/// references with a constant string.
fn stringify_array(array: &Rc<RefCell<Vec<Value>>>, seen: &mut HashSet<usize>) -> String {
    seen.insert(array.as_ptr() as usize);

    let result = array
        .borrow()
        .iter()
        .map(|element| stringify_element(element, seen))
        .collect::<Vec<String>>()
        .join(", ");

    format!("[{}]", result)
}

/// Safely stringifies the contents of a hash, replacing circular
/// references with a constant string.
fn stringify_hash(
    hash: &Rc<RefCell<HashMap<HashKey, HashPair>>>,
    seen: &mut HashSet<usize>,
) -> String {
    seen.insert(hash.as_ptr() as usize);

    let result = hash
        .borrow()
        .values()
        .map(|pair| {
            format!(
                "{}: {}",
                stringify_element(&pair.key, seen),
                stringify_element(&pair.value, seen)
            )
        })
        .collect::<Vec<String>>()
        .join(", ");

    format!("{{{}}}", result)
}

fn stringify_element(element: &Value, seen: &mut HashSet<usize>) -> String {
    match element {
        Value::Array(inner) => {
            if seen.contains(&(inner.as_ptr() as usize)) {
                format!("[{}]", CIRCULAR_REF)
            } else {
                stringify_array(inner, seen)
            }
        }
        Value::Hash(inner) => {
            if seen.contains(&(inner.as_ptr() as usize)) {
                format!("{{{}}}", CIRCULAR_REF)
            } else {
                stringify_hash(inner, seen)
            }
        }
        other => other.to_string(),
    }
}

impl From<i64> for Value {
    /// produces an Integer `Value` from an i64
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    /// produces a Boolean `Value` from a bool
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    /// produces a String `Value` from a String
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    /// produces a String `Value` from a string slice
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    /// produces an Array `Value` from a Vec<Value>
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<Builtin> for Value {
    /// produces a Builtin `Value` from a Builtin struct
    fn from(v: Builtin) -> Self {
        Value::Builtin(v)
    }
}
