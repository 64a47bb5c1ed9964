//! The builtin module defines the native functions reachable by name.
//! The registry is consulted only after an identifier misses the whole
//! environment chain, so `let len = ...` shadows the native `len`.

use rand::Rng;

use crate::interpreter::RuntimeError;

use super::Value;

/// Builtin wraps a name and a native function body.
pub struct Builtin {
    name: &'static str,
    pub body: fn(Vec<Value>) -> Result<Value, RuntimeError>,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Builtin Function: {}>", self.name)
    }
}

impl Clone for Builtin {
    fn clone(&self) -> Self {
        Builtin {
            name: self.name,
            body: self.body,
        }
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        // all builtins have unique names
        self.name == other.name
    }
}

/// Resolves a builtin by name. Cheap: a builtin is a name plus a
/// function pointer, so there is no table to initialize.
pub fn lookup(name: &str) -> Option<Builtin> {
    Some(match name {
        "len" => Builtin {
            name: "len",
            body: builtin_len,
        },
        "first" => Builtin {
            name: "first",
            body: builtin_first,
        },
        "last" => Builtin {
            name: "last",
            body: builtin_last,
        },
        "rest" => Builtin {
            name: "rest",
            body: builtin_rest,
        },
        "push" => Builtin {
            name: "push",
            body: builtin_push,
        },
        "puts" => Builtin {
            name: "puts",
            body: builtin_puts,
        },
        "str" => Builtin {
            name: "str",
            body: builtin_str,
        },
        "rand" => Builtin {
            name: "rand",
            body: builtin_rand,
        },
        _ => return None,
    })
}

/// Returns the length of a string, array, or hash.
fn builtin_len(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    match arg {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(a) => Ok(Value::Integer(a.borrow().len() as i64)),
        Value::Hash(h) => Ok(Value::Integer(h.borrow().len() as i64)),
        other => Err(unsupported("len", &other)),
    }
}

/// Returns the first element of an array, or null when empty.
fn builtin_first(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    match arg {
        Value::Array(a) => Ok(a.borrow().first().cloned().unwrap_or(Value::Null)),
        other => Err(unsupported("first", &other)),
    }
}

/// Returns the last element of an array, or null when empty.
fn builtin_last(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    match arg {
        Value::Array(a) => Ok(a.borrow().last().cloned().unwrap_or(Value::Null)),
        other => Err(unsupported("last", &other)),
    }
}

/// Returns a new array holding everything but the first element,
/// or null when the array is empty.
fn builtin_rest(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    match arg {
        Value::Array(a) => {
            let elements = a.borrow();
            if elements.is_empty() {
                return Ok(Value::Null);
            }
            Ok(Value::from(elements[1..].to_vec()))
        }
        other => Err(unsupported("rest", &other)),
    }
}

/// Appends a value to an array in place and returns the array.
fn builtin_push(mut v: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_args(2, &v)?;

    let value = v.pop().unwrap();
    match v.pop().unwrap() {
        Value::Array(a) => {
            a.borrow_mut().push(value);
            Ok(Value::Array(a))
        }
        other => Err(unsupported("push", &other)),
    }
}

/// Prints each argument on its own line.
fn builtin_puts(v: Vec<Value>) -> Result<Value, RuntimeError> {
    for value in v {
        println!("{}", value);
    }
    Ok(Value::Null)
}

/// Renders any value as a string.
fn builtin_str(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    Ok(Value::String(arg.to_string()))
}

/// Returns a uniform integer in `[0, n)`.
fn builtin_rand(v: Vec<Value>) -> Result<Value, RuntimeError> {
    let arg = get_one(v)?;
    match arg {
        Value::Integer(n) if n > 0 => Ok(Value::Integer(rand::thread_rng().gen_range(0..n))),
        Value::Integer(n) => Err(RuntimeError::RandBound(n)),
        other => Err(unsupported("rand", &other)),
    }
}

/// Gets exactly 1 argument from v.
#[inline]
fn get_one(mut v: Vec<Value>) -> Result<Value, RuntimeError> {
    expect_args(1, &v)?;
    Ok(v.pop().unwrap())
}

/// Checks that v has exactly the expected number of elements.
#[inline]
fn expect_args<T>(n: usize, v: &[T]) -> Result<(), RuntimeError> {
    if v.len() != n {
        return Err(RuntimeError::WrongNumberOfArguments {
            got: v.len(),
            want: n,
        });
    }

    Ok(())
}

fn unsupported(builtin: &'static str, got: &Value) -> RuntimeError {
    RuntimeError::UnsupportedArgument {
        builtin,
        got: got.kind(),
    }
}
