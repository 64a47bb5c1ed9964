//! The environment module defines the lexical scope chain.
//! An environment binds names to values and optionally links to the
//! enclosing scope; lookups climb the chain, writes stay local.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::Value;

pub struct Environment {
    // enclosing scope, None for the global and instance environments
    outer: Option<Rc<RefCell<Environment>>>,
    // local bindings
    bindings: HashMap<String, Value>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Returns a fresh environment with no enclosing scope.
    pub fn new() -> Environment {
        Environment {
            outer: None,
            bindings: HashMap::new(),
        }
    }

    /// Returns a new environment enclosed by `outer`.
    pub fn new_sub(outer: &Rc<RefCell<Environment>>) -> Environment {
        Environment {
            outer: Some(outer.clone()),
            bindings: HashMap::new(),
        }
    }

    /// Returns the value bound to `name` in this environment, or in the
    /// nearest enclosing one to define it.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Binds `name` locally, shadowing any enclosing binding of the
    /// same name rather than overwriting it.
    pub fn set(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }
}
