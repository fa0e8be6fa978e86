use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A shared, mutable handle to an [`Environment`].
///
/// Environments are shared between the interpreter, closures and call
/// frames, so they live behind `Rc<RefCell<...>>`. Parent links only ever
/// point outward (call → definition → global); the chain is a tree, never a
/// cycle.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A lexically-chained variable scope.
///
/// Lookup walks up through parents to the first match; assignment always
/// writes into the innermost map. A function call builds a fresh child of
/// the environment captured at definition time, which is what gives the
/// language closures.
#[derive(Default)]
pub struct Environment {
    symbols: HashMap<String, Value>,
    parent:  Option<EnvRef>,
}

impl Environment {
    /// Creates an empty scope with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope chained to `parent`.
    #[must_use]
    pub fn with_parent(parent: EnvRef) -> Self {
        Self { symbols: HashMap::new(),
               parent:  Some(parent), }
    }

    /// Wraps the scope into a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Looks a name up in this scope, then outward through the parents.
    ///
    /// Every hit returns an independent copy of the stored value. This
    /// copy-on-read rule is load-bearing: mutating a value fetched from the
    /// environment must never retroactively change the binding it was read
    /// from.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Binds a name in this scope, shadowing any parent binding.
    pub fn set(&mut self, name: &str, value: Value) {
        self.symbols.insert(name.to_string(), value);
    }
}
