use std::{collections::HashMap, rc::Rc};

use crate::interpreter::{
    machine::builtin::{Builtin, BuiltinKind},
    value::Value,
};

/// A node in the tree of environments.
///
/// An environment maps names to values and chains to its parent for
/// everything it does not bind itself. Environments are immutable once
/// constructed and shared by reference counting: a closure keeps its defining
/// environment alive for exactly as long as the closure itself is reachable.
#[derive(Debug)]
pub struct Environment {
    /// The unique index of this environment. Index 0 is the primitive
    /// environment.
    pub index: usize,
    parent:    Option<Rc<Environment>>,
    bindings:  HashMap<String, Value>,
}

impl Environment {
    /// Creates the primitive environment (index 0), which binds every
    /// builtin function and has no parent.
    #[must_use]
    pub fn primitive() -> Rc<Self> {
        let bindings = BuiltinKind::ALL.iter()
                                       .map(|kind| {
                                           (kind.name().to_string(),
                                            Value::Builtin(Builtin::new(*kind)))
                                       })
                                       .collect();

        Rc::new(Self { index: 0,
                       parent: None,
                       bindings })
    }

    /// Creates a child environment holding the given bindings.
    ///
    /// # Parameters
    /// - `parent`: The environment to chain to for unbound names.
    /// - `index`: The unique index assigned by the machine.
    /// - `bindings`: The names bound by this environment.
    #[must_use]
    pub fn child(parent: Rc<Self>, index: usize, bindings: HashMap<String, Value>) -> Rc<Self> {
        Rc::new(Self { index,
                       parent: Some(parent),
                       bindings })
    }

    /// Looks up a name along the environment chain.
    ///
    /// # Parameters
    /// - `name`: The identifier to resolve.
    ///
    /// # Returns
    /// The bound value, or `None` if the name is unbound all the way up to
    /// the primitive environment.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.lookup(name)
    }
}
