//! Lexically nested binding environments.
//!
//! A [`Scope`] is an insertion-ordered name→value map with a parent
//! pointer. Scopes form a tree at any moment; function values keep their
//! captured scope (and its parent chain) alive for the function's
//! lifetime, so frames are reference-counted rather than stack-owned.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use rulang_util::RuntimeError;

use crate::value::Value;

/// One binding frame with an optional parent.
pub struct Scope {
    vars: RefCell<IndexMap<String, Value>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    /// Creates a root scope with no parent.
    pub fn root() -> Rc<Scope> {
        Rc::new(Scope {
            vars: RefCell::new(IndexMap::new()),
            parent: None,
        })
    }

    /// Creates a child frame of `parent`.
    pub fn child(parent: &Rc<Scope>) -> Rc<Scope> {
        Rc::new(Scope {
            vars: RefCell::new(IndexMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// Binds `name` in this frame, shadowing any same-name binding in
    /// this or an outer frame.
    pub fn define(&self, name: &str, value: Value) {
        self.vars.borrow_mut().insert(name.to_string(), value);
    }

    /// Resolves `name` by walking toward the root.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => Err(RuntimeError::Name(name.to_string())),
        }
    }

    /// Rebinds `name` in the frame that defines it, walking toward the
    /// root. Fails if no frame defines it; assignment never creates a
    /// binding.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.vars.borrow_mut().get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(RuntimeError::Name(name.to_string())),
        }
    }
}
