//! Host hook interface.
//!
//! The evaluator never performs I/O and never stores HTTP declarations.
//! Both go through a caller-supplied [`Host`]: registration hooks fire
//! synchronously while `run` walks the top-level statements, and `print`
//! output is delivered as already-stringified lines.

use std::cell::RefCell;
use std::rc::Rc;

use rulang_par::ast::{Block, HttpMethod};

use crate::control::Flow;
use crate::value::{NativeFn, Value};

/// Callbacks the evaluator invokes while executing a program.
///
/// Bodies are handed over as `Rc<Block>` because registries keep them
/// alive past the current `run` and execute them later per request.
pub trait Host {
    /// An `endpoint` declaration was evaluated.
    fn on_endpoint(&self, method: HttpMethod, path: &str, middlewares: &[String], body: Rc<Block>);

    /// A `middleware` declaration was evaluated.
    fn on_middleware(&self, name: &str, body: Rc<Block>);

    /// A top-level `use` statement was evaluated; names apply globally in
    /// the given order.
    fn on_use(&self, names: &[String]);

    /// A `server` declaration was evaluated. The port expression has
    /// already been checked to be a number.
    fn on_server(&self, port: f64);

    /// One line of `print` output.
    fn print(&self, text: &str);
}

/// Builds the `next` binding for a middleware invocation: a native that
/// raises [`Flow::Next`] to unwind to the host's middleware driver.
pub fn next_native() -> Value {
    Value::Native(NativeFn::new("next", |_args| Err(Flow::Next)))
}

/// An endpoint registration captured by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct EndpointRecord {
    pub method: HttpMethod,
    pub path: String,
    pub middlewares: Vec<String>,
    pub body: Rc<Block>,
}

/// In-memory [`Host`] that records everything it is told.
///
/// Used by tests and embedders that want to run a program and inspect
/// what it registered and printed.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub prints: RefCell<Vec<String>>,
    pub endpoints: RefCell<Vec<EndpointRecord>>,
    pub middlewares: RefCell<Vec<(String, Rc<Block>)>>,
    pub use_order: RefCell<Vec<String>>,
    pub ports: RefCell<Vec<f64>>,
}

impl MemoryHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// All print lines so far.
    pub fn printed(&self) -> Vec<String> {
        self.prints.borrow().clone()
    }
}

impl Host for MemoryHost {
    fn on_endpoint(
        &self,
        method: HttpMethod,
        path: &str,
        middlewares: &[String],
        body: Rc<Block>,
    ) {
        self.endpoints.borrow_mut().push(EndpointRecord {
            method,
            path: path.to_string(),
            middlewares: middlewares.to_vec(),
            body,
        });
    }

    fn on_middleware(&self, name: &str, body: Rc<Block>) {
        self.middlewares.borrow_mut().push((name.to_string(), body));
    }

    fn on_use(&self, names: &[String]) {
        self.use_order.borrow_mut().extend(names.iter().cloned());
    }

    fn on_server(&self, port: f64) {
        self.ports.borrow_mut().push(port);
    }

    fn print(&self, text: &str) {
        self.prints.borrow_mut().push(text.to_string());
    }
}
