//! Application registry - the concrete [`Host`] behind a running program.
//!
//! Collects everything HTTP-flavored statements declare: routes in
//! declaration order, middleware bodies by name, the global `use` chain,
//! and the server port. Print output goes to stdout.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use rulang_eval::Host;
use rulang_par::ast::{Block, HttpMethod};

use crate::http::match_path;

/// One registered endpoint.
#[derive(Clone)]
pub struct Route {
    pub method: HttpMethod,
    pub pattern: String,
    pub middlewares: Vec<String>,
    pub body: Rc<Block>,
}

/// Registry of routes, middlewares, and server settings for one program.
#[derive(Default)]
pub struct AppRegistry {
    routes: RefCell<Vec<Route>>,
    middlewares: RefCell<FxHashMap<String, Rc<Block>>>,
    global_use: RefCell<Vec<String>>,
    port: Cell<Option<f64>>,
}

impl AppRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Declared server port, when valid for TCP.
    pub fn port(&self) -> Option<u16> {
        let port = self.port.get()?;
        if port >= 1.0 && port <= u16::MAX as f64 && port.fract() == 0.0 {
            Some(port as u16)
        } else {
            None
        }
    }

    /// Middleware body by name.
    pub fn middleware(&self, name: &str) -> Option<Rc<Block>> {
        self.middlewares.borrow().get(name).cloned()
    }

    /// Globally applied middleware names, in `use` order.
    pub fn global_chain(&self) -> Vec<String> {
        self.global_use.borrow().clone()
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.routes.borrow().len()
    }

    /// First registered route matching `method` and `path`, plus its
    /// captured parameters.
    pub fn find_route(
        &self,
        method: HttpMethod,
        path: &str,
    ) -> Option<(Route, IndexMap<String, String>)> {
        for route in self.routes.borrow().iter() {
            if route.method != method {
                continue;
            }
            if let Some(params) = match_path(&route.pattern, path) {
                return Some((route.clone(), params));
            }
        }
        None
    }
}

impl Host for AppRegistry {
    fn on_endpoint(
        &self,
        method: HttpMethod,
        path: &str,
        middlewares: &[String],
        body: Rc<Block>,
    ) {
        debug!(%method, path, middlewares = middlewares.len(), "registered endpoint");
        self.routes.borrow_mut().push(Route {
            method,
            pattern: path.to_string(),
            middlewares: middlewares.to_vec(),
            body,
        });
    }

    fn on_middleware(&self, name: &str, body: Rc<Block>) {
        debug!(name, "registered middleware");
        self.middlewares.borrow_mut().insert(name.to_string(), body);
    }

    fn on_use(&self, names: &[String]) {
        debug!(?names, "applied global middleware");
        self.global_use.borrow_mut().extend(names.iter().cloned());
    }

    fn on_server(&self, port: f64) {
        debug!(port, "declared server port");
        self.port.set(Some(port));
    }

    fn print(&self, text: &str) {
        println!("{}", text);
    }
}
