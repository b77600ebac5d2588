//! Middleware driver and request dispatch.
//!
//! For each request: resolve the route, bind `req`/`res`/`next`/`db`
//! into a fresh child of the evaluator's root scope, run the global
//! middleware chain then the endpoint's own chain then the endpoint
//! body, and encode whatever the handler left in the response cell.
//!
//! A middleware continues the pipeline only by calling `next()`;
//! both `return` and plain completion stop it. Runtime errors become a
//! 500 with the error message in the body.

use std::rc::Rc;

use tracing::{debug, warn};

use rulang_eval::{next_native, Evaluator, Outcome, Scope};

use crate::http::{res_value, HttpRequest, HttpResponse, ResponseState};
use crate::registry::{AppRegistry, Route};
use crate::store::Store;

/// Drives handler execution for one loaded program.
pub struct Dispatcher {
    registry: Rc<AppRegistry>,
    evaluator: Evaluator,
    root: Rc<Scope>,
    store: Rc<Store>,
}

impl Dispatcher {
    /// Creates a dispatcher over a program that already ran its top-level
    /// statements against `registry` in `root`.
    pub fn new(registry: Rc<AppRegistry>, root: Rc<Scope>) -> Self {
        let evaluator = Evaluator::new(registry.clone());
        Self {
            registry,
            evaluator,
            root,
            store: Store::new(),
        }
    }

    /// Dispatches one request to the matching endpoint.
    pub fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        let (route, params) = match self.registry.find_route(request.method, &request.path) {
            Some(found) => found,
            None => {
                debug!(method = %request.method, path = %request.path, "no route");
                return HttpResponse::json_error(404, "not found");
            },
        };

        let state = ResponseState::new();

        // One scope per dispatch carries the host bindings; each body
        // runs in its own child frame so middleware locals stay local.
        let scope = Scope::child(&self.root);
        scope.define("req", request.value(&params));
        scope.define("res", res_value(&state));
        scope.define("next", next_native());
        scope.define("db", self.store.value());

        let mut chain = self.registry.global_chain();
        chain.extend(route.middlewares.iter().cloned());

        for name in &chain {
            let body = match self.registry.middleware(name) {
                Some(body) => body,
                None => {
                    warn!(name, "endpoint references unknown middleware");
                    return HttpResponse::json_error(
                        500,
                        &format!("unknown middleware `{}`", name),
                    );
                },
            };

            let frame = Scope::child(&scope);
            match self.evaluator.exec_block_in(&body, &frame) {
                Ok(Outcome::Next) => continue,
                Ok(Outcome::Returned(_)) | Ok(Outcome::Completed) => {
                    return state.borrow().finish();
                },
                Err(err) => {
                    warn!(name, error = %err, "middleware failed");
                    return HttpResponse::json_error(500, &err.to_string());
                },
            }
        }

        self.run_endpoint(&route, &scope, &state)
    }

    fn run_endpoint(
        &self,
        route: &Route,
        scope: &Rc<Scope>,
        state: &Rc<std::cell::RefCell<ResponseState>>,
    ) -> HttpResponse {
        let frame = Scope::child(scope);
        match self.evaluator.exec_block_in(&route.body, &frame) {
            Ok(_) => state.borrow().finish(),
            Err(err) => {
                warn!(pattern = %route.pattern, error = %err, "handler failed");
                HttpResponse::json_error(500, &err.to_string())
            },
        }
    }
}
