//! ruhost - Host runtime for Rulang programs.
//!
//! Everything outside the language core lives here: the application
//! registry behind the evaluator's host hooks, the router and middleware
//! driver, the in-memory CRUD store bound as `db`, the JSON boundary, a
//! thin sequential HTTP adapter, the REPL, and the `rulang` CLI built on
//! top of them.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod json;
pub mod registry;
pub mod repl;
pub mod store;

pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{HostError, Result};
pub use registry::AppRegistry;
pub use store::Store;
