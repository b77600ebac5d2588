//! rulang-eval - Tree-walking evaluator for Rulang.
//!
//! The evaluator walks a parsed [`rulang_par::ast::Program`] together with
//! the compiled state tables from `rulang-sem`. It owns the runtime value
//! domain, the lexically nested [`Scope`], the state-machine value
//! protocol, and request validation. HTTP-flavored statements are not
//! interpreted here: they are forwarded to a caller-supplied [`Host`],
//! which also receives all `print` output.
//!
//! Control flow for `return` and `next()` travels as explicit signals in
//! [`Flow`], never as errors, so the host's middleware driver can react
//! to them while real failures propagate as
//! [`rulang_util::RuntimeError`].

pub mod control;
pub mod host;
pub mod interp;
pub mod machine;
pub mod scope;
pub mod validate;
pub mod value;

pub use control::{EvalResult, Flow, Outcome};
pub use host::{next_native, Host, MemoryHost};
pub use interp::Evaluator;
pub use machine::StateInstance;
pub use scope::Scope;
pub use value::{NativeFn, Value};
