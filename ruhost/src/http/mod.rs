//! Thin HTTP adapter.
//!
//! The core fixes only the Value-to-host handoff; everything in this
//! module is wire plumbing: a minimal sequential HTTP/1.1 reader/writer,
//! path-pattern routing, and the `req`/`res` value construction handlers
//! consume.

pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use request::{read_request, HttpRequest};
pub use response::{res_value, HttpResponse, ResponseState};
pub use router::match_path;
