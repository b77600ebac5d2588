//! Command handlers for the `rulang` CLI.

pub mod repl;
pub mod run;
pub mod serve;
