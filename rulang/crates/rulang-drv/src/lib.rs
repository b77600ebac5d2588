//! rulang-drv - Pipeline driver.
//!
//! Orchestrates the front-end phases in order:
//!
//! ```text
//! source text
//!      |
//!      v
//! [rulang-lex]  -> token list
//!      |
//!      v
//! [rulang-par]  -> Program (AST)
//!      |
//!      v
//! [rulang-sem]  -> compiled state tables
//! ```
//!
//! The result is a [`CompiledProgram`] ready for `rulang-eval`. The first
//! error in any phase aborts the pipeline and is returned as a
//! [`FrontendError`]; there is no recovery and no partial output.

use tracing::debug;

use rulang_eval::{Evaluator, Host, Scope};
use rulang_par::ast::Program;
use rulang_sem::StateTable;
use rulang_util::{FrontendError, RuntimeError};

use std::rc::Rc;

/// A parsed program plus its compiled state tables.
///
/// The AST and the tables are read-only after compilation and can be
/// executed any number of times against different scopes and hosts.
#[derive(Debug)]
pub struct CompiledProgram {
    pub program: Program,
    pub states: StateTable,
}

impl CompiledProgram {
    /// Runs the program's top-level statements against `host` in `root`.
    pub fn run(&self, host: Rc<dyn Host>, root: &Rc<Scope>) -> Result<(), RuntimeError> {
        Evaluator::new(host).run(&self.program, &self.states, root)
    }
}

/// Compiles `source` through the whole front end.
///
/// # Errors
///
/// The first [`FrontendError`] from any phase: lex, parse, or state
/// compilation.
pub fn compile(source: &str) -> Result<CompiledProgram, FrontendError> {
    let tokens = rulang_lex::tokenize(source)?;
    debug!(tokens = tokens.len(), "scanned source");

    let program = rulang_par::Parser::new(tokens).parse()?;
    debug!(statements = program.body.len(), "parsed program");

    let states = rulang_sem::compile_states(&program)?;
    debug!(machines = states.len(), "compiled state tables");

    Ok(CompiledProgram { program, states })
}
