//! `rulang run` - compile and execute a program's top-level statements.

use std::path::PathBuf;

use tracing::debug;

use rulang_eval::Scope;

use crate::error::Result;
use crate::registry::AppRegistry;

/// Arguments for the run command.
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Program file to execute.
    pub file: PathBuf,
}

/// Compiles and runs the program; print output goes to stdout.
pub fn run_run(args: RunArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)?;
    debug!(file = %args.file.display(), bytes = source.len(), "loaded program");

    let compiled = rulang_drv::compile(&source)?;

    let registry = AppRegistry::new();
    let root = Scope::root();
    compiled.run(registry, &root)?;
    Ok(())
}
