//! `rulang repl` - interactive session on stdin/stdout.

use crate::error::Result;
use crate::repl::Repl;

/// Starts the REPL over the process's stdin and stdout.
pub fn run_repl() -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Repl::new().run(&mut stdin.lock(), &mut stdout.lock())
}
