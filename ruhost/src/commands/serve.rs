//! `rulang serve` - run a program, then serve its endpoints over HTTP.

use std::path::PathBuf;

use tracing::{debug, warn};

use rulang_eval::Scope;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{HostError, Result};
use crate::http::server;
use crate::registry::AppRegistry;

/// Arguments for the serve command.
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Program file to serve.
    pub file: PathBuf,
    /// Port override; beats the config file and the program's `server`
    /// declaration.
    pub port: Option<u16>,
}

/// Runs the program and starts the sequential HTTP loop.
pub fn run_serve(args: ServeArgs, config: &Config) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)?;
    debug!(file = %args.file.display(), "loaded program");

    let compiled = rulang_drv::compile(&source)?;

    let registry = AppRegistry::new();
    let root = Scope::root();
    compiled.run(registry.clone(), &root)?;

    let port = args
        .port
        .or(config.port)
        .or_else(|| registry.port())
        .ok_or_else(|| {
            HostError::Config(
                "no port: pass --port, set it in rulang.toml, or declare `server` in the program"
                    .to_string(),
            )
        })?;

    if registry.route_count() == 0 {
        warn!("program registered no endpoints; every request will 404");
    }

    let dispatcher = Dispatcher::new(registry, root);
    server::serve(&dispatcher, port)
}
