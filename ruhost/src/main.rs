//! `rulang` CLI - run, serve, or interactively explore Rulang programs.
//!
//! Uses clap for argument parsing and dispatches to the command handlers
//! in `ruhost::commands`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rulang_util::Diagnostic;
use ruhost::commands::{
    repl::run_repl,
    run::{run_run, RunArgs},
    serve::{run_serve, ServeArgs},
};
use ruhost::{Config, HostError};

/// Rulang - state-machine driven HTTP handlers
#[derive(Parser, Debug)]
#[command(name = "rulang")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run, serve, or interactively explore Rulang programs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true, env = "RULANG_VERBOSE")]
    verbose: bool,

    /// Path to configuration file (default: ./rulang.toml)
    #[arg(short, long, global = true, env = "RULANG_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "RULANG_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile and execute a program
    Run(RunCommand),

    /// Run a program and serve its endpoints over HTTP
    Serve(ServeCommand),

    /// Start an interactive session
    Repl,
}

/// Arguments for the run subcommand.
#[derive(Parser, Debug)]
struct RunCommand {
    /// Program file (.ru)
    file: PathBuf,
}

/// Arguments for the serve subcommand.
#[derive(Parser, Debug)]
struct ServeCommand {
    /// Program file (.ru)
    file: PathBuf,

    /// Port to bind, overriding config and the program's `server`
    /// declaration
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        },
    };

    if let Err(err) = init_logging(&cli, &config) {
        report(&err);
        std::process::exit(1);
    }

    if let Err(err) = execute_command(cli.command, &config) {
        report(&err);
        std::process::exit(1);
    }
}

/// Loads configuration from the explicit path or the default location.
fn load_config(cli: &Cli) -> Result<Config, HostError> {
    match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Initializes tracing. Precedence: `--verbose`, then the config file's
/// filter, then `info`.
fn init_logging(cli: &Cli, config: &Config) -> Result<(), HostError> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.log.as_deref().unwrap_or("info"))
    };

    let subscriber = fmt::layer()
        .with_ansi(!cli.no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| HostError::Config(format!("failed to initialize logging: {}", e)))
}

/// Dispatches to the selected command handler.
fn execute_command(command: Commands, config: &Config) -> Result<(), HostError> {
    match command {
        Commands::Run(args) => run_run(RunArgs { file: args.file }),
        Commands::Serve(args) => run_serve(
            ServeArgs {
                file: args.file,
                port: args.port,
            },
            config,
        ),
        Commands::Repl => run_repl(),
    }
}

/// Prints an error once. Front-end errors render as diagnostics with
/// their source position; everything else as a single line.
fn report(err: &HostError) {
    match err {
        HostError::Frontend(frontend) => eprintln!("{}", Diagnostic::from(frontend)),
        other => eprintln!("error: {}", other),
    }
}
