//! Binary entrypoint for quickpad.
use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use logging as logshared;
use tracing_subscriber::{fmt, prelude::*};

/// One-shot subcommands: `exec`, `parse` and `check`.
mod commands;
/// The resident hotkey loop.
mod run;

#[derive(Parser, Debug)]
#[command(name = "quickpad", about = "Quick-launch panel hotkeys and actions", version)]
/// Command-line interface for the `quickpad` binary.
struct Cli {
    /// Subcommand; defaults to `run`.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Register every panel hotkey and log presses until Ctrl-C.
    Run,
    /// Run one button's actions and exit.
    Exec {
        /// Panel index (0-based, file order)
        #[arg(long)]
        panel: usize,
        /// Button index within the panel (0-based)
        #[arg(long)]
        button: usize,
    },
    /// Parse a key combination and print its canonical form.
    Parse {
        /// Combination text, e.g. "Ctrl+Shift+T"
        combo: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load the configuration, decode every action and report problems.
    Check {
        /// Path to configuration file to check (defaults to the user config)
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let env_filter = logshared::env_filter_from_spec(&cli.log.spec());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time())
        .try_init()
        .ok();

    let code = match cli.command.unwrap_or(Command::Run) {
        Command::Parse { combo, json } => commands::parse(&combo, json),
        Command::Check { path } => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            commands::check(explicit)
        }
        Command::Exec { panel, button } => {
            with_config(cli.config.as_deref(), |cfg| commands::exec(cfg, panel, button))
        }
        Command::Run => with_config(cli.config.as_deref(), run::run),
    };
    process::exit(code);
}

/// Resolve and load the config, then hand it to `f`. Load errors are
/// printed and mapped to exit code 1.
fn with_config(explicit: Option<&Path>, f: impl FnOnce(config::Config) -> i32) -> i32 {
    let loaded = config::resolve_config_path(explicit).and_then(|p| config::load_from_path(&p));
    match loaded {
        Ok(cfg) => f(cfg),
        Err(e) => {
            eprintln!("{}", e.pretty());
            1
        }
    }
}
