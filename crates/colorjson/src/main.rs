//! colorjson CLI - syntax-highlighted JSON log lines for terminals.
//!
//! Every log line is compact JSON with ANSI colors; strip the colors and the
//! output parses as ordinary JSON.
//!
//! # Usage
//!
//! ```bash
//! # Emit a few sample events at debug level
//! colorjson demo --level debug
//!
//! # Colorize an existing JSON log
//! colorjson colorize app.jsonl
//! tail -f app.jsonl | colorjson colorize
//!
//! # View configuration
//! colorjson config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// colorjson - syntax-highlighted JSON log output for terminals.
#[derive(Parser, Debug)]
#[command(name = "colorjson")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "COLORJSON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Emit sample log events through a configured handler
    Demo(cli::demo::DemoArgs),

    /// Colorize plain JSON log lines from a file or stdin
    Colorize(cli::colorize::ColorizeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `colorjson config path`."
            );
            colorjson_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose);

    tracing::debug!(version = colorjson_core::VERSION, "colorjson starting");

    match cli.command {
        Commands::Demo(args) => cli::demo::execute(args, &config),
        Commands::Colorize(args) => cli::colorize::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()),
    }
}
