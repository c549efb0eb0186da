//! Command-line interface for review-board
//!
//! Provides `audit`, `list` and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod audit;
mod list;
mod utils;

/// Audit review workbooks stored in Subversion and build a scored report
#[derive(Parser)]
#[command(name = "review-board")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every review document and write the report workbook
    Audit(audit::AuditArgs),

    /// List the review documents found under the roots without fetching them
    List(list::ListArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Audit(args) => audit::run(args),
        Commands::List(args) => list::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "review-board",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
