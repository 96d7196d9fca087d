//! autograde CLI — the administrator- and scheduler-facing entry points.

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "autograde",
    version,
    about = "Answer-sheet autograder with collector reporting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the answer-key digest file from an instructor answer sheet
    Keygen {
        /// Path to the instructor answer sheet
        instructor_file: PathBuf,

        /// Where to write the key file (defaults to the configured path)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade the submitted answer sheet and report the score
    Grade {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Grade without delivering the report to the collector
        #[arg(long)]
        offline: bool,
    },

    /// Create a starter autograde.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("autograde=info".parse().unwrap()),
        )
        .init();

    // Usage errors exit 1; help and version are not errors.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let result = match cli.command {
        Commands::Keygen {
            instructor_file,
            output,
            config,
        } => commands::keygen::execute(instructor_file, output, config),
        Commands::Grade { config, offline } => commands::grade::execute(config, offline).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
