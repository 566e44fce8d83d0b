//! Trampcoach CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP gateway with the embedded frontend
//! - `ask`    — One-shot grounded question from the terminal
//! - `skills` — Inspect the loaded dataset or preview a match
//! - `doctor` — Diagnose credential and dataset health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "trampcoach",
    about = "Trampcoach — grounded trampoline coaching assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway and embedded frontend
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a single grounded question, streaming the answer to stdout
    Ask {
        /// The question to ask
        question: String,
    },

    /// List the skill dataset, or preview which skills a question matches
    Skills {
        /// Preview the skills this question would match
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Diagnose credential and dataset health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { question } => commands::ask::run(&question).await?,
        Commands::Skills { question } => commands::skills::run(question.as_deref()).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
