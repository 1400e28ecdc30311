use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use unimind_application::AppContext;
use unimind_application::bootstrap::load_config;
use unimind_infrastructure::UnimindPaths;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "unimind")]
#[command(about = "UniMind - AI study assistant for university students", long_about = None)]
struct Cli {
    /// Use this directory instead of ~/.config/unimind
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Analyze notes and images, then print the study summary
    Analyze {
        /// .txt or image files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Ask a one-off question
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show config locations and create the secret template if missing
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = UnimindPaths::new(cli.config_dir.as_deref());
    let config = load_config(&paths).await?;
    init_tracing(&config.log_level);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Config => commands::config::show(&paths).await?,
        command => {
            let context = AppContext::new(paths, config)?;
            let assistant = &context.assistant;
            match command {
                Commands::Analyze { paths } => commands::analyze::run(assistant, &paths).await?,
                Commands::Search { query } => {
                    commands::search::run(assistant, &query.join(" ")).await?
                }
                _ => commands::chat::run(assistant).await?,
            }
        }
    }

    Ok(())
}

/// Logs to stderr so diagnostics never interleave with chat output.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
