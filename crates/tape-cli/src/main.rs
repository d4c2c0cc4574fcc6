use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::sync::Mutex;

use tape_application::bootstrap;
use tape_core::generation::{code, generate};
use tape_core::state::Theme;
use tape_core::storage::LocalStorage;
use tape_infrastructure::paths::TapePaths;
use tape_infrastructure::training_export::export_training;
use tape_infrastructure::{ConfigService, FileLocalStorage, MemoryLocalStorage};

mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "tape")]
#[command(about = "Tape - describe a 3D object, get a 3D object", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive studio (default)
    Repl,
    /// Classify a prompt and print the generated object code
    Generate {
        /// The object description
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Write the training dataset files
    ExportTraining {
        /// Output directory (defaults to the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.get_config();

    let logs_dir = TapePaths::logs_dir().context("Failed to resolve log directory")?;
    let _log_guard = logging::init(&logs_dir, config.debug_logging)?;
    tracing::info!(provider = %config.ai_provider, "Starting tape");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let storage: Arc<dyn LocalStorage> = if cli.ephemeral {
                Arc::new(MemoryLocalStorage::new())
            } else {
                Arc::new(FileLocalStorage::new()?)
            };
            let studio = bootstrap(config, storage).await?;
            repl::run(Arc::new(Mutex::new(studio))).await?;
        }
        Commands::Generate { prompt } => {
            let prompt = prompt.join(" ");
            let (classification, descriptor) = generate(&prompt);
            let palette = render::Palette::for_theme(Theme::default());
            render::classification(&palette, &classification);
            println!();
            println!("{}", code::render_code(&descriptor));
        }
        Commands::ExportTraining { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => TapePaths::training_dir().context("Failed to resolve data directory")?,
            };
            let summary = export_training(&dir)?;
            println!(
                "{}",
                format!(
                    "Wrote {} examples to {} and {}",
                    summary.examples,
                    summary.training_data.display(),
                    summary.finetune_dataset.display()
                )
                .bright_green()
            );
        }
    }

    Ok(())
}
