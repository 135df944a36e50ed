use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_common::DeckConfig;
use deck_core::{DeckError, ErrorReporter, GeminiAdapter, PresentationGenerator, Session};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deck")]
#[command(about = "AI-generated presentation on the burden of low back pain measured in DALYs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config file (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override model (e.g., gemini-3-pro-preview)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Override the presentation topic
    #[arg(long, global = true)]
    pub topic: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive presentation (default)
    Present,
    /// Generate one presentation and print it as JSON
    Generate {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the structured-output schema sent to the model
    Schema,
}

pub async fn run_cli() -> Result<ExitCode> {
    let mut cli = Cli::parse();

    match cli.command.take().unwrap_or(Commands::Present) {
        Commands::Schema => {
            let schema = serde_json::to_string_pretty(&deck_gemini::response_schema())?;
            println!("{schema}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { pretty } => {
            let (config, generator) = prepare(&cli)?;
            generate(generator.as_ref(), &config.topic, pretty).await
        }
        Commands::Present => {
            let (config, generator) = prepare(&cli)?;
            deck_tui::run_present(Session::new(generator, config.topic)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolve configuration, start logging and build the generator.
fn prepare(cli: &Cli) -> Result<(DeckConfig, Arc<dyn PresentationGenerator>)> {
    let config = resolve_config(cli)?;
    init_logging(&config.log_path(), cli.debug)?;
    info!(model = %config.model, has_key = config.has_api_key(), "Starting deck");

    let generator: Arc<dyn PresentationGenerator> = Arc::new(GeminiAdapter::from_config(&config)?);
    Ok((config, generator))
}

/// Defaults, then config file, then environment, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<DeckConfig> {
    let mut config = DeckConfig::load(cli.config.as_deref()).map_err(DeckError::from)?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(topic) = &cli.topic {
        config.topic = topic.clone();
    }
    Ok(config)
}

/// Log to a file so the terminal stays free for the presentation.
fn init_logging(path: &Path, debug: bool) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let default = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

async fn generate(generator: &dyn PresentationGenerator, topic: &str, pretty: bool) -> Result<ExitCode> {
    match generator.generate(topic).await {
        Ok(deck) => {
            let json = if pretty {
                serde_json::to_string_pretty(&deck)?
            } else {
                serde_json::to_string(&deck)?
            };
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let err = DeckError::from(err);
            error!(kind = ErrorReporter::kind(&err), error = %err, "Generation failed");
            eprintln!("{}", ErrorReporter::user_message(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
