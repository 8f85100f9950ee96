//! Lanai Trie - Main entrypoint.
//!
//! Loads configuration, initialises logging and applies operation scripts to
//! a prefix tree, printing one JSON outcome per line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lanai_trie_lib::config::{self, ConfigLoader, LanaiConfig, LogConfig};
use lanai_trie_lib::error::{ErrorContext, ErrorReporter, LanaiError, TracingErrorReporter};
use lanai_trie_lib::logging::init_logging;
use lanai_trie_lib::script::ScriptRunner;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// Command line arguments for Lanai Trie.
#[derive(Parser, Debug)]
#[clap(name = "Lanai Trie", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Apply an operation script to a fresh tree
    Run {
        /// Path to the script file
        #[clap(value_parser)]
        script: PathBuf,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Applies the script at `path`, printing each outcome as a JSON line as
/// soon as it is produced.
fn run_script(config: &LanaiConfig, path: &Path) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let mut runner = ScriptRunner::new(config.tree.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let applied = runner.run_with(&script, |outcome| -> anyhow::Result<()> {
        let line = serde_json::to_string(&outcome).map_err(LanaiError::from)?;
        writeln!(out, "{line}").context("Failed to write outcome")?;
        Ok(())
    })?;

    info!(operations = applied, nodes = runner.tree().node_count(), "Script applied");
    Ok(())
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command {
        Command::Run { script } => {
            let config = match config_loader.load() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    process::exit(1);
                }
            };
            init_logging(&config.log)?;

            if let Err(e) = run_script(&config, &script) {
                let context = ErrorContext::new(LanaiError::Custom(format!("{e:#}")), "script")
                    .with_details(script.display().to_string());
                TracingErrorReporter.report(context);
                process::exit(1);
            }
            Ok(())
        }
        Command::Validate => {
            init_logging(&LogConfig::default())?;
            info!("Validating configuration");
            match config_loader.load() {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");
            let default_config = LanaiConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(LanaiError::Io)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml).map_err(LanaiError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
