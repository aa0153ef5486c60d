use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

mod config;
mod file_discovery;
mod orchestrators;
mod paths;
mod terminal;

use crate::config::{ConfigManager, get_config};
use crate::orchestrators::download_orchestrator::DownloadOrchestrator;
use crate::orchestrators::onboard_orchestrator::{OnboardOptions, OnboardOrchestrator};
use crate::orchestrators::upload_orchestrator::UploadOrchestrator;

#[derive(Parser)]
#[command(name = "labelsync")]
#[command(author, version, about = "Labelsync - move image-labeling work between your workstation and the labeling service", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a folder of images and onboard them into the dataset
    Onboard {
        /// Folder to walk for images
        folder: PathBuf,

        /// Include patterns (glob patterns, can be specified multiple times)
        #[arg(short = 'i', long = "include", value_name = "PATTERN")]
        include_patterns: Vec<String>,

        /// Exclude patterns (glob patterns, can be specified multiple times, overrides includes)
        #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
        exclude_patterns: Vec<String>,

        /// Don't use default image extensions when no include patterns are specified
        #[arg(long)]
        no_defaults: bool,
    },

    /// Check out a batch of images and materialize them for tagging
    Download {
        /// Number of images to check out (1-100, default from config)
        #[arg(short, long)]
        count: Option<u32>,
    },

    /// Submit the locally edited label document back to the service
    Upload,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Interactive setup for the service and storage settings
    Init {
        /// Reconfigure even if already set up
        #[arg(short, long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., tagging.image_count)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., tagging.image_count)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("labelsync_core", log::LevelFilter::Debug)
            .filter_module("labelsync_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Onboard {
            folder,
            include_patterns,
            exclude_patterns,
            no_defaults,
        } => {
            if !folder.is_dir() {
                anyhow::bail!("Folder not found: {}", folder.display());
            }

            let config = get_config().context("Failed to load configuration")?;
            let orchestrator = OnboardOrchestrator::new(config)
                .context("Failed to create onboard orchestrator")?;

            let options = OnboardOptions {
                include_patterns,
                exclude_patterns,
                use_defaults: !no_defaults,
            };

            orchestrator.onboard_folder(&folder, options).await?;
        }
        Commands::Download { count } => {
            let config = get_config().context("Failed to load configuration")?;

            // CLI count wins over the configured default
            let count = count.or(Some(config.tagging.image_count));

            let orchestrator = DownloadOrchestrator::new(config)
                .context("Failed to create download orchestrator")?;

            orchestrator.download(count).await?;
        }
        Commands::Upload => {
            let config = get_config().context("Failed to load configuration")?;
            let orchestrator =
                UploadOrchestrator::new(config).context("Failed to create upload orchestrator")?;

            orchestrator.upload().await?;
        }
        Commands::Config { command } => {
            config_command(command).await?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

async fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Init { force } => {
            config::interactive_init(force).await?;
        }
        ConfigCommand::Get { key } => match manager.get(&key) {
            Ok(value) => {
                println!("{value}");
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Set { key, value } => match manager.set(&key, &value) {
            Ok(()) => {
                eprintln!("{}", format!("Set {key} = {value}").green());
                eprintln!(
                    "Configuration saved to: {}",
                    manager.get_config_path().display()
                );
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::List => match manager.list() {
            Ok(items) => {
                eprintln!("{}", "Configuration:".bold().blue());
                eprintln!("Config file: {}", manager.get_config_path().display());
                eprintln!();

                let mut current_section = String::new();
                for (key, value) in items {
                    let section = key.split('.').next().unwrap_or("general").to_string();
                    if section != current_section {
                        eprintln!("[{}]", section.yellow());
                        current_section = section;
                    }

                    let display_key = key.split('.').skip(1).collect::<Vec<_>>().join(".");
                    eprintln!("  {} = {}", display_key.cyan(), value);
                }
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
