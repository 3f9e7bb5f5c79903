//! Where Is CLI
//!
//! Command-line interface for Where Is - remember where things are kept.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use whereis_core::capability::PhotoImporter;
use whereis_core::{Config, RecordStore};

mod commands;
mod logging;
mod output;
mod prompt;

use commands::record::{Capture, CaptureRequest, EditRequest};
use output::{Output, OutputFormat};
use prompt::TerminalPermissionPrompt;

#[derive(Parser)]
#[command(name = "whereis")]
#[command(about = "Where Is - Keep track of important items with ease")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer yes to confirmations and permission prompts
    #[arg(short, long, global = true)]
    yes: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new record
    #[command(alias = "new")]
    Add {
        /// Item name
        #[arg(short, long)]
        name: Option<String>,
        /// Where the item is kept
        #[arg(short, long)]
        description: Option<String>,
        #[command(flatten)]
        capture: CaptureArgs,
    },
    /// List records
    #[command(alias = "ls")]
    List {
        /// Only records whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show record details
    Show {
        /// Record ID (full or prefix)
        id: String,
    },
    /// Edit a record
    Edit {
        /// Record ID (full or prefix)
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        #[command(flatten)]
        capture: CaptureArgs,
        /// Remove the photo
        #[arg(long, conflicts_with = "photo")]
        clear_photo: bool,
        /// Remove the coordinates
        #[arg(long, conflicts_with = "lat")]
        clear_location: bool,
    },
    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID (full or prefix)
        id: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Args)]
struct CaptureArgs {
    /// Image file to attach as the record's photo
    #[arg(short, long)]
    photo: Option<PathBuf>,
    /// Latitude of the item's location
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude of the item's location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl From<CaptureArgs> for CaptureRequest {
    fn from(args: CaptureArgs) -> Self {
        Self {
            photo: args.photo,
            latitude: args.lat,
            longitude: args.lon,
        }
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, photos_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config, cli.verbose);

    let Some(command) = cli.command else {
        commands::entry::show(&output);
        return Ok(());
    };

    let store = RecordStore::open_with_config(&config);
    let prompt = TerminalPermissionPrompt::new(cli.yes);
    let capture = Capture {
        importer: PhotoImporter::new(config.photos_path()),
        prompt: &prompt,
    };

    match command {
        Commands::Add {
            name,
            description,
            capture: args,
        } => {
            commands::record::add(&store, name, description, &args.into(), &capture, &output)
                .await
        }
        Commands::List { search } => commands::record::list(&store, search, &output).await,
        Commands::Show { id } => commands::record::show(&store, id, &output).await,
        Commands::Edit {
            id,
            name,
            description,
            capture: args,
            clear_photo,
            clear_location,
        } => {
            let request = EditRequest {
                name,
                description,
                capture: args.into(),
                clear_photo,
                clear_location,
            };
            commands::record::edit(&store, id, request, &capture, &output).await
        }
        Commands::Delete { id } => commands::record::delete(&store, id, cli.yes, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
