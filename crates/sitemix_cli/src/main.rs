//! sitemix CLI
//!
//! Command-line tools for moving site content alongside configuration.
//!
//! # Commands
//!
//! - `export` - Write snapshots of listed content into the sync directory
//! - `import` - Check staged content and apply the import ignore filter
//! - `generate` - Create listed content missing from the live site
//! - `ids` - Show or edit the content sync list
//! - `ignore-check` - Show which configuration the import ignore filter hides

mod commands;

use clap::{Parser, Subcommand};
use commands::SitePaths;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sitemix content synchronization tools.
#[derive(Parser)]
#[command(name = "sitemix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the active configuration
    #[arg(global = true, long, default_value = "config/active")]
    config: PathBuf,

    /// Directory holding the staged (sync) configuration
    #[arg(global = true, long, default_value = "config/sync")]
    sync: PathBuf,

    /// Directory holding the live content
    #[arg(global = true, long, default_value = "content")]
    content: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write snapshots of listed content into the sync directory
    Export {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check staged content and apply the import ignore filter
    Import {
        /// Report what the ignore filter would change without writing
        #[arg(short, long)]
        dry_run: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Create listed content that is missing from the live site
    Generate {
        /// Maximum attempts per identifier
        #[arg(short, long, default_value = "5")]
        max_attempts: u32,
    },

    /// Show or edit the content sync list
    Ids {
        #[command(subcommand)]
        action: IdsAction,
    },

    /// Show which configuration the import ignore filter hides
    IgnoreCheck {
        /// Configuration names to check (all when omitted)
        names: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum IdsAction {
    /// Print the sync list
    List,
    /// Add identifiers to the sync list
    Add {
        /// Identifiers to add
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Remove identifiers from the sync list
    Remove {
        /// Identifiers to remove
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Trim, de-duplicate and sort the sync list
    Normalize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let paths = SitePaths {
        config: cli.config,
        sync: cli.sync,
        content: cli.content,
    };

    match cli.command {
        Commands::Export { format } => commands::export::run(&paths, &format)?,
        Commands::Import { dry_run, format } => commands::import::run(&paths, dry_run, &format)?,
        Commands::Generate { max_attempts } => commands::generate::run(&paths, max_attempts)?,
        Commands::Ids { action } => match action {
            IdsAction::List => commands::ids::list(&paths)?,
            IdsAction::Add { ids } => commands::ids::add(&paths, &ids)?,
            IdsAction::Remove { ids } => commands::ids::remove(&paths, &ids)?,
            IdsAction::Normalize => commands::ids::normalize(&paths)?,
        },
        Commands::IgnoreCheck { names, format } => {
            commands::ignore_check::run(&paths, &names, &format)?
        }
        Commands::Version => {
            println!("sitemix CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("sitemix core v{}", sitemix_core::VERSION);
        }
    }

    Ok(())
}
