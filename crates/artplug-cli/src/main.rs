//! Artplug CLI - Source and selector inspector
//!
//! Features:
//! - Source detection (HLS manifest vs YouTube URL / id)
//! - YouTube embed options preview
//! - Quality / audio selector preview from a stream snapshot

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// Artplug CLI - Artplayer source toolkit
#[derive(Parser)]
#[command(name = "artplug")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Inspect sources and selectors for the Artplayer plugins", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect which plugin handles a source
    Probe {
        /// Source URL or bare YouTube video id
        input: String,
    },

    /// Print the YouTube player options for a source
    Embed {
        /// YouTube URL or bare video id
        input: String,

        /// Start playback once the embed is ready
        #[arg(short, long)]
        autoplay: bool,
    },

    /// Build the quality and audio selectors from a stream snapshot
    Selectors {
        /// JSON file with `levels`, `currentLevel`, `audioTracks`, `audioTrack`
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr);
    if output::OutputFormat::from(cli.format.as_str()) == output::OutputFormat::Json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    artplug_core::init();

    match cli.command {
        Commands::Probe { input } => {
            commands::probe(&input, &cli.format)?;
        }
        Commands::Embed { input, autoplay } => {
            commands::embed(&input, autoplay, &cli.format)?;
        }
        Commands::Selectors { snapshot } => {
            commands::selectors(&snapshot, &cli.format)?;
        }
    }

    Ok(())
}
