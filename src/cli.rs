use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Adaptive playback session manager")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a catalog's sources grouped and ordered by quality
    Rank {
        /// Catalog JSON file
        #[arg(required = true)]
        catalog: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a catalog's subtitles with duplicate labels removed
    Subtitles {
        /// Catalog JSON file
        #[arg(required = true)]
        catalog: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a catalog on a headless surface and print the final snapshot
    Play {
        /// Catalog JSON file
        #[arg(required = true)]
        catalog: PathBuf,

        /// External embed player offered when every source fails
        #[arg(long)]
        fallback_embed: Option<String>,

        /// How long to play before stopping
        #[arg(long, default_value = "5")]
        seconds: u64,

        /// Quality label to start with, overriding the saved preference
        #[arg(long)]
        quality: Option<String>,

        /// Keep preferences in memory only
        #[arg(long)]
        ephemeral: bool,

        /// Start paused regardless of the autoplay setting
        #[arg(long)]
        paused: bool,

        /// Output volume between 0.0 and 1.0
        #[arg(long)]
        volume: Option<f64>,
    },

    /// Fetch a catalog from the catalog service
    Fetch {
        /// TMDB id of the movie or show
        #[arg(long, required = true)]
        tmdb_id: u64,

        /// Season number (episodes only)
        #[arg(long, requires = "episode")]
        season: Option<u32>,

        /// Episode number (episodes only)
        #[arg(long, requires = "season")]
        episode: Option<u32>,

        /// Write the catalog here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Write a config file with default settings
    Init {
        /// Where to write the config
        #[arg(default_value = "marquee.toml")]
        path: PathBuf,

        /// Overwrite settings in an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}
