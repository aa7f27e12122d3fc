//! CLI argument definitions for the tripsaber command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand};

/// tripsaber - Beat Saber to Audio Trip map converter
#[derive(Parser)]
#[command(name = "tripsaber")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert an extracted Beat Saber map into an Audio Trip song
    Convert {
        /// Extracted map directory (contains Info.dat)
        #[arg(short, long)]
        map_dir: String,

        /// Output root directory (default: Audio Trip's custom songs folder)
        #[arg(short, long)]
        out_root: Option<String>,

        /// JSON file with mapping config values
        #[arg(short, long)]
        config: Option<String>,

        /// Map hash to derive the song id from (default: hash of the map files)
        #[arg(long)]
        map_hash: Option<String>,

        /// Distance between the outermost column centres
        #[arg(long)]
        x_range: Option<f64>,

        /// Distance between the bottom and top row centres
        #[arg(long)]
        y_range: Option<f64>,

        /// Height of the bottom edge of the lattice
        #[arg(long)]
        y_min: Option<f64>,

        /// Horizontal jitter as a fraction of the column spacing
        #[arg(long)]
        x_wobble_factor: Option<f64>,

        /// Vertical jitter as a fraction of the row spacing
        #[arg(long)]
        y_wobble_factor: Option<f64>,

        /// Gem speed per unit of note jump speed
        #[arg(long)]
        note_speed_multiplier: Option<f64>,

        /// Largest beat subdivision denominator
        #[arg(long)]
        beats_per_measure: Option<u16>,

        /// Build the document without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show song metadata and note counts of a map directory
    Inspect {
        /// Extracted map directory (contains Info.dat)
        #[arg(short, long)]
        map_dir: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
