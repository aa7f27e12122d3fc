//! tripsaber CLI - Beat Saber to Audio Trip map conversion
//!
//! This binary provides commands for converting extracted Beat Saber maps
//! and inspecting them before conversion.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use tripsaber_cli::commands;
use tripsaber_cli::commands::convert::ConvertOptions;
use tripsaber_cli::config::MappingOverrides;
use tripsaber_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            map_dir,
            out_root,
            config,
            map_hash,
            x_range,
            y_range,
            y_min,
            x_wobble_factor,
            y_wobble_factor,
            note_speed_multiplier,
            beats_per_measure,
            dry_run,
            json,
        } => {
            let options = ConvertOptions {
                map_dir,
                out_root,
                config_path: config,
                map_hash,
                overrides: MappingOverrides {
                    x_range,
                    y_range,
                    y_min,
                    x_wobble_factor,
                    y_wobble_factor,
                    note_speed_multiplier,
                    beats_per_measure,
                },
                dry_run,
            };
            commands::convert::run(&options, json)
        }
        Commands::Inspect { map_dir, json } => commands::inspect::run(&map_dir, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
