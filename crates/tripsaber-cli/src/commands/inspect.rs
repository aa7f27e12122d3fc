//! Inspect command implementation
//!
//! Prints what a map directory contains without converting it.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tripsaber_convert::{DirectoryPackage, SourcePackage};

use super::json_output::{DifficultyInspection, InspectOutput};

/// Run the inspect command
///
/// # Arguments
/// * `map_dir` - Extracted map directory
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every declared difficulty is readable, 1 otherwise
pub fn run(map_dir: &str, json_output: bool) -> Result<ExitCode> {
    let report = inspect(Path::new(map_dir))?;
    let all_readable = report.difficulties.iter().all(|d| d.error.is_none());

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(&report);
    }

    Ok(if all_readable {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(report: &InspectOutput) {
    println!(
        "{} {} {} - {}",
        "Song:".cyan().bold(),
        report.title,
        report.sub_title,
        report.artist
    );
    println!("{} {}", "Mapper:".dimmed(), report.mapper);
    println!("{} {}", "BPM:".dimmed(), report.bpm);
    println!("{} {}", "Audio:".dimmed(), report.song_filename);
    println!("{} {}", "Content hash:".dimmed(), report.content_hash);
    println!(
        "{} {} ({} difficulties)",
        "Set:".dimmed(),
        report.characteristic,
        report.difficulties.len()
    );

    for difficulty in &report.difficulties {
        match (&difficulty.notes, &difficulty.error) {
            (Some(notes), _) => {
                let skipped = if difficulty.skipped > 0 {
                    format!(", {} skipped", difficulty.skipped)
                } else {
                    String::new()
                };
                println!(
                    "  {} {} [{}]: {} notes{} (NJS {})",
                    "+".green(),
                    difficulty.name,
                    difficulty.filename,
                    notes,
                    skipped,
                    difficulty.note_jump_speed
                );
            }
            (None, error) => println!(
                "  {} {} [{}]: {}",
                "x".red(),
                difficulty.name,
                difficulty.filename,
                error.as_deref().unwrap_or("unreadable")
            ),
        }
    }
}

/// Collects song metadata and per-difficulty note counts.
///
/// Unreadable difficulties are reported, not fatal; a missing or invalid
/// `Info.dat` is.
pub fn inspect(map_dir: &Path) -> Result<InspectOutput> {
    let package = DirectoryPackage::open(map_dir)
        .with_context(|| format!("Failed to open map directory: {}", map_dir.display()))?;
    let info = package.info()?;

    let mut difficulties = Vec::new();
    let mut characteristic = String::new();
    if let Some(set) = info.primary_set() {
        characteristic = set.characteristic_name.clone();
        for beatmap in &set.difficulty_beatmaps {
            let mut entry = DifficultyInspection {
                name: beatmap.difficulty.clone(),
                filename: beatmap.beatmap_filename.clone(),
                note_jump_speed: beatmap.note_jump_movement_speed,
                notes: None,
                skipped: 0,
                error: None,
            };
            match package.load_difficulty(&beatmap.beatmap_filename) {
                Ok(file) => match file.source_notes() {
                    Some(extracted) => {
                        entry.notes = Some(extracted.notes.len());
                        entry.skipped = extracted.skipped;
                    }
                    None => entry.error = Some("no colorNotes or _notes list".to_string()),
                },
                Err(e) => entry.error = Some(e.to_string()),
            }
            difficulties.push(entry);
        }
    }

    // Hashing fails when a difficulty is missing; the listing above already
    // says which one.
    let content_hash = package
        .content_hash()
        .unwrap_or_else(|_| "unavailable".to_string());

    Ok(InspectOutput {
        title: info.song_name,
        sub_title: info.song_sub_name,
        artist: info.song_author_name,
        mapper: info.level_author_name,
        bpm: info.beats_per_minute,
        song_filename: info.song_filename,
        content_hash,
        characteristic,
        difficulties,
    })
}
