//! Convert command implementation
//!
//! Converts an extracted Beat Saber map directory into an Audio Trip song.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tripsaber_convert::{
    build_document_from_info, write_outputs, DirectoryPackage, OutputLayout, SourcePackage,
};
use tripsaber_format::{OutputDocument, SongIdentity};

use super::json_output::{ConvertOutput, DifficultySummary};
use crate::config::{load_mapping_config, resolve_out_root, MappingOverrides};

/// Options for one `convert` invocation.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extracted map directory (contains `Info.dat`)
    pub map_dir: String,
    /// Output root; defaults to Audio Trip's songs folder
    pub out_root: Option<String>,
    /// Optional JSON mapping config file
    pub config_path: Option<String>,
    /// Map hash to derive the song identity from; defaults to the content hash
    pub map_hash: Option<String>,
    pub overrides: MappingOverrides,
    /// Build the document but write nothing
    pub dry_run: bool,
}

/// Everything a successful conversion produced.
#[derive(Debug)]
pub struct ConvertReport {
    pub map_hash: String,
    pub identity: SongIdentity,
    pub document: OutputDocument,
    /// Path of the written `.ats`, or where it would have gone on a dry run.
    pub document_path: PathBuf,
    pub written: bool,
}

/// Run the convert command
///
/// # Arguments
/// * `options` - Input, output, and mapping options
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if converted, 1 on failure
pub fn run(options: &ConvertOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

fn run_human(options: &ConvertOptions) -> Result<ExitCode> {
    println!("{} {}", "Converting:".cyan().bold(), options.map_dir);

    let report = convert(options)?;
    let metadata = &report.document.metadata;

    println!(
        "{} {} - {}",
        "Song:".dimmed(),
        metadata.artist,
        metadata.title
    );
    println!("{} {}", "Song ID:".dimmed(), &report.identity.song_id[..16]);
    for choreo in report.document.difficulties() {
        println!(
            "  {} {} ({} events, gem speed {:.2})",
            "+".green(),
            choreo.header.name,
            choreo.events().len(),
            choreo.header.gem_speed
        );
    }

    if report.written {
        println!(
            "{} {}",
            "Wrote:".green().bold(),
            report.document_path.display()
        );
    } else {
        println!(
            "{} {} (dry run, nothing written)",
            "Would write:".yellow().bold(),
            report.document_path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(options: &ConvertOptions) -> Result<ExitCode> {
    let (output, code) = match convert(options) {
        Ok(report) => (success_output(&report), ExitCode::SUCCESS),
        Err(e) => (
            ConvertOutput::failure(format!("{:#}", e), options.dry_run),
            ExitCode::from(1),
        ),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(code)
}

fn success_output(report: &ConvertReport) -> ConvertOutput {
    ConvertOutput {
        success: true,
        song_id: Some(report.identity.song_id.clone()),
        seed: Some(report.identity.seed),
        map_hash: Some(report.map_hash.clone()),
        difficulties: report
            .document
            .difficulties()
            .iter()
            .map(|c| DifficultySummary {
                name: c.header.name.clone(),
                events: c.events().len(),
                gem_speed: c.header.gem_speed,
            })
            .collect(),
        output_path: report
            .written
            .then(|| report.document_path.display().to_string()),
        dry_run: !report.written,
        error: None,
    }
}

/// Converts a map directory and, unless dry-running, writes the outputs.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport> {
    let map_dir = Path::new(&options.map_dir);
    let package = DirectoryPackage::open(map_dir)
        .with_context(|| format!("Failed to open map directory: {}", map_dir.display()))?;

    let config = load_mapping_config(
        options.config_path.as_deref().map(Path::new),
        &options.overrides,
    )?;

    let map_hash = match &options.map_hash {
        Some(hash) => hash.clone(),
        None => package
            .content_hash()
            .context("Failed to hash map contents")?,
    };
    let identity =
        SongIdentity::derive(&map_hash, &config).context("Failed to derive song identity")?;
    log::info!("song id {} (seed {})", identity.song_id, identity.seed);

    let info = package
        .info()
        .with_context(|| format!("Failed to read map info: {}", map_dir.display()))?;
    let document = build_document_from_info(&package, &info, &config, &identity)
        .with_context(|| format!("Failed to convert map: {}", map_dir.display()))?;

    let layout = OutputLayout::for_song(&info);
    let out_root = resolve_out_root(options.out_root.as_deref())?;

    let (document_path, written) = if options.dry_run {
        (layout.document_path(&out_root), false)
    } else {
        let audio_source = package.resolve(&info.song_filename)?;
        let path = write_outputs(&document, &layout, &out_root, &audio_source)
            .with_context(|| format!("Failed to write outputs to {}", out_root.display()))?;
        (path, true)
    };

    Ok(ConvertReport {
        map_hash,
        identity,
        document,
        document_path,
        written,
    })
}
