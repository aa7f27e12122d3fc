//! Song-level document build.
//!
//! A document is built in one pass: read the package info, convert every
//! difficulty of the first difficulty set in declared order, then attach the
//! song metadata. One [`JitterStream`] is seeded per document and shared by
//! all of its difficulties.

use log::{debug, info, warn};
use tripsaber_format::{
    AuthorId, ChoreographyList, DifficultyBeatmap, DifficultyFile, InfoFile, Koreography,
    MappingConfig, OutputDocument, SongIdentity, SongMetadata, TempoSection,
};

use crate::choreography::{assemble_choreography, DifficultyMeta};
use crate::error::ConvertError;
use crate::layout::LaneLayout;
use crate::rng::JitterStream;
use crate::transform::transform_note;

/// Platform id written into `authorID` for converted songs.
pub const PLATFORM_ID: &str = "OC";

/// Environment scene converted songs play in.
pub const SCENE_NAME: &str = "Universal";

/// Start times of the two tempo sections, in seconds.
pub const TEMPO_SECTION_STARTS: [(f64, bool); 2] = [(4.0, false), (4.001, true)];

/// Quantize size as stored by the Audio Trip editor (an f32 widened to f64).
#[allow(clippy::excessive_precision)]
pub const QUANTIZE_SIZE: f64 = 0.10000000149011612;

/// Modality sets the song supports (gems only).
pub const SUPPORTED_MODALITY_SETS: u32 = 2;

/// Read access to an extracted map package.
///
/// The document builder only ever reads through this trait, so packages can
/// live on disk, in memory, or anywhere else.
pub trait SourcePackage {
    /// Parses the package's `Info.dat`.
    fn info(&self) -> Result<InfoFile, ConvertError>;

    /// Loads a difficulty file declared in the info file.
    fn load_difficulty(&self, filename: &str) -> Result<DifficultyFile, ConvertError>;

    /// Duration in seconds of the audio file declared in the info file.
    fn audio_duration(&self, song_filename: &str) -> Result<f64, ConvertError>;
}

/// Builds the complete output document for a package.
///
/// # Arguments
/// * `package` - The source map
/// * `config` - Mapping configuration, validated before anything is read
/// * `identity` - Song id and jitter seed for this conversion
///
/// # Errors
/// Any failure aborts the whole build; no partial document is returned.
pub fn build_document<P: SourcePackage + ?Sized>(
    package: &P,
    config: &MappingConfig,
    identity: &SongIdentity,
) -> Result<OutputDocument, ConvertError> {
    config.validate()?;
    let info = package.info()?;
    build_from_info(package, &info, config, identity)
}

/// Builds the output document from an info file the caller already parsed.
///
/// Same as [`build_document`], except the package's `Info.dat` is not read
/// again; `info` must belong to `package`.
pub fn build_document_from_info<P: SourcePackage + ?Sized>(
    package: &P,
    info: &InfoFile,
    config: &MappingConfig,
    identity: &SongIdentity,
) -> Result<OutputDocument, ConvertError> {
    config.validate()?;
    build_from_info(package, info, config, identity)
}

fn build_from_info<P: SourcePackage + ?Sized>(
    package: &P,
    info: &InfoFile,
    config: &MappingConfig,
    identity: &SongIdentity,
) -> Result<OutputDocument, ConvertError> {
    check_info(info)?;
    let set = info.primary_set().ok_or_else(|| {
        ConvertError::MalformedSource("_difficultyBeatmapSets is empty".to_string())
    })?;
    if set.difficulty_beatmaps.is_empty() {
        return Err(ConvertError::MalformedSource(format!(
            "difficulty set '{}' declares no difficulties",
            set.characteristic_name
        )));
    }

    let song_length = package.audio_duration(&info.song_filename)?;

    let layout = LaneLayout::new(config);
    let mut jitter = JitterStream::new(identity.seed);
    let mut list = Vec::with_capacity(set.difficulty_beatmaps.len());

    for beatmap in &set.difficulty_beatmaps {
        let file = package
            .load_difficulty(&beatmap.beatmap_filename)
            .map_err(|e| missing_difficulty(beatmap, e.to_string()))?;
        let extracted = file
            .source_notes()
            .ok_or_else(|| missing_difficulty(beatmap, "no colorNotes or _notes list"))?;
        if extracted.skipped > 0 {
            warn!(
                "{}: skipped {} non-colored notes",
                beatmap.difficulty, extracted.skipped
            );
        }

        let events = extracted
            .notes
            .iter()
            .map(|note| transform_note(note, config, &layout, &mut jitter))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "{} ({}): {} events",
            beatmap.difficulty,
            beatmap.beatmap_filename,
            events.len()
        );

        let meta = DifficultyMeta {
            name: beatmap.difficulty.clone(),
            note_speed: beatmap.note_jump_movement_speed * config.note_speed_multiplier,
        };
        list.push(assemble_choreography(&meta, events));
    }

    let document = OutputDocument {
        metadata: song_metadata(info, config, identity, song_length),
        choreographies: ChoreographyList { list },
    };
    info!(
        "built '{}' with {} difficulties and {} events",
        info.song_name,
        document.difficulties().len(),
        document.event_count()
    );
    Ok(document)
}

/// Builds the song-level metadata block.
///
/// Fields the converter has no source for are zeroed or left empty.
pub fn song_metadata(
    info: &InfoFile,
    config: &MappingConfig,
    identity: &SongIdentity,
    song_length: f64,
) -> SongMetadata {
    let tempo_sections = TEMPO_SECTION_STARTS
        .iter()
        .map(|&(start, new_measure)| TempoSection {
            start_time_in_seconds: start,
            beats_per_measure: config.beats_per_measure,
            beats_per_minute: info.beats_per_minute,
            does_start_new_measure: new_measure,
        })
        .collect();

    SongMetadata {
        custom: true,
        author_id: AuthorId {
            platform_id: PLATFORM_ID.to_string(),
            display_name: info.level_author_name.clone(),
        },
        song_id: identity.song_id.clone(),
        title: info.song_name.clone(),
        artist: info.song_author_name.clone(),
        koreography: Koreography::default(),
        descriptor: String::new(),
        scene_name: SCENE_NAME.to_string(),
        avg_bpm: info.beats_per_minute,
        tempo_sections,
        song_event_tracks: Vec::new(),
        song_filename: info.output_song_filename(),
        first_beat_time_in_seconds: 0.0,
        song_short_start_time_in_seconds: 0.0,
        song_short_stop_time_in_seconds: 0.0,
        song_short_length_in_seconds: 0.0,
        song_start_fade_time: 0.0,
        song_end_fade_time: 0.0,
        preview_start_in_seconds: info.preview_start_time,
        preview_duration_in_seconds: info.preview_duration,
        song_start_buffer_in_seconds: 0.0,
        choreo_jsons: Vec::new(),
        anim_clips: Vec::new(),
        speed: 0.0,
        quantize_size: QUANTIZE_SIZE,
        include_in_arcades: true,
        supported_modality_sets: SUPPORTED_MODALITY_SETS,
        drum_med_sfx: String::new(),
        drum_max_sfx: String::new(),
        song_end_time_in_seconds: song_length,
        song_full_length_in_seconds: song_length,
    }
}

fn check_info(info: &InfoFile) -> Result<(), ConvertError> {
    if !info.beats_per_minute.is_finite() || info.beats_per_minute <= 0.0 {
        return Err(ConvertError::MalformedSource(format!(
            "_beatsPerMinute must be positive, got {}",
            info.beats_per_minute
        )));
    }
    if info.song_filename.is_empty() {
        return Err(ConvertError::MalformedSource(
            "_songFilename is empty".to_string(),
        ));
    }
    Ok(())
}

fn missing_difficulty(beatmap: &DifficultyBeatmap, reason: impl Into<String>) -> ConvertError {
    ConvertError::MissingDifficultyData {
        difficulty: beatmap.difficulty.clone(),
        filename: beatmap.beatmap_filename.clone(),
        reason: reason.into(),
    }
}
