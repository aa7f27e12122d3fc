//! Per-difficulty choreography assembly.

use tripsaber_format::{
    ChoreographyData, ChoreographyHeader, DifficultyChoreography, OutputEvent, RationalBeatTime,
};

/// Choreography id written for every converted difficulty.
pub const CHOREOGRAPHY_ID: &str = "cust_beat_saber_map";

/// How far ahead of its time a gem spawns, in beats.
pub const SPAWN_AHEAD_BEATS: u64 = 8;

/// Gem collision radius.
pub const GEM_RADIUS: f64 = 1.0;

/// Hand radius as stored by the Audio Trip editor (an f32 widened to f64).
#[allow(clippy::excessive_precision)]
pub const HAND_RADIUS: f64 = 0.27000001072883608;

/// Gems only; no drums or ribbons required.
pub const REQUIRED_MODALITIES: u32 = 2;

/// Per-difficulty values that vary between difficulties.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyMeta {
    /// Display name, e.g. "Expert".
    pub name: String,
    /// Gem speed, already multiplied from the note jump speed.
    pub note_speed: f64,
}

/// Wraps an ordered event list into a difficulty record.
///
/// Events are kept exactly in the order given; consumers render in document
/// order, so nothing is re-sorted by time.
pub fn assemble_choreography(
    meta: &DifficultyMeta,
    events: Vec<OutputEvent>,
) -> DifficultyChoreography {
    DifficultyChoreography {
        header: ChoreographyHeader {
            id: CHOREOGRAPHY_ID.to_string(),
            descriptor: String::new(),
            name: meta.name.clone(),
            metadata: String::new(),
            spawn_ahead_time: RationalBeatTime::whole(SPAWN_AHEAD_BEATS),
            gem_speed: meta.note_speed,
            gem_radius: GEM_RADIUS,
            hand_radius: HAND_RADIUS,
            anim_clip_path: String::new(),
            build_version: String::new(),
            required_modalities: REQUIRED_MODALITIES,
            choreo_type: 0,
        },
        data: ChoreographyData { events },
    }
}
