//! Audio Trip choreography types.
//!
//! Field names follow the `.ats` JSON layout exactly, so serialization order
//! is the struct declaration order and output is stable across runs.

use serde::{Deserialize, Serialize};

/// Gem type written to an event's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EventType {
    /// Left-hand gem.
    LeftGem,
    /// Right-hand gem.
    RightGem,
}

impl EventType {
    /// Returns the numeric code used in `.ats` files.
    pub fn code(&self) -> u8 {
        match self {
            EventType::LeftGem => 1,
            EventType::RightGem => 2,
        }
    }
}

impl From<EventType> for u8 {
    fn from(value: EventType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for EventType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EventType::LeftGem),
            2 => Ok(EventType::RightGem),
            other => Err(format!("unsupported event type: {}", other)),
        }
    }
}

/// An exact musical time: `beat + numerator / denominator`.
///
/// The fraction is proper and in lowest terms; a whole beat is `0/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalBeatTime {
    pub beat: u64,
    pub numerator: u32,
    pub denominator: u32,
}

impl RationalBeatTime {
    /// A time on a whole beat.
    pub fn whole(beat: u64) -> Self {
        Self {
            beat,
            numerator: 0,
            denominator: 1,
        }
    }

    /// Returns the time as a floating beat count.
    pub fn as_f64(&self) -> f64 {
        self.beat as f64 + self.numerator as f64 / self.denominator as f64
    }
}

/// A point in Audio Trip space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One converted note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub has_guide: bool,
    pub time: RationalBeatTime,
    pub beat_division: u32,
    pub position: Position,
    pub sub_positions: Vec<Position>,
    #[serde(rename = "broadcastEventID")]
    pub broadcast_event_id: u32,
}

impl OutputEvent {
    /// Creates a gem event with the fixed subordinate fields.
    pub fn gem(event_type: EventType, time: RationalBeatTime, position: Position) -> Self {
        Self {
            event_type,
            has_guide: false,
            time,
            beat_division: 2,
            position,
            sub_positions: Vec::new(),
            broadcast_event_id: 0,
        }
    }
}

/// Per-difficulty header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreographyHeader {
    pub id: String,
    pub descriptor: String,
    /// Difficulty display name.
    pub name: String,
    pub metadata: String,
    pub spawn_ahead_time: RationalBeatTime,
    pub gem_speed: f64,
    pub gem_radius: f64,
    pub hand_radius: f64,
    pub anim_clip_path: String,
    pub build_version: String,
    pub required_modalities: u32,
    pub choreo_type: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoreographyData {
    pub events: Vec<OutputEvent>,
}

/// One difficulty's choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyChoreography {
    pub header: ChoreographyHeader,
    pub data: ChoreographyData,
}

impl DifficultyChoreography {
    /// Events in document order.
    pub fn events(&self) -> &[OutputEvent] {
        &self.data.events
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoreographyList {
    pub list: Vec<DifficultyChoreography>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorId {
    #[serde(rename = "platformID")]
    pub platform_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Unity asset reference; always zeroed for custom songs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Koreography {
    #[serde(rename = "m_FileID")]
    pub file_id: i64,
    #[serde(rename = "m_PathID")]
    pub path_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempoSection {
    pub start_time_in_seconds: f64,
    pub beats_per_measure: u16,
    pub beats_per_minute: f64,
    pub does_start_new_measure: bool,
}

/// Song-level metadata of an `.ats` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    pub custom: bool,
    #[serde(rename = "authorID")]
    pub author_id: AuthorId,
    #[serde(rename = "songID")]
    pub song_id: String,
    pub title: String,
    pub artist: String,
    pub koreography: Koreography,
    pub descriptor: String,
    pub scene_name: String,
    #[serde(rename = "avgBPM")]
    pub avg_bpm: f64,
    pub tempo_sections: Vec<TempoSection>,
    pub song_event_tracks: Vec<serde_json::Value>,
    pub song_filename: String,
    pub first_beat_time_in_seconds: f64,
    pub song_short_start_time_in_seconds: f64,
    pub song_short_stop_time_in_seconds: f64,
    pub song_short_length_in_seconds: f64,
    pub song_start_fade_time: f64,
    pub song_end_fade_time: f64,
    pub preview_start_in_seconds: f64,
    pub preview_duration_in_seconds: f64,
    pub song_start_buffer_in_seconds: f64,
    #[serde(rename = "choreoJSONs")]
    pub choreo_jsons: Vec<serde_json::Value>,
    pub anim_clips: Vec<serde_json::Value>,
    pub speed: f64,
    pub quantize_size: f64,
    pub include_in_arcades: bool,
    pub supported_modality_sets: u32,
    #[serde(rename = "drumMedSFX")]
    pub drum_med_sfx: String,
    #[serde(rename = "drumMaxSFX")]
    pub drum_max_sfx: String,
    pub song_end_time_in_seconds: f64,
    pub song_full_length_in_seconds: f64,
}

/// A complete `.ats` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub metadata: SongMetadata,
    pub choreographies: ChoreographyList,
}

impl OutputDocument {
    /// Parses a document from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the document to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the document to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Difficulty records in document order.
    pub fn difficulties(&self) -> &[DifficultyChoreography] {
        &self.choreographies.list
    }

    /// Total number of events across all difficulties.
    pub fn event_count(&self) -> usize {
        self.choreographies
            .list
            .iter()
            .map(|c| c.data.events.len())
            .sum()
    }
}
