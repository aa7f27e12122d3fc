//! Beat Saber map types.
//!
//! Only the fields a conversion reads are modelled; everything else in the
//! files is ignored on parse.

use serde::{Deserialize, Serialize};

/// A Beat Saber `Info.dat` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoFile {
    #[serde(rename = "_songName")]
    pub song_name: String,

    #[serde(rename = "_songSubName", default)]
    pub song_sub_name: String,

    #[serde(rename = "_songAuthorName")]
    pub song_author_name: String,

    #[serde(rename = "_levelAuthorName")]
    pub level_author_name: String,

    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: f64,

    #[serde(rename = "_previewStartTime")]
    pub preview_start_time: f64,

    #[serde(rename = "_previewDuration")]
    pub preview_duration: f64,

    /// Audio file name, relative to the map directory.
    #[serde(rename = "_songFilename")]
    pub song_filename: String,

    #[serde(rename = "_difficultyBeatmapSets")]
    pub difficulty_beatmap_sets: Vec<DifficultyBeatmapSet>,
}

impl InfoFile {
    /// Parses an info file from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses an info file from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Returns the difficulty set that gets converted (the first declared one).
    pub fn primary_set(&self) -> Option<&DifficultyBeatmapSet> {
        self.difficulty_beatmap_sets.first()
    }

    /// File name the audio is copied to next to the output document.
    pub fn output_song_filename(&self) -> String {
        format!(
            "{} - {} {}.ogg",
            self.song_name, self.song_author_name, self.song_sub_name
        )
    }
}

/// One characteristic (Standard, OneSaber, ...) and its difficulties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBeatmapSet {
    #[serde(rename = "_beatmapCharacteristicName", default)]
    pub characteristic_name: String,

    #[serde(rename = "_difficultyBeatmaps")]
    pub difficulty_beatmaps: Vec<DifficultyBeatmap>,
}

/// A declared difficulty within a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBeatmap {
    /// Display name ("Easy", "ExpertPlus", ...).
    #[serde(rename = "_difficulty")]
    pub difficulty: String,

    #[serde(rename = "_difficultyRank", default)]
    pub difficulty_rank: i64,

    #[serde(rename = "_beatmapFilename")]
    pub beatmap_filename: String,

    #[serde(rename = "_noteJumpMovementSpeed")]
    pub note_jump_movement_speed: f64,

    #[serde(rename = "_noteJumpStartBeatOffset", default)]
    pub note_jump_start_beat_offset: f64,
}

/// A per-difficulty beatmap file.
///
/// v3 files carry `colorNotes`, v2 files carry `_notes`. Both are optional so
/// that either layout parses; [`DifficultyFile::source_notes`] picks one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "colorNotes", default, skip_serializing_if = "Option::is_none")]
    pub color_notes: Option<Vec<ColorNote>>,

    #[serde(rename = "_notes", default, skip_serializing_if = "Option::is_none")]
    pub legacy_notes: Option<Vec<LegacyNote>>,
}

/// A v3 color note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorNote {
    /// Beat.
    pub b: f64,
    /// Lane column (0 = leftmost).
    pub x: i64,
    /// Lane row (0 = bottom).
    pub y: i64,
    /// Color (0 = left/red, 1 = right/blue).
    pub c: i64,
    /// Cut direction.
    #[serde(default)]
    pub d: i64,
    /// Angle offset.
    #[serde(default)]
    pub a: i64,
}

/// A v2 note. `_type` 0 and 1 are colored notes, 3 is a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyNote {
    #[serde(rename = "_time")]
    pub time: f64,

    #[serde(rename = "_lineIndex")]
    pub line_index: i64,

    #[serde(rename = "_lineLayer")]
    pub line_layer: i64,

    #[serde(rename = "_type")]
    pub note_type: i64,

    #[serde(rename = "_cutDirection", default)]
    pub cut_direction: i64,
}

/// A colored note, independent of the file layout it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceNote {
    pub beat: f64,
    pub lane_column: i64,
    pub lane_row: i64,
    pub color: i64,
}

impl From<&ColorNote> for SourceNote {
    fn from(note: &ColorNote) -> Self {
        Self {
            beat: note.b,
            lane_column: note.x,
            lane_row: note.y,
            color: note.c,
        }
    }
}

/// Notes pulled out of a difficulty file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedNotes {
    /// Colored notes, in file order.
    pub notes: Vec<SourceNote>,
    /// Entries that were not colored notes (v2 bombs and unknown types).
    pub skipped: usize,
}

impl DifficultyFile {
    /// Parses a difficulty file from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a difficulty file from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Returns the colored notes in file order, or `None` if the file has
    /// neither a `colorNotes` nor a `_notes` list.
    ///
    /// `colorNotes` wins when both are present.
    pub fn source_notes(&self) -> Option<ExtractedNotes> {
        if let Some(ref notes) = self.color_notes {
            return Some(ExtractedNotes {
                notes: notes.iter().map(SourceNote::from).collect(),
                skipped: 0,
            });
        }

        let legacy = self.legacy_notes.as_ref()?;
        let mut extracted = ExtractedNotes::default();
        for note in legacy {
            match note.note_type {
                0 | 1 => extracted.notes.push(SourceNote {
                    beat: note.time,
                    lane_column: note.line_index,
                    lane_row: note.line_layer,
                    color: note.note_type,
                }),
                _ => extracted.skipped += 1,
            }
        }
        Some(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_required_info_field_fails() {
        // No _beatsPerMinute
        let json = r#"{
            "_songName": "A",
            "_songAuthorName": "B",
            "_levelAuthorName": "C",
            "_previewStartTime": 0,
            "_previewDuration": 0,
            "_songFilename": "song.egg",
            "_difficultyBeatmapSets": []
        }"#;
        let err = InfoFile::from_json(json).unwrap_err();
        assert!(err.to_string().contains("_beatsPerMinute"));
    }

    #[test]
    fn test_sub_name_defaults_to_empty() {
        let json = r#"{
            "_songName": "A",
            "_songAuthorName": "B",
            "_levelAuthorName": "C",
            "_beatsPerMinute": 100,
            "_previewStartTime": 0,
            "_previewDuration": 0,
            "_songFilename": "song.egg",
            "_difficultyBeatmapSets": []
        }"#;
        let info = InfoFile::from_json(json).unwrap();
        assert_eq!(info.song_sub_name, "");
        assert!(info.primary_set().is_none());
        assert_eq!(info.output_song_filename(), "A - B .ogg");
    }

    #[test]
    fn test_legacy_notes_skip_bombs() {
        let json = r#"{
            "_version": "2.2.0",
            "_notes": [
                {"_time": 1.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 0, "_cutDirection": 1},
                {"_time": 1.5, "_lineIndex": 3, "_lineLayer": 1, "_type": 3, "_cutDirection": 0},
                {"_time": 2.0, "_lineIndex": 3, "_lineLayer": 2, "_type": 1, "_cutDirection": 8}
            ],
            "_obstacles": []
        }"#;
        let file = DifficultyFile::from_json(json).unwrap();
        let extracted = file.source_notes().unwrap();

        assert_eq!(extracted.skipped, 1);
        assert_eq!(
            extracted.notes,
            vec![
                SourceNote {
                    beat: 1.0,
                    lane_column: 0,
                    lane_row: 0,
                    color: 0
                },
                SourceNote {
                    beat: 2.0,
                    lane_column: 3,
                    lane_row: 2,
                    color: 1
                },
            ]
        );
    }

    #[test]
    fn test_color_notes_preferred_over_legacy() {
        let json = r#"{
            "colorNotes": [{"b": 3, "x": 1, "y": 1, "c": 1}],
            "_notes": [{"_time": 1.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 0}]
        }"#;
        let file = DifficultyFile::from_json(json).unwrap();
        let extracted = file.source_notes().unwrap();
        assert_eq!(extracted.notes.len(), 1);
        assert_eq!(extracted.notes[0].beat, 3.0);
    }

    #[test]
    fn test_no_note_list() {
        let file = DifficultyFile::from_json(r#"{"version": "3.0.0", "obstacles": []}"#).unwrap();
        assert!(file.source_notes().is_none());
    }

    #[test]
    fn test_color_note_without_color_fails() {
        let json = r#"{"colorNotes": [{"b": 1, "x": 0, "y": 0}]}"#;
        let err = DifficultyFile::from_json(json).unwrap_err();
        assert!(err.to_string().contains("`c`"), "{}", err);
    }
}
