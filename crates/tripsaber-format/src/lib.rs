//! tripsaber map format library
//!
//! This crate provides the data types on both sides of a tripsaber conversion,
//! the mapping configuration that parameterizes it, and the canonical hashing
//! used to derive song identities and jitter seeds.
//!
//! # Overview
//!
//! - **Source side**: Beat Saber `Info.dat` and per-difficulty `.dat` files
//!   (v3 `colorNotes` and v2 `_notes` layouts)
//! - **Destination side**: Audio Trip `.ats` choreography documents
//!   (`metadata` plus `choreographies.list`)
//! - **Identity**: BLAKE3 over canonical JSON (RFC 8785) of the map hash and
//!   the active [`MappingConfig`]
//!
//! # Example
//!
//! ```
//! use tripsaber_format::{MappingConfig, SongIdentity};
//!
//! let config = MappingConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let identity = SongIdentity::derive("4d2be", &config).unwrap();
//! assert_eq!(identity.song_id.len(), 64);
//!
//! // Same inputs, same identity
//! let again = SongIdentity::derive("4d2be", &config).unwrap();
//! assert_eq!(identity, again);
//! ```
//!
//! # Modules
//!
//! - [`source`]: Beat Saber map types
//! - [`choreo`]: Audio Trip choreography types
//! - [`config`]: Mapping configuration and its validation
//! - [`hash`]: Canonical hashing and seed derivation

pub mod choreo;
pub mod config;
pub mod hash;
pub mod source;

pub use choreo::{
    AuthorId, ChoreographyData, ChoreographyHeader, ChoreographyList, DifficultyChoreography,
    EventType, Koreography, OutputDocument, OutputEvent, Position, RationalBeatTime,
    SongMetadata, TempoSection,
};
pub use config::{ConfigError, MappingConfig};
pub use hash::{
    blake3_hash, canonical_value_hash, canonicalize_json, seed_from_bytes, seed_from_str,
    SongIdentity,
};
pub use source::{
    ColorNote, DifficultyBeatmap, DifficultyBeatmapSet, DifficultyFile, ExtractedNotes, InfoFile,
    LegacyNote, SourceNote,
};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Parse a trimmed-down Info.dat as shipped by BeatSaver maps.
    #[test]
    fn test_parse_info_and_difficulty() {
        let info = r#"{
            "_version": "2.0.0",
            "_songName": "Alice",
            "_songSubName": "",
            "_songAuthorName": "1-800",
            "_levelAuthorName": "mapper",
            "_beatsPerMinute": 128,
            "_previewStartTime": 12.5,
            "_previewDuration": 10,
            "_songFilename": "song.egg",
            "_coverImageFilename": "cover.jpg",
            "_difficultyBeatmapSets": [
                {
                    "_beatmapCharacteristicName": "Standard",
                    "_difficultyBeatmaps": [
                        {
                            "_difficulty": "Easy",
                            "_difficultyRank": 1,
                            "_beatmapFilename": "EasyStandard.dat",
                            "_noteJumpMovementSpeed": 10,
                            "_noteJumpStartBeatOffset": 0
                        }
                    ]
                }
            ]
        }"#;

        let info = InfoFile::from_json(info).expect("should parse");
        assert_eq!(info.song_name, "Alice");
        assert_eq!(info.beats_per_minute, 128.0);
        let set = info.primary_set().expect("should have a set");
        assert_eq!(set.difficulty_beatmaps.len(), 1);
        assert_eq!(set.difficulty_beatmaps[0].beatmap_filename, "EasyStandard.dat");

        let difficulty = r#"{
            "version": "3.2.0",
            "colorNotes": [
                {"b": 5, "x": 2, "y": 0, "a": 0, "c": 1, "d": 1},
                {"b": 5.5, "x": 1, "y": 2, "a": 0, "c": 0, "d": 8}
            ],
            "bombNotes": [],
            "obstacles": []
        }"#;
        let difficulty = DifficultyFile::from_json(difficulty).expect("should parse");
        let extracted = difficulty.source_notes().expect("should have notes");
        assert_eq!(extracted.notes.len(), 2);
        assert_eq!(extracted.skipped, 0);
        assert_eq!(extracted.notes[1].beat, 5.5);
        assert_eq!(extracted.notes[1].lane_row, 2);
    }

    #[test]
    fn test_config_change_changes_identity() {
        let config = MappingConfig::default();
        let wider = MappingConfig {
            x_range: 2.5,
            ..MappingConfig::default()
        };

        let a = SongIdentity::derive("abc", &config).unwrap();
        let b = SongIdentity::derive("abc", &wider).unwrap();
        assert_ne!(a.song_id, b.song_id);
        assert_ne!(a.seed, b.seed);
    }
}
