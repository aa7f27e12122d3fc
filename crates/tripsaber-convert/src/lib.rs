//! tripsaber conversion
//!
//! This crate turns a Beat Saber map into an Audio Trip choreography
//! document.
//!
//! # Overview
//!
//! Every colored note becomes one gem event:
//!
//! - **Timing** - the note's float beat is split into a whole beat plus a
//!   reduced fraction whose denominator is capped by `beats_per_measure`
//! - **Placement** - the note's lane on the 4x3 lattice is rescaled into a
//!   continuous position and nudged by deterministic jitter
//! - **Type** - color 0 becomes the left gem, anything else the right gem
//!
//! Difficulties are converted in declared order and merged into one document
//! together with the song metadata.
//!
//! # Determinism
//!
//! Conversion is deterministic. The jitter stream is PCG32 seeded from the
//! song identity (BLAKE3 over the map hash and the mapping config), so the
//! same map and config always produce a byte-identical document.
//!
//! # Example
//!
//! ```ignore
//! use tripsaber_convert::{build_document, DirectoryPackage};
//! use tripsaber_format::{MappingConfig, SongIdentity};
//!
//! let package = DirectoryPackage::open("maps/4d2be")?;
//! let config = MappingConfig::default();
//! let identity = SongIdentity::derive(&package.content_hash()?, &config)?;
//! let document = build_document(&package, &config, &identity)?;
//! println!("{} events", document.event_count());
//! ```
//!
//! # Crate Structure
//!
//! - [`beat`] - Float beat to rational beat time
//! - [`rng`] - Deterministic jitter stream
//! - [`layout`] - Lane lattice to continuous positions
//! - [`transform`] - Per-note event transform
//! - [`choreography`] - Per-difficulty assembly
//! - [`document`] - Song-level document build and the [`SourcePackage`] trait
//! - [`package`] - Extracted map directories
//! - [`audio`] - Audio duration probing
//! - [`output`] - Output naming and writing

pub mod audio;
pub mod beat;
pub mod choreography;
pub mod document;
pub mod error;
pub mod layout;
pub mod output;
pub mod package;
pub mod rng;
pub mod transform;

pub use beat::split_beat;
pub use choreography::{assemble_choreography, DifficultyMeta};
pub use document::{build_document, build_document_from_info, song_metadata, SourcePackage};
pub use error::ConvertError;
pub use layout::LaneLayout;
pub use output::{write_outputs, OutputLayout};
pub use package::DirectoryPackage;
pub use rng::{JitterSample, JitterStream};
pub use transform::transform_note;
