//! Extracted map directories.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;
use tripsaber_format::{DifficultyFile, InfoFile};

use crate::audio::probe_duration;
use crate::document::SourcePackage;
use crate::error::ConvertError;

/// Accepted spellings of the info file name.
pub const INFO_FILENAMES: [&str; 2] = ["Info.dat", "info.dat"];

/// A map package unpacked into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPackage {
    root: PathBuf,
    info_path: PathBuf,
}

impl DirectoryPackage {
    /// Opens a map directory.
    ///
    /// # Errors
    /// `MalformedSource` if the directory has no `Info.dat` or `info.dat`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        let root = root.into();
        let info_path = INFO_FILENAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                ConvertError::MalformedSource(format!(
                    "could not find Info.dat or info.dat in {}",
                    root.display()
                ))
            })?;
        debug!("opened map package {}", info_path.display());
        Ok(Self { root, info_path })
    }

    /// The package directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the info file that was found.
    pub fn info_path(&self) -> &Path {
        &self.info_path
    }

    /// Resolves a file name declared in the info file to a path inside the
    /// package.
    ///
    /// # Errors
    /// `MalformedSource` if the name is empty, absolute, or escapes the
    /// package directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ConvertError> {
        let relative = Path::new(name);
        let plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(ConvertError::MalformedSource(format!(
                "file name must stay inside the package: '{}'",
                name
            )));
        }
        Ok(self.root.join(relative))
    }

    /// BLAKE3 hash of the package contents.
    ///
    /// Hashes the info file bytes followed by each difficulty file of the
    /// first difficulty set, in declared order. Two packages with the same
    /// map data hash the same regardless of where they were extracted.
    ///
    /// # Returns
    /// * A 64-character lowercase hexadecimal string
    pub fn content_hash(&self) -> Result<String, ConvertError> {
        let info_bytes = fs::read(&self.info_path)?;
        let info = parse_info(&info_bytes)?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(&info_bytes);
        if let Some(set) = info.primary_set() {
            for beatmap in &set.difficulty_beatmaps {
                let path = self.resolve(&beatmap.beatmap_filename)?;
                let bytes = fs::read(&path).map_err(|e| ConvertError::MissingDifficultyData {
                    difficulty: beatmap.difficulty.clone(),
                    filename: beatmap.beatmap_filename.clone(),
                    reason: e.to_string(),
                })?;
                hasher.update(&bytes);
            }
        }
        Ok(hasher.finalize().to_hex().to_string())
    }
}

impl SourcePackage for DirectoryPackage {
    fn info(&self) -> Result<InfoFile, ConvertError> {
        let bytes = fs::read(&self.info_path)?;
        parse_info(&bytes)
    }

    fn load_difficulty(&self, filename: &str) -> Result<DifficultyFile, ConvertError> {
        let path = self.resolve(filename)?;
        let bytes = fs::read(&path)?;
        Ok(DifficultyFile::from_slice(&bytes)?)
    }

    fn audio_duration(&self, song_filename: &str) -> Result<f64, ConvertError> {
        let path = self.resolve(song_filename)?;
        probe_duration(&path)
    }
}

fn parse_info(bytes: &[u8]) -> Result<InfoFile, ConvertError> {
    InfoFile::from_slice(bytes)
        .map_err(|e| ConvertError::MalformedSource(format!("invalid Info.dat: {}", e)))
}
