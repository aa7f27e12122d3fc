//! Output naming and writing.
//!
//! A converted song lands in its own directory under the Audio Trip songs
//! folder, holding the `.ats` document and a copy of the audio:
//!
//! ```text
//! <out_root>/<author> • <song> <sub> - <mapper>/
//!     <author> - <song> <sub> - <mapper>.ats
//!     <song> - <author> <sub>.ogg
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tripsaber_format::{InfoFile, OutputDocument};

use crate::error::ConvertError;

/// File extension of Audio Trip choreography documents.
pub const DOCUMENT_EXTENSION: &str = "ats";

/// Names of everything a conversion writes, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir_name: String,
    pub document_name: String,
    pub audio_name: String,
}

impl OutputLayout {
    /// Derives output names from the song's info file.
    pub fn for_song(info: &InfoFile) -> Self {
        let dir_name = format!(
            "{} • {} {} - {}",
            info.song_author_name, info.song_name, info.song_sub_name, info.level_author_name
        );
        let document_name = format!(
            "{} - {} {} - {}.{}",
            info.song_author_name,
            info.song_name,
            info.song_sub_name,
            info.level_author_name,
            DOCUMENT_EXTENSION
        );
        Self {
            dir_name: sanitize_file_name(&dir_name),
            document_name: sanitize_file_name(&document_name),
            audio_name: sanitize_file_name(&info.output_song_filename()),
        }
    }

    /// Directory the song is written to.
    pub fn song_dir(&self, out_root: &Path) -> PathBuf {
        out_root.join(&self.dir_name)
    }

    pub fn document_path(&self, out_root: &Path) -> PathBuf {
        self.song_dir(out_root).join(&self.document_name)
    }

    pub fn audio_path(&self, out_root: &Path) -> PathBuf {
        self.song_dir(out_root).join(&self.audio_name)
    }
}

/// Makes a name usable as a single path component.
///
/// Path separators become `_`; names that would resolve to the current or
/// parent directory are replaced entirely.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match replaced.trim() {
        "" | "." | ".." => "_".to_string(),
        _ => replaced,
    }
}

/// Writes the document and copies the audio next to it.
///
/// The audio is copied first and the document is written to a temporary
/// file and renamed into place, so a failed call never leaves a new or
/// truncated `.ats` behind and never replaces an existing one.
///
/// # Arguments
/// * `document` - The built document
/// * `layout` - Output names
/// * `out_root` - Audio Trip songs folder
/// * `audio_source` - Audio file inside the source package
///
/// # Returns
/// * Path of the written `.ats` file
///
/// # Errors
/// If anything fails and the song directory did not exist before, the
/// directory is removed again so no partial output is left behind.
pub fn write_outputs(
    document: &OutputDocument,
    layout: &OutputLayout,
    out_root: &Path,
    audio_source: &Path,
) -> Result<PathBuf, ConvertError> {
    let song_dir = layout.song_dir(out_root);
    let created = !song_dir.exists();

    let result = write_song_files(document, layout, out_root, audio_source);
    if result.is_err() && created && song_dir.exists() {
        if let Err(e) = fs::remove_dir_all(&song_dir) {
            warn!(
                "failed to clean up {} after write error: {}",
                song_dir.display(),
                e
            );
        }
    }
    result
}

fn write_song_files(
    document: &OutputDocument,
    layout: &OutputLayout,
    out_root: &Path,
    audio_source: &Path,
) -> Result<PathBuf, ConvertError> {
    let song_dir = layout.song_dir(out_root);
    fs::create_dir_all(&song_dir)?;

    let json = document.to_json()?;

    let audio_path = layout.audio_path(out_root);
    fs::copy(audio_source, &audio_path)?;
    debug!(
        "copied {} to {}",
        audio_source.display(),
        audio_path.display()
    );

    let document_path = layout.document_path(out_root);
    let staging_path = document_path.with_extension(format!("{}.tmp", DOCUMENT_EXTENSION));
    let staged =
        fs::write(&staging_path, json).and_then(|()| fs::rename(&staging_path, &document_path));
    if let Err(e) = staged {
        let _ = fs::remove_file(&staging_path);
        return Err(e.into());
    }
    debug!("wrote {}", document_path.display());

    Ok(document_path)
}
