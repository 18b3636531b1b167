use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::debug;

use crate::errors::RetrievalError;

// @module: Location and lifetime of downloaded subtitle files

// @struct: Deterministic subtitle file locations under one directory
#[derive(Debug, Clone)]
pub struct Storage {
    // @field: Directory the downloader writes into
    dir: PathBuf,

    // @field: Downloader output template, `%(id)s` marks the video id
    output_template: String,

    // @field: Subtitle file extension
    extension: String,
}

impl Storage {
    /// Storage for files named `subtitle_<id>.<lang>.vtt` under `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self::with_layout(dir, "subtitle_%(id)s", "vtt")
    }

    /// Storage matching a downloader output template and subtitle format
    pub fn with_layout<P: Into<PathBuf>>(dir: P, output_template: &str, extension: &str) -> Self {
        Storage {
            dir: dir.into(),
            output_template: output_template.to_string(),
            extension: extension.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // @returns: Path the downloader writes the (id, language) subtitle to
    pub fn file_path(&self, video_id: &str, language: &str) -> PathBuf {
        let stem = self.output_template.replace("%(id)s", video_id);
        self.dir.join(format!("{}.{}.{}", stem, language, self.extension))
    }

    /// Remove the subtitle file for (id, language); a missing file is not an error
    pub fn remove_file(&self, video_id: &str, language: &str) -> std::io::Result<()> {
        remove_if_exists(&self.file_path(video_id, language))
    }

    /// Take ownership of the subtitle file for (id, language)
    ///
    /// The guard removes the file on drop only if it did not exist yet when
    /// acquired, or once [`CaptionFile::arm`] has been called. A file that was
    /// already there is left alone unless the caller claims it.
    pub fn acquire(&self, video_id: &str, language: &str) -> CaptionFile {
        let path = self.file_path(video_id, language);
        let armed = !path.exists();
        if !armed {
            debug!("Caption file {:?} already exists, keeping it unless overwritten", path);
        }
        CaptionFile { path, armed }
    }
}

/// A downloaded subtitle file, removed from disk on drop when armed
#[derive(Debug)]
pub struct CaptionFile {
    path: PathBuf,

    // @field: Whether drop removes the file
    armed: bool,
}

impl CaptionFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file will be removed on drop
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Claim the file so it is removed on drop, e.g. after a download wrote it
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Read the whole file as UTF-8 text
    pub fn read_to_string(&self) -> Result<String, RetrievalError> {
        fs::read_to_string(&self.path).map_err(|source| RetrievalError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for CaptionFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match remove_if_exists(&self.path) {
            Ok(()) => debug!("Removed caption file {:?}", self.path),
            Err(e) => debug!("Failed to remove caption file {:?}: {}", self.path, e),
        }
    }
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
