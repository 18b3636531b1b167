/*!
 * Error types for the ytcaptions application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the download collaborator
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The downloader could not fetch the video page or subtitle file
    #[error("{0}")]
    Download(String),

    /// The identifier resolved but nothing could be extracted from it
    #[error("{0}")]
    Extractor(String),

    /// Anything else, including failure to start the downloader
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur while parsing a WebVTT document
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptionParseError {
    /// The document does not start with the WEBVTT signature
    #[error("Missing WEBVTT header")]
    MissingHeader,

    /// A timing line contained an unparseable timestamp
    #[error("Invalid timestamp '{timestamp}' on line {line}")]
    InvalidTimestamp {
        /// The offending timestamp text
        timestamp: String,
        /// 1-based line number in the document
        line: usize,
    },
}

/// Errors surfaced when retrieving captions for a single video
///
/// Every failure of the retrieval pipeline is reported through this one type,
/// whatever the underlying cause.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Downloading the captions failed
    #[error("Unable to download captions: {0}")]
    Download(String),

    /// The video resolved but no caption track could be extracted
    #[error("Unable to extract captions: {0}")]
    Extraction(String),

    /// Any other downloader failure
    #[error("Unknown error downloading and extracting captions: {0}")]
    Unknown(String),

    /// The downloader finished with a non-zero status
    #[error("Unable to download and extract captions: {0}")]
    Status(i32),

    /// The downloaded caption file could not be read
    #[error("Failed to read caption file {path:?}: {source}")]
    Read {
        /// Expected location of the caption file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The downloaded caption file could not be parsed
    #[error("Failed to parse captions: {0}")]
    Parse(#[from] CaptionParseError),
}

impl From<DownloadError> for RetrievalError {
    fn from(error: DownloadError) -> Self {
        match error {
            DownloadError::Download(msg) => Self::Download(msg),
            DownloadError::Extractor(msg) => Self::Extraction(msg),
            DownloadError::Other(msg) => Self::Unknown(msg),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from caption retrieval
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
