/*!
 * # ytcaptions - automatic caption text for online videos
 *
 * A Rust library that fetches the automatically generated captions of a video
 * and reduces them to one clean line of text.
 *
 * ## Features
 *
 * - Download auto-generated subtitles through `yt-dlp`
 * - Parse WebVTT cue documents, dropping inline markup
 * - Collapse the repeated lines of scrolling captions
 * - Batch retrieval that keeps going past failed videos
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and download options
 * - `webvtt`: WebVTT cue parsing
 * - `normalizer`: Header stripping and adjacent line dedup
 * - `download`: Downloader trait and the `yt-dlp` implementation
 * - `storage`: Subtitle file locations and scoped cleanup
 * - `retrieval`: Single video and batch retrieval
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod webvtt;
pub mod normalizer;
pub mod download;
pub mod storage;
pub mod retrieval;
pub mod language_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, DownloadOptions, DownloadOverrides};
pub use webvtt::{CaptionTrack, Cue, WebVttReader};
pub use download::{CaptionDownloader, YtDlpDownloader};
pub use storage::{CaptionFile, Storage};
pub use retrieval::CaptionRetriever;
pub use language_utils::{language_tags_match, get_language_name};
pub use errors::{AppError, CaptionParseError, DownloadError, RetrievalError};
