use anyhow::anyhow;
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.

/// Caption language used when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Download settings
    #[serde(default)]
    pub download: DownloadOptions,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings handed to the downloader for every retrieval
///
/// Values are never mutated in place: per-call changes go through
/// [`DownloadOptions::merged`] or [`DownloadOptions::with_language`], which
/// return a new value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DownloadOptions {
    /// Downloader executable
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Skip the video and audio payload
    #[serde(default = "default_true")]
    pub skip_download: bool,

    /// Fetch automatically generated subtitles
    #[serde(default = "default_true")]
    pub write_automatic_sub: bool,

    /// Fetch uploaded subtitles as well
    #[serde(default)]
    pub write_sub: bool,

    /// Output filename template, `%(id)s` is replaced by the video id
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Subtitle languages to request
    #[serde(default)]
    pub subtitle_langs: Vec<String>,

    /// Subtitle file format
    #[serde(default = "default_subtitle_format")]
    pub subtitle_format: String,

    /// Watch page the video id is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory the subtitle files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Per-call overrides for [`DownloadOptions`]; `None` keeps the base value
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DownloadOverrides {
    pub executable: Option<String>,
    pub skip_download: Option<bool>,
    pub write_automatic_sub: Option<bool>,
    pub write_sub: Option<bool>,
    pub output_template: Option<String>,
    pub subtitle_langs: Option<Vec<String>>,
    pub subtitle_format: Option<String>,
    pub base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl DownloadOptions {
    /// Return a copy with every set override applied
    pub fn merged(&self, overrides: &DownloadOverrides) -> Self {
        Self {
            executable: overrides.executable.clone().unwrap_or_else(|| self.executable.clone()),
            skip_download: overrides.skip_download.unwrap_or(self.skip_download),
            write_automatic_sub: overrides.write_automatic_sub.unwrap_or(self.write_automatic_sub),
            write_sub: overrides.write_sub.unwrap_or(self.write_sub),
            output_template: overrides.output_template.clone().unwrap_or_else(|| self.output_template.clone()),
            subtitle_langs: overrides.subtitle_langs.clone().unwrap_or_else(|| self.subtitle_langs.clone()),
            subtitle_format: overrides.subtitle_format.clone().unwrap_or_else(|| self.subtitle_format.clone()),
            base_url: overrides.base_url.clone().unwrap_or_else(|| self.base_url.clone()),
            output_dir: overrides.output_dir.clone().unwrap_or_else(|| self.output_dir.clone()),
        }
    }

    /// Return a copy that also requests `language`
    ///
    /// Empty languages are ignored and a language already present is not added twice.
    pub fn with_language(&self, language: &str) -> Self {
        let mut options = self.clone();
        if !language.is_empty() && !options.subtitle_langs.iter().any(|l| l == language) {
            options.subtitle_langs.push(language.to_string());
        }
        options
    }

    /// Output template with the video id substituted
    pub fn output_name(&self, video_id: &str) -> String {
        self.output_template.replace("%(id)s", video_id)
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            skip_download: true,
            write_automatic_sub: true,
            write_sub: false,
            output_template: default_output_template(),
            subtitle_langs: Vec::new(),
            subtitle_format: default_subtitle_format(),
            base_url: default_base_url(),
            output_dir: default_output_dir(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_executable() -> String {
    "yt-dlp".to_string()
}

fn default_output_template() -> String {
    "subtitle_%(id)s".to_string()
}

fn default_subtitle_format() -> String {
    "vtt".to_string()
}

fn default_base_url() -> String {
    "http://www.youtube.com/watch".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> anyhow::Result<()> {
        crate::language_utils::validate_language_tag(&self.language)?;

        if self.download.executable.trim().is_empty() {
            return Err(anyhow!("Downloader executable must not be empty"));
        }

        if !self.download.output_template.contains("%(id)s") {
            return Err(anyhow!(
                "Output template '{}' must contain %(id)s",
                self.download.output_template
            ));
        }

        if self.download.subtitle_format != "vtt" {
            return Err(anyhow!(
                "Unsupported subtitle format '{}', only vtt can be parsed",
                self.download.subtitle_format
            ));
        }

        url::Url::parse(&self.download.base_url)
            .map_err(|e| anyhow!("Invalid base URL '{}': {}", self.download.base_url, e))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load the configuration at `path`, writing the defaults there first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            download: DownloadOptions::default(),
            log_level: LogLevel::default(),
        }
    }
}
