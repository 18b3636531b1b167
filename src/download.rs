/*!
 * Subtitle download collaborators.
 *
 * The retriever never talks to the network itself. It hands a watch URL and a
 * set of [`DownloadOptions`] to a [`CaptionDownloader`], which is expected to
 * leave a subtitle file where [`crate::storage::Storage`] will look for it.
 */

use std::fmt::Debug;
use std::process::Command;
use log::{debug, error};
use url::Url;

use crate::app_config::DownloadOptions;
use crate::errors::DownloadError;

/// Common trait for subtitle downloaders
pub trait CaptionDownloader: Debug {
    /// Download the subtitles for `url` according to `options`
    ///
    /// # Returns
    /// * `Ok(0)` on success, `Ok(status)` for an unexplained non-zero status,
    ///   or a [`DownloadError`] describing what went wrong
    fn download(&self, url: &str, options: &DownloadOptions) -> Result<i32, DownloadError>;
}

/// Build the canonical watch URL for a video id
pub fn video_url(base_url: &str, video_id: &str) -> Result<Url, DownloadError> {
    Url::parse_with_params(base_url, &[("v", video_id)])
        .map_err(|e| DownloadError::Other(format!("Invalid base URL '{}': {}", base_url, e)))
}

/// Downloader backed by the `yt-dlp` command line program
#[derive(Debug, Default, Clone)]
pub struct YtDlpDownloader;

impl YtDlpDownloader {
    pub fn new() -> Self {
        YtDlpDownloader
    }

    /// Command line arguments for one download
    pub fn build_args(url: &str, options: &DownloadOptions) -> Vec<String> {
        let mut args = Vec::new();

        if options.skip_download {
            args.push("--skip-download".to_string());
        }
        if options.write_automatic_sub {
            args.push("--write-auto-subs".to_string());
        }
        if options.write_sub {
            args.push("--write-subs".to_string());
        }
        if !options.subtitle_langs.is_empty() {
            args.push("--sub-langs".to_string());
            args.push(options.subtitle_langs.join(","));
        }

        args.extend([
            "--sub-format".to_string(),
            options.subtitle_format.clone(),
            "-P".to_string(),
            options.output_dir.to_string_lossy().to_string(),
            "-o".to_string(),
            options.output_template.clone(),
            "--no-progress".to_string(),
            "--quiet".to_string(),
            url.to_string(),
        ]);

        args
    }

    /// Turn a non-zero exit into a typed error when stderr explains it
    pub fn classify_failure(status: i32, stderr: &str) -> Result<i32, DownloadError> {
        let message = stderr
            .lines()
            .find(|l| l.starts_with("ERROR:"))
            .unwrap_or(stderr)
            .trim()
            .to_string();

        if stderr.contains("Unable to extract") || stderr.contains("ExtractorError") {
            Err(DownloadError::Extractor(message))
        } else if stderr.contains("ERROR:") {
            Err(DownloadError::Download(message))
        } else {
            Ok(status)
        }
    }
}

impl CaptionDownloader for YtDlpDownloader {
    fn download(&self, url: &str, options: &DownloadOptions) -> Result<i32, DownloadError> {
        let args = Self::build_args(url, options);
        debug!("Running {} {}", options.executable, args.join(" "));

        let output = Command::new(&options.executable)
            .args(&args)
            .output()
            .map_err(|e| DownloadError::Other(format!("Failed to execute {}: {}", options.executable, e)))?;

        if output.status.success() {
            return Ok(0);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        // Killed by a signal has no code
        let status = output.status.code().unwrap_or(-1);
        error!("{} exited with status {}", options.executable, status);

        Self::classify_failure(status, &stderr)
    }
}
