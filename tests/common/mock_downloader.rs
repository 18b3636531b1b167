/*!
 * Mock downloader for testing
 *
 * Stands in for yt-dlp: instead of fetching anything it writes a canned
 * WebVTT document to the location the real downloader would use, or fails in
 * a configured way.
 */

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use url::Url;

use ytcaptions::{CaptionDownloader, DownloadError, DownloadOptions};

/// How a mocked download should fail
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Raise a download error
    Download,
    /// Raise an extractor error
    Extractor,
    /// Raise an unclassified error
    Other,
    /// Return a non-zero status
    Status(i32),
    /// Write part of the document, then raise a download error
    Interrupted,
}

/// Records every call made to the mock
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Video ids in call order
    pub video_ids: Vec<String>,
    /// Options passed on the last call
    pub last_options: Option<DownloadOptions>,
}

/// Mock implementation of the downloader
#[derive(Debug, Default)]
pub struct MockDownloader {
    documents: HashMap<String, String>,
    failures: HashMap<String, MockFailure>,
    tracker: Arc<Mutex<CallTracker>>,
}

impl MockDownloader {
    /// Create a mock with no documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `video_id`
    pub fn with_document(mut self, video_id: &str, document: &str) -> Self {
        self.documents.insert(video_id.to_string(), document.to_string());
        self
    }

    /// Fail every download of `video_id`
    pub fn with_failure(mut self, video_id: &str, failure: MockFailure) -> Self {
        self.failures.insert(video_id.to_string(), failure);
        self
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CallTracker>> {
        self.tracker.clone()
    }
}

impl CaptionDownloader for MockDownloader {
    fn download(&self, url: &str, options: &DownloadOptions) -> Result<i32, DownloadError> {
        let url = Url::parse(url).map_err(|e| DownloadError::Other(e.to_string()))?;
        let video_id = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| DownloadError::Other("missing v parameter".to_string()))?;

        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.video_ids.push(video_id.clone());
            tracker.last_options = Some(options.clone());
        }

        if let Some(failure) = self.failures.get(&video_id) {
            return match failure {
                MockFailure::Download => Err(DownloadError::Download(format!("ERROR: unable to download {}", video_id))),
                MockFailure::Extractor => Err(DownloadError::Extractor(format!("ERROR: Unable to extract {}", video_id))),
                MockFailure::Other => Err(DownloadError::Other("boom".to_string())),
                MockFailure::Status(code) => Ok(*code),
                MockFailure::Interrupted => {
                    fs::write(self.target_path(&video_id, options), "WEBVTT\n\n00:00:01.000 --> ")
                        .map_err(|e| DownloadError::Other(e.to_string()))?;
                    Err(DownloadError::Download(format!("ERROR: interrupted {}", video_id)))
                }
            };
        }

        // Like yt-dlp, succeed without writing anything when there are no captions
        if let Some(document) = self.documents.get(&video_id) {
            fs::write(self.target_path(&video_id, options), document)
                .map_err(|e| DownloadError::Other(e.to_string()))?;
        }

        Ok(0)
    }
}

impl MockDownloader {
    // @returns: Where yt-dlp would write the subtitle for these options
    fn target_path(&self, video_id: &str, options: &DownloadOptions) -> PathBuf {
        let language = options.subtitle_langs.last().cloned().unwrap_or_default();
        options.output_dir.join(format!(
            "{}.{}.{}",
            options.output_name(video_id),
            language,
            options.subtitle_format
        ))
    }
}
