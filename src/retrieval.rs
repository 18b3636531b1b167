use std::collections::HashMap;
use log::{debug, info, warn};

use crate::app_config::{DEFAULT_LANGUAGE, DownloadOptions, DownloadOverrides};
use crate::download::{self, CaptionDownloader};
use crate::errors::RetrievalError;
use crate::normalizer;
use crate::storage::Storage;
use crate::webvtt::WebVttReader;

// @module: Caption retrieval for single videos and batches

/// Downloads, parses and normalizes captions for video ids
#[derive(Debug)]
pub struct CaptionRetriever<D: CaptionDownloader> {
    // @field: Download collaborator
    downloader: D,

    // @field: Base download settings, never mutated
    options: DownloadOptions,

    // @field: Where downloaded files are expected
    storage: Storage,

    // @field: WebVTT parser
    reader: WebVttReader,
}

impl<D: CaptionDownloader> CaptionRetriever<D> {
    /// Create a retriever using the given downloader and base options
    pub fn new(downloader: D, options: DownloadOptions) -> Self {
        let storage = Storage::with_layout(
            options.output_dir.clone(),
            &options.output_template,
            &options.subtitle_format,
        );

        CaptionRetriever {
            downloader,
            options,
            storage,
            reader: WebVttReader::new(),
        }
    }

    /// Create a retriever whose options are the base options with `overrides` applied
    pub fn with_overrides(downloader: D, options: &DownloadOptions, overrides: &DownloadOverrides) -> Self {
        Self::new(downloader, options.merged(overrides))
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Run the download step only
    ///
    /// Returns the downloader status; downloader errors are mapped to the
    /// matching [`RetrievalError`] variant.
    pub fn get_result(&self, video_id: &str, language: &str) -> Result<i32, RetrievalError> {
        let options = self.options.with_language(language);
        let url = download::video_url(&options.base_url, video_id)?;
        debug!("Downloading captions from {}", url);
        Ok(self.downloader.download(url.as_str(), &options)?)
    }

    /// Retrieve the normalized captions for one video
    ///
    /// The downloaded file is removed once this returns, on every path. A
    /// file that was already at the target path survives a failed download.
    pub fn get_captions(&self, video_id: &str, language: Option<&str>) -> Result<String, RetrievalError> {
        let language = language.unwrap_or(DEFAULT_LANGUAGE);

        // Held across the download so a partial file is cleaned up too
        let mut file = self.storage.acquire(video_id, language);

        let status = self.get_result(video_id, language)?;
        if status != 0 {
            return Err(RetrievalError::Status(status));
        }
        // The downloader wrote this path, so it is ours to remove
        file.arm();

        let content = file.read_to_string()?;
        let track = self.reader.read(&content, language)?;
        let captions = normalizer::normalize_track(&track);

        info!("Retrieved {} cues ({} chars) for {}", track.cues.len(), captions.len(), video_id);
        Ok(captions)
    }

    /// Retrieve captions for each id in order, reporting every outcome
    pub fn retrieve_all<S: AsRef<str>>(
        &self,
        video_ids: &[S],
        language: Option<&str>,
    ) -> Vec<(String, Result<String, RetrievalError>)> {
        self.retrieve_all_with(video_ids, language, |_, _| {})
    }

    /// Like [`Self::retrieve_all`], calling `observer` after each id completes
    pub fn retrieve_all_with<S, F>(
        &self,
        video_ids: &[S],
        language: Option<&str>,
        mut observer: F,
    ) -> Vec<(String, Result<String, RetrievalError>)>
    where
        S: AsRef<str>,
        F: FnMut(&str, &Result<String, RetrievalError>),
    {
        video_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                let result = self.get_captions(id, language);
                observer(id, &result);
                (id.to_string(), result)
            })
            .collect()
    }

    /// Retrieve captions for many ids, keeping only the successes
    ///
    /// Failed ids are logged and left out of the mapping. A missing key cannot
    /// tell "no captions" from "download failed"; use [`Self::retrieve_all`]
    /// for that.
    pub fn get_captions_batch<S: AsRef<str>>(
        &self,
        video_ids: &[S],
        language: Option<&str>,
    ) -> HashMap<String, String> {
        collect_successes(self.retrieve_all(video_ids, language))
    }
}

/// Collapse per-id results into a mapping of the successful ones
pub fn collect_successes(
    results: Vec<(String, Result<String, RetrievalError>)>,
) -> HashMap<String, String> {
    results
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(captions) => Some((id, captions)),
            Err(e) => {
                warn!("Skipping {}: {}", id, e);
                None
            }
        })
        .collect()
}
