use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;

use crate::errors::CaptionParseError;
use crate::language_utils;

// @module: WebVTT cue parsing

// @const: Cue timing line, e.g. "00:00:01.000 --> 00:00:02.500 align:start"
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+-->\s+(\S+)").unwrap()
});

// @const: Timestamp in hh:mm:ss.ttt or mm:ss.ttt form
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})$").unwrap()
});

// @const: Inline markup: voice/class spans and karaoke timestamps
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

// @struct: Single timed caption unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Caption lines joined by '\n', markup removed
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Cue {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Parse a WebVTT timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
        let caps = TIMESTAMP_REGEX.captures(timestamp.trim())?;
        let hours: u64 = caps.get(1).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let minutes: u64 = caps[2].parse().ok()?;
        let seconds: u64 = caps[3].parse().ok()?;
        let millis: u64 = caps[4].parse().ok()?;

        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        // Oversized hour fields are rejected rather than wrapped
        hours
            .checked_mul(3_600_000)?
            .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds as hh:mm:ss.ttt
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

/// Raw representation: the timing header line followed by the caption lines
impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_ms),
            Self::format_timestamp(self.end_ms)
        )?;
        if !self.text.is_empty() {
            write!(f, "\n{}", self.text)?;
        }
        Ok(())
    }
}

/// Ordered cues of one language from one document
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    /// Language the track was read for
    pub language: String,

    /// Cues in document order
    pub cues: Vec<Cue>,
}

impl CaptionTrack {
    pub fn new(language: impl Into<String>, cues: Vec<Cue>) -> Self {
        CaptionTrack {
            language: language.into(),
            cues,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Reader for WebVTT caption documents
#[derive(Debug, Default, Clone, Copy)]
pub struct WebVttReader;

impl WebVttReader {
    pub fn new() -> Self {
        WebVttReader
    }

    /// Read a document into the caption track for `language`
    ///
    /// The track is labelled with the requested language; a differing
    /// `Language:` header is logged and otherwise ignored.
    ///
    /// Blocks are separated by empty lines; a line holding only spaces belongs
    /// to its cue. NOTE, STYLE and REGION blocks are skipped, as is any block
    /// without a timing line.
    pub fn read(&self, content: &str, language: &str) -> Result<CaptionTrack, CaptionParseError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content.lines().map(|l| l.trim_end_matches('\r')).collect();

        match lines.first() {
            Some(first) if first.starts_with("WEBVTT") => {}
            _ => return Err(CaptionParseError::MissingHeader),
        }

        let mut cues = Vec::new();
        let mut idx = 0;

        // Header block runs until the first blank line
        while idx < lines.len() && !lines[idx].is_empty() {
            if let Some(declared) = lines[idx].strip_prefix("Language:") {
                let declared = declared.trim();
                if !declared.is_empty() && !language_utils::language_tags_match(declared, language) {
                    debug!("Document declares language {}, reading it as {}", declared, language);
                }
            }
            idx += 1;
        }

        while idx < lines.len() {
            if lines[idx].is_empty() {
                idx += 1;
                continue;
            }

            let start = idx;
            while idx < lines.len() && !lines[idx].is_empty() {
                idx += 1;
            }

            if let Some(cue) = Self::parse_block(&lines[start..idx], start)? {
                cues.push(cue);
            }
        }

        debug!("Parsed {} cues for language {}", cues.len(), language);

        Ok(CaptionTrack::new(language, cues))
    }

    /// Parse one block; `offset` is its 0-based first line
    fn parse_block(block: &[&str], offset: usize) -> Result<Option<Cue>, CaptionParseError> {
        let first = block[0].trim_start();
        if first.starts_with("NOTE") || first.starts_with("STYLE") || first.starts_with("REGION") {
            return Ok(None);
        }

        let Some(timing_pos) = block.iter().take(2).position(|l| l.contains("-->")) else {
            debug!("Skipping block without timing line at line {}", offset + 1);
            return Ok(None);
        };

        let line_no = offset + timing_pos + 1;
        let timing = block[timing_pos].trim();
        let caps = TIMING_REGEX.captures(timing).ok_or_else(|| CaptionParseError::InvalidTimestamp {
            timestamp: timing.to_string(),
            line: line_no,
        })?;

        let parse = |raw: &str| {
            Cue::parse_timestamp(raw).ok_or_else(|| CaptionParseError::InvalidTimestamp {
                timestamp: raw.to_string(),
                line: line_no,
            })
        };
        let start_ms = parse(&caps[1])?;
        let end_ms = parse(&caps[2])?;

        let text = block[timing_pos + 1..]
            .iter()
            .map(|line| clean_line(line))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Some(Cue::new(start_ms, end_ms, text)))
    }
}

/// Remove inline markup and decode the common character references
fn clean_line(line: &str) -> String {
    let stripped = TAG_REGEX.replace_all(line, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
