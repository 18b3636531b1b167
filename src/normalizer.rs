/*!
 * Caption text normalization.
 *
 * Auto-generated captions scroll: each cue repeats the last line of the cue
 * before it. Normalization removes the timing header from every cue, flattens
 * the remaining lines into one stream, drops each line that is identical to
 * the line immediately before it, and joins what is left with single spaces.
 *
 * Deduplication is local, not global: a line is only dropped when it repeats
 * its direct predecessor. The same sentence spoken twice a minute apart is
 * kept twice.
 */

use log::trace;

use crate::webvtt::{CaptionTrack, Cue};

/// Remove a pair of wrapping delimiters from a cue's raw representation
///
/// A raw cue always starts with its timing line, so a leading bracket or quote
/// can only be wrapping. The closing delimiter may sit on its own line, in
/// which case the line break before it goes too.
fn unwrap_delimiters(raw: &str) -> &str {
    let mut chars = raw.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return raw;
    };

    let wrapped = matches!((first, last), ('[', ']') | ('"', '"') | ('\'', '\''));
    if !wrapped {
        return raw;
    }

    let inner = &raw[first.len_utf8()..raw.len() - last.len_utf8()];
    inner.strip_suffix('\n').unwrap_or(inner)
}

/// Replace the first line of a raw cue (its timing header) with a single line break
///
/// A cue holding only its header has nothing left and yields an empty string.
pub fn strip_header(raw: &str) -> String {
    let raw = unwrap_delimiters(raw);
    match raw.find('\n') {
        Some(pos) => format!("\n{}", &raw[pos + 1..]),
        None => String::new(),
    }
}

/// Concatenate header-stripped cues in order, without separators
pub fn flatten<I, S>(raw_cues: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_cues
        .into_iter()
        .map(|raw| strip_header(raw.as_ref()))
        .collect()
}

/// Drop every line equal to the line directly before it
///
/// The cursor starts at the empty string, so a leading empty line is dropped
/// as well. The cursor always advances, kept or not.
pub fn collapse_adjacent<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut previous = "";
    let mut kept = Vec::new();

    for line in lines {
        if line != previous {
            kept.push(line);
        }
        previous = line;
    }

    kept
}

/// Normalize raw cue representations into one space-joined string
pub fn normalize_raw<I, S>(raw_cues: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let flattened = flatten(raw_cues);
    let lines = collapse_adjacent(flattened.split('\n'));
    trace!("Kept {} lines after adjacent dedup", lines.len());
    lines.join(" ")
}

/// Normalize parsed cues
pub fn normalize_cues(cues: &[Cue]) -> String {
    normalize_raw(cues.iter().map(|cue| cue.to_string()))
}

/// Normalize a whole caption track
pub fn normalize_track(track: &CaptionTrack) -> String {
    normalize_cues(&track.cues)
}
