use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for caption language tags
///
/// Caption tracks are labelled with BCP 47 style tags such as `en`, `en-US`
/// or `zh-Hans`. Only the primary subtag carries the ISO 639 language; the
/// helpers here validate and compare tags on that basis.

/// Map an ISO 639-2/B code to its ISO 639-2/T equivalent
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

/// Return the lowercased primary subtag of a language tag (`en-US` -> `en`)
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve a language tag to an ISO 639 language
fn resolve(tag: &str) -> Option<Language> {
    let primary = primary_subtag(tag);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => {
            let part2t = bibliographic_to_terminology(&primary).unwrap_or(primary.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate that a tag's primary subtag is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_tag(tag: &str) -> Result<()> {
    resolve(tag)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", tag))
}

/// Normalize a language tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    resolve(tag)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", tag))
}

/// Check if two language tags name the same language
///
/// Tags are compared by primary subtag, so `en` matches `en-US` and `fre`
/// matches `fr`. Unknown codes only match themselves, case-insensitively.
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    match (resolve(tag1), resolve(tag2)) {
        (Some(lang1), Some(lang2)) => lang1 == lang2,
        _ => primary_subtag(tag1) == primary_subtag(tag2),
    }
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let lang = resolve(tag).ok_or_else(|| anyhow!("Failed to get language from code: {}", tag))?;
    Ok(lang.to_name().to_string())
}
