/*!
 * Tests for language tag utilities
 */

use ytcaptions::language_utils::{
    get_language_name, language_tags_match, normalize_to_part2t, primary_subtag, validate_language_tag,
};

#[test]
fn test_primarySubtag_withRegionAndScript_shouldReturnLanguage() {
    assert_eq!(primary_subtag("en-US"), "en");
    assert_eq!(primary_subtag("zh-Hans"), "zh");
    assert_eq!(primary_subtag("PT_br"), "pt");
    assert_eq!(primary_subtag("de"), "de");
}

#[test]
fn test_validateLanguageTag_withKnownAndUnknownCodes_shouldValidate() {
    assert!(validate_language_tag("en").is_ok());
    assert!(validate_language_tag("en-GB").is_ok());
    assert!(validate_language_tag("fre").is_ok());
    assert!(validate_language_tag("xx").is_err());
    assert!(validate_language_tag("").is_err());
}

#[test]
fn test_languageTagsMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_tags_match("en", "en-US"));
    assert!(language_tags_match("fr", "fre"));
    assert!(language_tags_match("deu", "de"));
    assert!(!language_tags_match("en", "de"));
}

#[test]
fn test_languageTagsMatch_withUnknownCodes_shouldCompareText() {
    assert!(language_tags_match("xx", "XX-yy"));
    assert!(!language_tags_match("xx", "en"));
}

#[test]
fn test_normalizeToPart2t_shouldConvertTwoLetterCodes() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert!(normalize_to_part2t("zz").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
}
