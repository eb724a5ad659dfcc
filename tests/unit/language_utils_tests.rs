/*!
 * Tests for ISO language code utilities
 */

use rosetta::language_utils::{
    LanguageCodeType, get_language_name, language_codes_match, normalize_to_part2t, validate_language_code,
};

#[test]
fn test_validate_language_code_withTwoLetterCode_shouldReturnPart1() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code(" FR ").unwrap(), LanguageCodeType::Part1);
}

#[test]
fn test_validate_language_code_withBibliographicCode_shouldReturnPart2B() {
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
}

#[test]
fn test_validate_language_code_withUnknownCode_shouldFail() {
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_to_part2t_withAllForms_shouldReturnTerminologyCode() {
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("fra").unwrap(), "fra");
}

#[test]
fn test_language_codes_match_withEquivalentCodes_shouldReturnTrue() {
    assert!(language_codes_match("de", "ger"));
    assert!(language_codes_match("zh", "chi"));
    assert!(!language_codes_match("es", "pt"));
}

#[test]
fn test_get_language_name_withValidCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
}
