/*!
 * Tests for output sanitization rules
 */

#![allow(non_snake_case)]

use tradoc::translation::sanitize::{BOILERPLATE_MARKERS, SanitizeRule, sanitize};

#[test]
fn test_sanitize_withBilingualNoise_shouldYieldCleanTargetText() {
    let raw = "สวัสดี (hello) Translation: this is fine extra";
    let clean = sanitize(raw);

    assert_eq!(clean, "สวัสดี");
    assert!(!clean.contains('('));
    assert!(!clean.contains("Translation:"));
    assert!(!clean.chars().any(|c| c.is_ascii_alphabetic()));
}

#[test]
fn test_sanitize_withCleanTargetText_shouldBeUnchanged() {
    assert_eq!(sanitize("你好，世界。"), "你好，世界。");
}

#[test]
fn test_sanitize_withOnlyNoise_shouldReturnEmptyString() {
    assert_eq!(sanitize("(just an aside) Literally: nothing else"), "");
}

#[test]
fn test_stripParentheticals_withMultipleSpans_shouldRemoveAll() {
    let rule = SanitizeRule::StripParentheticals;
    assert_eq!(rule.apply("一(one)二(two)三"), "一二三");
}

#[test]
fn test_stripParentheticals_withUnclosedParen_shouldLeaveItAlone() {
    let rule = SanitizeRule::StripParentheticals;
    assert_eq!(rule.apply("一(unclosed"), "一(unclosed");
}

#[test]
fn test_truncateAtMarkers_withEqualsSign_shouldKeepPrecedingText() {
    let rule = SanitizeRule::TruncateAtMarkers;
    assert_eq!(rule.apply("你好 = hello"), "你好 ");
}

#[test]
fn test_truncateAtMarkers_withMultipleMarkers_shouldCutAtEarliest() {
    let rule = SanitizeRule::TruncateAtMarkers;
    // "Or," appears before "Translation:", so the cut happens there
    assert_eq!(rule.apply("好 Or, Translation: x"), "好 ");
}

#[test]
fn test_truncateAtMarkers_withNoMarker_shouldBeUnchanged() {
    let rule = SanitizeRule::TruncateAtMarkers;
    assert_eq!(rule.apply("ไม่มีอะไร"), "ไม่มีอะไร");
}

#[test]
fn test_dropLatinLines_withMixedLines_shouldKeepOnlyNonLatin() {
    let rule = SanitizeRule::DropLatinLines;
    let text = "你好\nThis line is an explanation\n再见";
    assert_eq!(rule.apply(text), "你好\n再见");
}

#[test]
fn test_dropLatinLines_withDigitsAndPunctuation_shouldKeepLine() {
    let rule = SanitizeRule::DropLatinLines;
    assert_eq!(rule.apply("第1章：开始。"), "第1章：开始。");
}

#[test]
fn test_markers_shouldMatchTheFixedSet() {
    assert_eq!(
        BOILERPLATE_MARKERS,
        &["Translation:", "=", "Or,", "would be:", "Literally:"]
    );
}
