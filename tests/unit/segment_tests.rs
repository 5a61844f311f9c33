/*!
 * Tests for paragraph segmentation and reassembly
 */

#![allow(non_snake_case)]

use tradoc::translation::segment::{reassemble, segment};

#[test]
fn test_segment_withTwoParagraphs_shouldReturnOrderedUnits() {
    let units = segment("para1\n\npara2");

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].index, 0);
    assert_eq!(units[0].text, "para1");
    assert_eq!(units[1].index, 1);
    assert_eq!(units[1].text, "para2");
}

#[test]
fn test_segment_withBlankOnlyUnits_shouldDiscardThem() {
    let units = segment("para1\n\n   \n\npara2\n\n\n\npara3");

    let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
    assert_eq!(texts, vec!["para1", "para2", "para3"]);
    // Indexes are positions among the kept units
    assert_eq!(units[2].index, 2);
}

#[test]
fn test_segment_withSingleParagraph_shouldReturnOneUnit() {
    let units = segment("just one paragraph\nwith a soft line break");
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].text, "just one paragraph\nwith a soft line break");
}

#[test]
fn test_segment_withEmptyText_shouldReturnNoUnits() {
    assert!(segment("").is_empty());
    assert!(segment("\n\n\n\n").is_empty());
}

#[test]
fn test_segment_withSurroundingWhitespace_shouldTrimUnits() {
    let units = segment("  para1  \n\n\tpara2\t");
    assert_eq!(units[0].text, "para1");
    assert_eq!(units[1].text, "para2");
}

#[test]
fn test_reassemble_withTranslatedUnits_shouldJoinWithSeparator() {
    let translated = vec!["T1".to_string(), "T2".to_string(), "T3".to_string()];
    assert_eq!(reassemble(&translated), "T1\n\nT2\n\nT3");
}

#[test]
fn test_reassemble_withEmptyPlaceholder_shouldPreserveSlot() {
    let translated = vec!["T1".to_string(), String::new(), "T3".to_string()];
    let output = reassemble(&translated);

    assert_eq!(output, "T1\n\n\n\nT3");
    assert_eq!(output.split("\n\n").count(), 3);
}

#[test]
fn test_segment_thenReassemble_withNParagraphs_shouldPreserveStructure() {
    let document = "หนึ่ง\n\nสอง\n\nสาม";
    let units = segment(document);
    let texts: Vec<String> = units.iter().map(|u| u.text.clone()).collect();

    assert_eq!(reassemble(&texts), document);
}
