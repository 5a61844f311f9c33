/*!
 * Output sanitization.
 *
 * The backend is a black-box text generator that regularly wraps its
 * translation in explanatory noise: parenthetical asides, bilingual
 * glosses, "Translation:" boilerplate. This module reduces raw model
 * output to clean target-language text through an explicit ordered list
 * of pure text-transform rules, each independently testable.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Boilerplate markers; everything from the first match onward is dropped
pub const BOILERPLATE_MARKERS: &[&str] = &["Translation:", "=", "Or,", "would be:", "Literally:"];

static PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// A single sanitization rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeRule {
    /// Remove all parenthetical spans `(...)`
    StripParentheticals,
    /// Truncate at the first occurrence of any boilerplate marker
    TruncateAtMarkers,
    /// Drop lines containing latin-alphabet characters
    DropLatinLines,
    /// Trim surrounding whitespace
    TrimWhitespace,
}

/// The cleanup pipeline, applied in this order
pub const DEFAULT_RULES: &[SanitizeRule] = &[
    SanitizeRule::StripParentheticals,
    SanitizeRule::TruncateAtMarkers,
    SanitizeRule::DropLatinLines,
    SanitizeRule::TrimWhitespace,
];

impl SanitizeRule {
    /// Apply this rule to the given text
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::StripParentheticals => PARENTHETICAL_RE.replace_all(text, "").into_owned(),
            Self::TruncateAtMarkers => {
                let cut = BOILERPLATE_MARKERS
                    .iter()
                    .filter_map(|marker| text.find(marker))
                    .min();
                match cut {
                    Some(index) => text[..index].to_string(),
                    None => text.to_string(),
                }
            }
            Self::DropLatinLines => text
                .lines()
                .filter(|line| !line.chars().any(|c| c.is_ascii_alphabetic()))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::TrimWhitespace => text.trim().to_string(),
        }
    }
}

/// Sanitize raw model output into clean target-language text.
///
/// May return an empty string when every rule fires; the pipeline keeps
/// the unit's slot in that case rather than collapsing document structure.
pub fn sanitize(raw: &str) -> String {
    DEFAULT_RULES
        .iter()
        .fold(raw.to_string(), |text, rule| rule.apply(&text))
}
