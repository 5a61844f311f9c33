/*!
 * Paragraph segmentation.
 *
 * Splits document text into ordered translation units on blank-line
 * boundaries and reassembles translated units with the same separator,
 * so document structure survives translation. Both transformations are
 * pure and stateless.
 */

/// Separator between translation units, on input and output alike
pub const UNIT_SEPARATOR: &str = "\n\n";

/// A paragraph-scale chunk of text submitted as one request to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Position of this unit among the document's kept units
    pub index: usize,
    /// The unit text, trimmed of surrounding whitespace
    pub text: String,
}

/// Split document text into ordered translation units.
///
/// Units are maximal runs of non-blank text between blank-line separators;
/// units that are empty after trimming are discarded. Order is preserved.
pub fn segment(text: &str) -> Vec<TranslationUnit> {
    text.split(UNIT_SEPARATOR)
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .enumerate()
        .map(|(index, unit)| TranslationUnit {
            index,
            text: unit.to_string(),
        })
        .collect()
}

/// Join translated units back in original order.
///
/// Empty strings keep their slot so a unit whose translation was entirely
/// sanitized away still holds its position in the document.
pub fn reassemble(units: &[String]) -> String {
    units.join(UNIT_SEPARATOR)
}
