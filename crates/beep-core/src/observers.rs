//! Observer reconciliation.
//!
//! Most rows carry two-letter initials. A handful carry free text instead;
//! those are resolved through a fixed table of exact spellings.

use crate::models::Observer;

/// Free-text observer cells seen in the log and who they are credited to.
///
/// Split-credit entries go to a single observer by convention. Matching is
/// against the cell exactly as written, surrounding whitespace included.
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("DR**2", "DR"),
    ("CC and DR :) (30-70 split)", "DR"),
    ("LT hello", "LT"),
    ("DG/(LT maybe)", "DG"),
];

/// Resolve an observer cell to a canonical code.
///
/// Cells that are two characters once trimmed are upper-cased initials; other
/// cells must match [`SPECIAL_CASES`] exactly, otherwise the observer is
/// [`Observer::Unknown`].
pub fn normalize_observer(field: &str) -> Observer {
    let trimmed = field.trim();

    if trimmed.chars().count() == 2 {
        return Observer::Code(trimmed.to_uppercase());
    }

    SPECIAL_CASES
        .iter()
        .find(|(phrase, _)| *phrase == field)
        .map(|(_, code)| Observer::Code((*code).to_string()))
        .unwrap_or(Observer::Unknown)
}
