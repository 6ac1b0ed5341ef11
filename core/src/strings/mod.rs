//! String matching primitives used by the text-matching combinators.
//!
//! - [`starts_with`]: prefix matching that preserves the casing of the source
//! - [`overlap`]: bidirectional prefix matching that also detects when the
//!   remaining input is itself a prefix of a literal (the suggestion case)
//! - [`fuzzy_match`]: subsequence matching that classifies every character
//!   of a pattern as typed, skipped or still to be suggested

mod fuzzy;
mod starts_with;

pub use fuzzy::{FuzzyOptions, FuzzySegment, SegmentKind, fuzzy_match};
pub use starts_with::{Overlap, StartsWithOptions, overlap, starts_with};

/// Compares two chars, optionally ignoring case.
#[inline]
pub(crate) fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    if a == b {
        return true;
    }
    !case_sensitive && a.to_lowercase().eq(b.to_lowercase())
}
