use super::chars_eq;

/// Options for [`starts_with`] and [`overlap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartsWithOptions {
    /// Compare chars exactly. Off by default.
    pub case_sensitive: bool,
    /// Return the needle's casing for the matched part instead of the
    /// haystack's: `starts_with("test", "Te")` gives `("Te", "st")`.
    pub preserve_case_of_substring: bool,
}

impl StartsWithOptions {
    /// Case-insensitive matching that keeps the haystack's casing.
    pub const fn new() -> Self {
        Self {
            case_sensitive: false,
            preserve_case_of_substring: false,
        }
    }

    /// Sets case sensitivity.
    pub const fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Sets which side's casing the matched part is reported in.
    pub const fn preserve_case_of_substring(mut self, yes: bool) -> Self {
        self.preserve_case_of_substring = yes;
        self
    }
}

/// Byte length of the prefix of `what` that matches all of `with_what`.
fn matched_prefix_len(what: &str, with_what: &str, case_sensitive: bool) -> Option<usize> {
    let mut what_chars = what.char_indices();
    for needle in with_what.chars() {
        let (_, hay) = what_chars.next()?;
        if !chars_eq(hay, needle, case_sensitive) {
            return None;
        }
    }
    Some(what_chars.next().map_or(what.len(), |(idx, _)| idx))
}

/// Checks whether `what` starts with `with_what`.
///
/// Returns the split `(matched, rest)` of `what`, or `None` when `what` does
/// not start with `with_what`. The matched part keeps the casing of `what`
/// unless [`StartsWithOptions::preserve_case_of_substring`] is set.
///
/// # Example
///
/// ```ignore
/// assert_eq!(starts_with("Foo", "fo", StartsWithOptions::new()), Some(("Fo", "o")));
/// assert_eq!(starts_with("fo", "foo", StartsWithOptions::new()), None);
/// ```
pub fn starts_with<'a>(
    what: &'a str,
    with_what: &'a str,
    options: StartsWithOptions,
) -> Option<(&'a str, &'a str)> {
    let end = matched_prefix_len(what, with_what, options.case_sensitive)?;
    let (matched, rest) = what.split_at(end);

    if options.preserve_case_of_substring {
        Some((with_what, rest))
    } else {
        Some((matched, rest))
    }
}

/// Result of comparing remaining input against a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap<'a> {
    /// The input starts with the whole literal; `rest` is the input left over.
    Full {
        /// The literal, as written in the grammar.
        matched: &'a str,
        /// Input following the literal.
        rest: &'a str,
    },
    /// The input is a strict prefix of the literal (possibly empty).
    Partial {
        /// The typed part, in the literal's casing.
        typed: &'a str,
        /// The untyped tail of the literal.
        suggestion: &'a str,
    },
}

/// Compares remaining `input` with `literal` in both directions.
///
/// Returns `None` when neither is a prefix of the other.
pub fn overlap<'a>(input: &'a str, literal: &'a str, options: StartsWithOptions) -> Option<Overlap<'a>> {
    if let Some((_, rest)) = starts_with(input, literal, options) {
        return Some(Overlap::Full {
            matched: literal,
            rest,
        });
    }

    starts_with(literal, input, options).map(|(typed, suggestion)| Overlap::Partial { typed, suggestion })
}
