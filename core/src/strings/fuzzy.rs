use super::chars_eq;

/// Role of a fuzzy match segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Pattern chars that were typed.
    Input,
    /// Pattern chars the user skipped.
    Fuzzy,
    /// Pattern chars after the last typed one.
    Suggestion,
}

/// A run of pattern chars sharing one [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzySegment {
    /// The chars, taken from the pattern.
    pub content: String,
    /// Their role.
    pub kind: SegmentKind,
}

impl FuzzySegment {
    fn new(content: String, kind: SegmentKind) -> Self {
        Self { content, kind }
    }
}

/// Options for [`fuzzy_match`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyOptions {
    /// Compare chars exactly. Off by default.
    pub case_sensitive: bool,
    /// Cut input that is longer than the pattern instead of failing.
    pub truncate_too_long_input: bool,
}

/// Matches `input` as a subsequence of `pattern`.
///
/// Every char of `input` must be found in `pattern`, in order. The pattern is
/// split into runs of typed chars ([`SegmentKind::Input`]) and skipped chars
/// ([`SegmentKind::Fuzzy`]); whatever follows the last typed char becomes a
/// single [`SegmentKind::Suggestion`].
///
/// Returns `None` when `input` is not a subsequence, or is longer than the
/// pattern and truncation is disabled.
///
/// # Example
///
/// ```ignore
/// let segments = fuzzy_match("lid", "lorem ipsum dolor", FuzzyOptions::default()).unwrap();
/// // l | orem  | i | psum  | d | olor
/// ```
pub fn fuzzy_match(input: &str, pattern: &str, options: FuzzyOptions) -> Option<Vec<FuzzySegment>> {
    let pattern_len = pattern.chars().count();
    let mut input: Vec<char> = input.chars().collect();

    if input.len() > pattern_len {
        if !options.truncate_too_long_input {
            return None;
        }
        input.truncate(pattern_len);
    }

    if input.iter().copied().eq(pattern.chars()) {
        return Some(vec![FuzzySegment::new(pattern.to_owned(), SegmentKind::Input)]);
    }

    let mut segments = Vec::new();
    let mut skipped = String::new();
    let mut typed = String::new();
    let mut remaining = input.into_iter().peekable();
    let mut consumed_chars = 0;

    for letter in pattern.chars() {
        let Some(&next_input) = remaining.peek() else {
            break;
        };
        consumed_chars += 1;

        if !chars_eq(letter, next_input, options.case_sensitive) {
            if !typed.is_empty() {
                segments.push(FuzzySegment::new(std::mem::take(&mut typed), SegmentKind::Input));
            }
            skipped.push(letter);
            continue;
        }

        remaining.next();
        if !skipped.is_empty() {
            segments.push(FuzzySegment::new(std::mem::take(&mut skipped), SegmentKind::Fuzzy));
        }
        typed.push(letter);
    }

    if remaining.peek().is_some() {
        return None;
    }

    if !typed.is_empty() {
        segments.push(FuzzySegment::new(typed, SegmentKind::Input));
    }

    let suggestion: String = pattern.chars().skip(consumed_chars).collect();
    if !suggestion.is_empty() {
        segments.push(FuzzySegment::new(suggestion, SegmentKind::Suggestion));
    }

    Some(segments)
}
