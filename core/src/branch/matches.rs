use super::Marker;
use crate::strings::SegmentKind;

/// How a [`Match`] relates to the input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Text that was typed and consumed.
    Input,
    /// Completion of a partially typed literal. Always the tail of a branch.
    Suggestion,
    /// Pattern chars skipped by a fuzzy match. Never consumes input.
    Fuzzy,
    /// Stand-in for expected content when nothing is left to analyse.
    Placeholder,
    /// A word separator, typed or not.
    Whitespace,
}

impl MatchKind {
    /// Kinds that make up the typed-or-typeable suggestion line.
    #[inline]
    pub fn is_inputable(self) -> bool {
        !matches!(self, MatchKind::Placeholder)
    }
}

impl From<SegmentKind> for MatchKind {
    fn from(kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Input => MatchKind::Input,
            SegmentKind::Fuzzy => MatchKind::Fuzzy,
            SegmentKind::Suggestion => MatchKind::Suggestion,
        }
    }
}

/// One token appended to a branch.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Matched or suggested text.
    pub content: String,
    /// Role of the text.
    pub kind: MatchKind,
    /// Grammar field that produced the match.
    pub marker: Option<Marker>,
}

impl Match {
    /// Creates an unmarked match.
    pub fn new(content: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            content: content.into(),
            kind,
            marker: None,
        }
    }

    /// Creates a match of kind [`MatchKind::Input`].
    pub fn input(content: impl Into<String>) -> Self {
        Self::new(content, MatchKind::Input)
    }

    /// Creates a match of kind [`MatchKind::Suggestion`].
    pub fn suggestion(content: impl Into<String>) -> Self {
        Self::new(content, MatchKind::Suggestion)
    }

    /// Creates a match of kind [`MatchKind::Placeholder`].
    pub fn placeholder(content: impl Into<String>) -> Self {
        Self::new(content, MatchKind::Placeholder)
    }

    /// Creates a match of kind [`MatchKind::Whitespace`].
    pub fn whitespace(content: impl Into<String>) -> Self {
        Self::new(content, MatchKind::Whitespace)
    }

    /// Tags the match with a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Option<Marker>) -> Self {
        self.marker = marker;
        self
    }
}
