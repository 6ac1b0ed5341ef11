use super::{Marker, Match, MatchKind};

/// Immutable snapshot of a finished branch.
#[derive(Debug, Clone)]
pub struct ParseResult<D> {
    input: String,
    matches: Vec<Match>,
    score: f64,
    data: D,
}

impl<D> ParseResult<D> {
    pub(crate) fn new(input: String, matches: Vec<Match>, score: f64, data: D) -> Self {
        Self {
            input,
            matches,
            score,
            data,
        }
    }

    /// Input the branch left unconsumed.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Text of every match, fuzzy segments included.
    pub fn matched(&self) -> String {
        self.matches.iter().map(|m| m.content.as_str()).collect()
    }

    /// Text of every non-fuzzy match; always a prefix of the original input
    /// up to case, followed by any virtual tail.
    pub fn matched_input(&self) -> String {
        self.matches
            .iter()
            .filter(|m| m.kind != MatchKind::Fuzzy)
            .map(|m| m.content.as_str())
            .collect()
    }

    /// The line a user would get by accepting the result: every part up to
    /// the first placeholder.
    pub fn suggestion(&self) -> String {
        self.matches
            .iter()
            .take_while(|m| m.kind.is_inputable())
            .map(|m| m.content.as_str())
            .collect()
    }

    /// Parts with their markers redacted unless listed in `visible`.
    pub fn parts(&self, visible: &[Marker]) -> Vec<Match> {
        self.matches
            .iter()
            .map(|m| {
                let marker = m.marker.as_ref().filter(|marker| visible.contains(marker)).cloned();
                Match {
                    content: m.content.clone(),
                    kind: m.kind,
                    marker,
                }
            })
            .collect()
    }

    /// Parts with all markers intact.
    #[inline]
    pub fn all_parts(&self) -> &[Match] {
        &self.matches
    }

    /// Product of the branch's score factors.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn into_data(self) -> D {
        self.data
    }
}
