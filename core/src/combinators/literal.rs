use std::sync::Arc;

use super::{nothing, single};
use crate::branch::{Marker, Match, MatchKind, ParsingBranch};
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, ParserBuilder};
use crate::strings::{FuzzyOptions, Overlap, SegmentKind, StartsWithOptions, fuzzy_match, overlap};

/// Score factor per skipped char of a fuzzy match.
const FUZZY_PENALTY: f64 = 0.99;

/// How remaining input relates to a piece of literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextMatch {
    /// The input starts with the whole text.
    Full,
    /// The input is a strict prefix of the text.
    Partial { typed: String, suggestion: String },
}

impl TextMatch {
    pub(crate) fn of(input: &str, text: &str, case_sensitive: bool) -> Option<Self> {
        let options = StartsWithOptions::new().case_sensitive(case_sensitive);
        overlap(input, text, options).map(|found| match found {
            Overlap::Full { .. } => TextMatch::Full,
            Overlap::Partial { typed, suggestion } => TextMatch::Partial {
                typed: typed.to_owned(),
                suggestion: suggestion.to_owned(),
            },
        })
    }

    /// Appends the matches for `text`; returns true on a full match.
    pub(crate) fn apply<D>(
        self,
        branch: &mut ParsingBranch<D>,
        text: &str,
        marker: Option<&Marker>,
    ) -> Result<bool, Error> {
        match self {
            TextMatch::Full => {
                branch.add_match(Match::input(text).with_marker(marker.cloned()))?;
                Ok(true)
            }
            TextMatch::Partial { typed, suggestion } => {
                if !typed.is_empty() {
                    branch.add_match(Match::input(typed).with_marker(marker.cloned()))?;
                }
                branch.add_match(Match::suggestion(suggestion).with_marker(marker.cloned()))?;
                Ok(false)
            }
        }
    }
}

/// Matches fixed text, suggesting the rest of it when only a prefix was typed.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
    case_sensitive: bool,
    fuzzy: bool,
}

impl Literal {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy
    }

    fn parse_fuzzy<D: 'static>(&self, mut branch: ParsingBranch<D>, cx: &ExecCtx<String, D>) -> BranchIter<D> {
        let options = FuzzyOptions {
            case_sensitive: self.case_sensitive,
            truncate_too_long_input: false,
        };
        let Some(segments) = fuzzy_match(branch.input(), &self.text, options) else {
            return nothing();
        };

        let full: String = segments.iter().map(|s| s.content.as_str()).collect();
        let marker = cx.marker();

        for segment in segments {
            if segment.kind == SegmentKind::Fuzzy {
                let skipped = i32::try_from(segment.content.chars().count()).unwrap_or(i32::MAX);
                let factor = FUZZY_PENALTY.powi(skipped).max(f64::MIN_POSITIVE);
                if let Err(err) = branch.add_score(factor) {
                    return single(Err(err));
                }
            }
            let kind = MatchKind::from(segment.kind);
            if let Err(err) = branch.add_match(Match::new(segment.content, kind).with_marker(marker.clone())) {
                return single(Err(err));
            }
        }

        cx.emit(&mut branch, full);
        single(Ok(branch))
    }
}

impl<D: 'static> Executor<D> for Literal {
    type Emit = String;

    fn name(&self) -> &str {
        "literal"
    }

    fn validate(&self, _options: &BaseOptions<D>) -> Result<(), Error> {
        if self.text.is_empty() {
            return Err(Error::InvalidOptions {
                combinator: "literal".into(),
                reason: "text cannot be empty".into(),
            });
        }
        Ok(())
    }

    fn execute(self: Arc<Self>, mut branch: ParsingBranch<D>, cx: ExecCtx<String, D>) -> BranchIter<D> {
        if self.fuzzy {
            return self.parse_fuzzy(branch, &cx);
        }

        let Some(found) = TextMatch::of(branch.input(), &self.text, self.case_sensitive) else {
            return nothing();
        };

        match found.apply(&mut branch, &self.text, cx.options().marker()) {
            Ok(true) => {
                cx.emit(&mut branch, self.text.clone());
                single(Ok(branch))
            }
            Ok(false) => single(Ok(branch)),
            Err(err) => single(Err(err)),
        }
    }
}

/// Matches `text`, case-insensitively unless configured otherwise.
///
/// # Example
///
/// ```ignore
/// let parser = literal("FoO").build()?;
/// // "fo" yields parts [Fo (input), O (suggestion)]
/// ```
pub fn literal<D: 'static>(text: impl Into<String>) -> ParserBuilder<Literal, D> {
    ParserBuilder::new(Literal {
        text: text.into(),
        case_sensitive: false,
        fuzzy: false,
    })
}

impl<D: 'static> ParserBuilder<Literal, D> {
    /// Compares chars exactly.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.executor.case_sensitive = yes;
        self
    }

    /// Accepts the input as any subsequence of the text, scoring sparser
    /// matches lower.
    pub fn fuzzy(mut self, yes: bool) -> Self {
        self.executor.fuzzy = yes;
        self
    }
}
