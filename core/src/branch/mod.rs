//! The branch model: one parse hypothesis flowing through the combinators.

mod context;
mod data;
mod marker;
mod matches;
mod result;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, InvariantViolation};
use crate::strings::{StartsWithOptions, starts_with};

pub use context::{Context, ParseScope, create_context};
pub use data::DataHolder;
pub use marker::Marker;
pub use matches::{Match, MatchKind};
pub use result::ParseResult;

use context::ContextSlot;

static NEXT_BRANCH_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_BRANCH_ID.fetch_add(1, Ordering::Relaxed)
}

struct Root<D> {
    input: String,
    holder: DataHolder<D>,
}

/// One in-flight parse hypothesis.
///
/// A branch records the matches appended so far, the score factors, the
/// accumulated data and the stack of combinators that are currently active.
/// Branches have value semantics: [`Clone`] forks an independent copy, with
/// the data duplicated through the grammar's [`DataHolder`].
///
/// Input is tracked as a byte offset into the original input. Every
/// [`MatchKind::Input`] match must overlay the remaining input, which keeps
/// the matched text a prefix of the original input at all times.
pub struct ParsingBranch<D> {
    root: Arc<Root<D>>,
    id: String,
    matches: Vec<Match>,
    scores: Vec<f64>,
    data: D,
    contexts: Arc<HashMap<u64, ContextSlot>>,
    stack: Vec<Arc<str>>,
    finished: bool,
    consumed: usize,
    past_end: bool,
}

impl<D> ParsingBranch<D> {
    /// Creates a root branch; its data comes from `holder`.
    pub fn new(input: impl Into<String>, holder: DataHolder<D>) -> Self {
        let data = holder.init();
        Self {
            root: Arc::new(Root {
                input: input.into(),
                holder,
            }),
            id: next_id().to_string(),
            matches: Vec::new(),
            scores: Vec::new(),
            data,
            contexts: Arc::default(),
            stack: Vec::new(),
            finished: false,
            consumed: 0,
            past_end: false,
        }
    }

    /// Lineage id, e.g. `"3-7-12"` for a grandchild of branch `3`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The input the parse started with.
    #[inline]
    pub fn original_input(&self) -> &str {
        &self.root.input
    }

    /// The part of the original input that no match has covered yet.
    ///
    /// Empty once a virtual match (suggestion, placeholder or a separator
    /// past the end) has been added.
    pub fn input(&self) -> &str {
        if self.past_end {
            return "";
        }
        self.root.input.get(self.consumed..).unwrap_or_default()
    }

    #[inline]
    pub fn has_more_input(&self) -> bool {
        !self.input().is_empty()
    }

    /// Matches appended so far, in order.
    #[inline]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    #[inline]
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn has_match_of_kind(&self, kind: MatchKind) -> bool {
        self.matches.iter().any(|m| m.kind == kind)
    }

    /// True when every match was typed input (also true without matches).
    pub fn has_only_input(&self) -> bool {
        self.matches.iter().all(|m| m.kind == MatchKind::Input)
    }

    /// Concatenated content of every non-fuzzy match.
    pub fn matched_input(&self) -> String {
        self.matches
            .iter()
            .filter(|m| m.kind != MatchKind::Fuzzy)
            .map(|m| m.content.as_str())
            .collect()
    }

    /// The branch data.
    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    pub(crate) fn set_data(&mut self, data: D) {
        self.data = data;
    }

    /// Product of all score factors, `1.0` for an unscored branch.
    pub fn score(&self) -> f64 {
        self.scores.iter().product()
    }

    /// Appends a score factor, which must lie in `(0, 1]`.
    pub fn add_score(&mut self, factor: f64) -> Result<(), Error> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(self.violation(InvariantViolation::ScoreOutOfRange(factor)));
        }
        self.scores.push(factor);
        Ok(())
    }

    /// Marks the branch as complete. Finished branches pass through every
    /// further combinator untouched.
    #[inline]
    pub fn mark_as_finished(&mut self) {
        self.finished = true;
    }

    /// True once marked as finished or once a placeholder was added.
    pub fn is_finished(&self) -> bool {
        self.finished || self.has_match_of_kind(MatchKind::Placeholder)
    }

    /// Whether a parser with a placeholder should show it instead of running.
    ///
    /// That is the case when there was no input at all, or when the input is
    /// used up by a branch that already carries virtual matches.
    pub fn should_apply_placeholder(&self) -> bool {
        if self.root.input.is_empty() {
            return true;
        }
        !self.has_more_input() && !self.has_only_input()
    }

    /// Appends a match after checking the branch invariants.
    ///
    /// # Errors
    ///
    /// - [`InvariantViolation::EmptyMatch`] for empty non-placeholder content
    /// - [`InvariantViolation::InputAfterSuggestion`] when a suggestion is
    ///   already present
    /// - [`InvariantViolation::MatchDivergesFromInput`] when typed content
    ///   does not overlay the remaining input, or a virtual match is added
    ///   while input is left
    pub fn add_match(&mut self, m: Match) -> Result<(), Error> {
        if m.content.is_empty() && m.kind != MatchKind::Placeholder {
            return Err(self.violation(InvariantViolation::EmptyMatch));
        }

        match m.kind {
            MatchKind::Input => {
                if self.has_match_of_kind(MatchKind::Suggestion) {
                    return Err(self.violation(InvariantViolation::InputAfterSuggestion));
                }
                self.consume(&m.content)?;
            }
            MatchKind::Whitespace => {
                if self.has_more_input() {
                    self.consume(&m.content)?;
                } else {
                    self.past_end = true;
                }
            }
            MatchKind::Suggestion | MatchKind::Placeholder => {
                if self.has_more_input() {
                    return Err(self.diverges(&m.content));
                }
                if !m.content.is_empty() {
                    self.past_end = true;
                }
            }
            MatchKind::Fuzzy => {}
        }

        self.matches.push(m);
        Ok(())
    }

    fn consume(&mut self, content: &str) -> Result<(), Error> {
        let remaining = self.input();
        match starts_with(remaining, content, StartsWithOptions::new()) {
            Some((matched, _)) => {
                let len = matched.len();
                self.consumed += len;
                Ok(())
            }
            None => Err(self.diverges(content)),
        }
    }

    fn diverges(&self, content: &str) -> Error {
        self.violation(InvariantViolation::MatchDivergesFromInput {
            remaining: self.input().to_owned(),
            content: content.to_owned(),
        })
    }

    /// Builds an invariant error carrying the active combinator stack.
    pub fn violation(&self, violation: InvariantViolation) -> Error {
        let stack = self.stack_description();
        tracing::warn!(branch = %self.id, %stack, %violation, "branch invariant violated");
        Error::Invariant { stack, violation }
    }

    /// Active combinators, outermost first, joined with ` > `.
    pub fn stack_description(&self) -> String {
        self.stack
            .iter()
            .map(|name| &**name)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    pub(crate) fn push_stack(&mut self, name: Arc<str>) {
        self.stack.push(name);
    }

    pub(crate) fn pop_stack(&mut self) {
        self.stack.pop();
    }

    pub(crate) fn context_slot(&self, key: u64) -> Option<&ContextSlot> {
        self.contexts.get(&key)
    }

    pub(crate) fn set_context_slot(&mut self, key: u64, value: ContextSlot) {
        Arc::make_mut(&mut self.contexts).insert(key, value);
    }

    /// Snapshots the branch as a user facing result.
    pub fn into_result(self) -> ParseResult<D> {
        let input = self.input().to_owned();
        let score = self.score();
        ParseResult::new(input, self.matches, score, self.data)
    }
}

impl<D> Clone for ParsingBranch<D> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            id: format!("{}-{}", self.id, next_id()),
            matches: self.matches.clone(),
            scores: self.scores.clone(),
            data: self.root.holder.clone_data(&self.data),
            contexts: Arc::clone(&self.contexts),
            stack: self.stack.clone(),
            finished: self.finished,
            consumed: self.consumed,
            past_end: self.past_end,
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for ParsingBranch<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingBranch")
            .field("id", &self.id)
            .field("input", &self.input())
            .field("matches", &self.matches)
            .field("score", &self.score())
            .field("data", &self.data)
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Holder {
        foo: String,
    }

    fn test_branch() -> ParsingBranch<Holder> {
        ParsingBranch::new(
            "foo bar baz",
            DataHolder::new(|| Holder { foo: "bar".into() }),
        )
    }

    #[test]
    fn test_initializes_data() {
        assert_eq!(test_branch().data().foo, "bar");
    }

    #[test]
    fn test_clone_uses_holder_clone() {
        let holder = DataHolder::with_clone(
            || 1u32,
            |n: &u32| n + 1,
        );
        let branch = ParsingBranch::new("", holder);
        let clone = branch.clone();

        assert_eq!(*branch.data(), 1);
        assert_eq!(*clone.data(), 2);
        assert!(clone.id().starts_with(&format!("{}-", branch.id())));
    }

    #[test]
    fn test_input_without_matches() {
        assert_eq!(test_branch().input(), "foo bar baz");
    }

    #[test]
    fn test_tracks_input_with_matches() {
        let mut branch = test_branch();
        branch.add_match(Match::input("foo ")).unwrap();
        assert_eq!(branch.input(), "bar baz");
        branch.add_match(Match::input("BAR ")).unwrap();
        assert_eq!(branch.input(), "baz");
        branch.add_match(Match::input("baz")).unwrap();
        assert_eq!(branch.input(), "");
        assert!(!branch.has_more_input());
        assert_eq!(branch.matched_input(), "foo BAR baz");
    }

    #[test]
    fn test_rejects_invalid_matches() {
        let err = test_branch().add_match(Match::input("")).unwrap_err();
        assert!(matches!(
            err,
            Error::Invariant {
                violation: InvariantViolation::EmptyMatch,
                ..
            }
        ));

        let err = test_branch().add_match(Match::input("bar")).unwrap_err();
        assert!(matches!(
            err,
            Error::Invariant {
                violation: InvariantViolation::MatchDivergesFromInput { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_input_after_suggestion() {
        let mut branch = ParsingBranch::new("fo", DataHolder::<()>::default());
        branch.add_match(Match::input("fo")).unwrap();
        branch.add_match(Match::suggestion("o")).unwrap();

        let err = branch.add_match(Match::input("x")).unwrap_err();
        assert!(matches!(
            err,
            Error::Invariant {
                violation: InvariantViolation::InputAfterSuggestion,
                ..
            }
        ));
    }

    #[test]
    fn test_error_includes_stack() {
        let mut branch = test_branch();
        branch.push_stack("sequence".into());
        branch.push_stack("literal".into());

        let err = branch.add_match(Match::input("nope")).unwrap_err();
        assert!(err.to_string().starts_with("parser error (sequence > literal)"));
    }

    #[test]
    fn test_fuzzy_matches_do_not_consume() {
        let mut branch = ParsingBranch::new("ld", DataHolder::<()>::default());
        branch.add_match(Match::input("l")).unwrap();
        branch.add_match(Match::new("orem ", MatchKind::Fuzzy)).unwrap();
        branch.add_match(Match::input("d")).unwrap();

        assert!(!branch.has_more_input());
        assert_eq!(branch.matched_input(), "ld");
    }

    #[test]
    fn test_score_is_product() {
        let mut branch = test_branch();
        assert_eq!(branch.score(), 1.0);

        branch.add_score(0.5).unwrap();
        branch.add_score(0.5).unwrap();
        assert_eq!(branch.score(), 0.25);

        assert!(branch.add_score(0.0).is_err());
        assert!(branch.add_score(1.5).is_err());
    }

    #[test]
    fn test_placeholder_rules() {
        let empty = ParsingBranch::new("", DataHolder::<()>::default());
        assert!(empty.should_apply_placeholder());

        let mut typed = ParsingBranch::new("foo", DataHolder::<()>::default());
        assert!(!typed.should_apply_placeholder());
        typed.add_match(Match::input("foo")).unwrap();
        assert!(!typed.should_apply_placeholder());

        let mut suggested = ParsingBranch::new("fo", DataHolder::<()>::default());
        suggested.add_match(Match::input("fo")).unwrap();
        suggested.add_match(Match::suggestion("o")).unwrap();
        assert!(suggested.should_apply_placeholder());

        suggested.add_match(Match::placeholder("city")).unwrap();
        assert!(suggested.is_finished());
    }

    #[test]
    fn test_whitespace_past_end() {
        let mut branch = ParsingBranch::new("foo", DataHolder::<()>::default());
        branch.add_match(Match::input("foo")).unwrap();
        branch.add_match(Match::whitespace(" ")).unwrap();

        assert_eq!(branch.input(), "");
        assert_eq!(branch.matched_input(), "foo ");
    }
}
