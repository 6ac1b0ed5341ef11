//! Core error types for suggestkit.
//!
//! Two families of failure exist. Configuration errors are returned from
//! `build()` while a grammar is being assembled, before any input is seen.
//! Invariant errors describe an engine or combinator bug detected while a
//! branch is being extended; they carry the combinator stack that was active
//! when the violation happened.
//!
//! An input that simply does not match is never an error: it produces zero
//! results.

use thiserror::Error;

/// Core suggestkit error type.
///
/// # Example
///
/// ```ignore
/// use suggestkit::{repeat, literal, Error};
///
/// let too_many = repeat(literal("foo").build()?).limit(10).build();
/// assert!(matches!(too_many, Err(Error::RepeatLimitTooLarge { .. })));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A grammar was built without a root parser.
    #[error("a parser is required to build a grammar")]
    MissingParser,

    /// A combinator that needs children was given none.
    #[error("{combinator} requires at least one child parser")]
    MissingChildren {
        /// Name of the combinator.
        combinator: &'static str,
    },

    /// A combinator was given the wrong number of children.
    #[error("{combinator} requires exactly {expected} child parser(s), found {found}")]
    ChildCount {
        /// Name of the combinator.
        combinator: &'static str,
        /// Required number of children.
        expected: usize,
        /// Number of children supplied.
        found: usize,
    },

    /// `repeat` was configured above the hard ceiling.
    #[error("repeat limit {limit} exceeds the maximum of {max}")]
    RepeatLimitTooLarge {
        /// Requested limit.
        limit: usize,
        /// Hard ceiling.
        max: usize,
    },

    /// `repeat` was configured without any glue alternative.
    #[error("repeat requires at least one glue string")]
    EmptyGlue,

    /// `number` suggestion mode was enabled for non-integer numbers.
    #[error("number suggestions can only be generated with `only_integer`")]
    SuggestionsRequireInteger,

    /// `number` suggestion mode was enabled on an unbounded range.
    #[error("number suggestions require both `min` and `max` bounds")]
    SuggestionsRequireBounds,

    /// `word` was given both literal text and a child parser.
    #[error("word accepts either text or a child parser, not both")]
    WordTextAndChild,

    /// `word` was given neither literal text nor a child parser.
    #[error("word requires either text or a child parser")]
    WordMissingContent,

    /// Options rejected by a user supplied validator.
    #[error("invalid options for {combinator}: {reason}")]
    InvalidOptions {
        /// Name of the parser definition.
        combinator: String,
        /// Validator message.
        reason: String,
    },

    /// A branch invariant was violated while parsing.
    #[error("parser error ({stack}): {violation}")]
    Invariant {
        /// Active combinators, outermost first, joined with ` > `.
        stack: String,
        /// What went wrong.
        violation: InvariantViolation,
    },
}

/// Branch invariants that a combinator may break.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Only placeholder matches may have empty content.
    #[error("match content cannot be empty")]
    EmptyMatch,

    /// Suggestions are always the tail of a branch.
    #[error("an 'input' match cannot follow a 'suggestion' match")]
    InputAfterSuggestion,

    /// The match does not overlay the remaining input.
    #[error("match '{content}' does not match remaining input '{remaining}'")]
    MatchDivergesFromInput {
        /// Remaining input at the time of the match.
        remaining: String,
        /// Rejected match content.
        content: String,
    },

    /// Score factors live in `(0, 1]`.
    #[error("score factor {0} is outside of (0, 1]")]
    ScoreOutOfRange(f64),
}

impl Error {
    /// Returns true for errors raised while assembling a grammar.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::Invariant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_message_includes_stack() {
        let err = Error::Invariant {
            stack: "sequence > literal".into(),
            violation: InvariantViolation::EmptyMatch,
        };

        assert_eq!(
            err.to_string(),
            "parser error (sequence > literal): match content cannot be empty"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors() {
        let err = Error::ChildCount {
            combinator: "repeat",
            expected: 1,
            found: 2,
        };

        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "repeat requires exactly 1 child parser(s), found 2"
        );
    }
}
