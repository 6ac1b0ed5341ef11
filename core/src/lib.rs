#![cfg_attr(
    not(test),
    deny(
        unsafe_code,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::dbg_macro
    )
)]
//! Suggestion-aware parser combinators.
//!
//! A grammar is assembled from small combinators and run against partial
//! input. Every hypothesis is a [`ParsingBranch`]; combinators fork branches
//! lazily, so a consumer that only wants the first few results never pays
//! for the rest of the search. Incomplete input yields results with
//! suggestion and placeholder parts describing what could come next.

pub mod branch;
pub mod combinators;
pub mod config;
mod error;
pub mod grammar;
pub mod parser;
pub mod strings;

#[cfg(feature = "futures")]
pub mod stream;

pub use branch::{
    Context, DataHolder, Marker, Match, MatchKind, ParseResult, ParseScope, ParsingBranch, create_context,
};
pub use combinators::{
    MAX_REPEATS, fork, freetext, literal, number, optional, pick, repeat, sequence, whitespace, word, word_with,
};
pub use config::ParseOptions;
pub use error::{Error, InvariantViolation};
pub use grammar::{Grammar, GrammarBuilder, ParseResults};
pub use parser::{
    BranchIter, Emitter, ExecCtx, Executor, Parser, ParserBuilder, ParserDefinition, define_parser,
};

#[cfg(feature = "futures")]
pub use stream::ParseStream;
