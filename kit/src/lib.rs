#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Suggestion-aware parser combinators for autocomplete style input.
//!
//! ```ignore
//! use suggestkit::prelude::*;
//!
//! let grammar = Grammar::<()>::new(
//!     sequence([word("buy").build()?, number().min(1.0).only_integer(true).build()?]).build()?,
//! );
//!
//! for result in grammar.parse("bu", ParseOptions::new().allow_partial()) {
//!     println!("{}", result?.suggestion());
//! }
//! ```

pub use suggestkit_core::*;

/// Everything needed to assemble and run a grammar.
pub mod prelude {
    pub use suggestkit_core::{
        Context, DataHolder, Emitter, Error, Grammar, Marker, Match, MatchKind, ParseOptions, ParseResult, ParseScope,
        Parser, ParserBuilder, create_context, define_parser, fork, freetext, literal, number, optional, pick, repeat,
        sequence, whitespace, word, word_with,
    };
}
