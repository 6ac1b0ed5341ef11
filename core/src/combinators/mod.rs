//! Built-in combinators.
//!
//! Every constructor returns a [`ParserBuilder`](crate::ParserBuilder);
//! combinator specific options are setters on the builder for that
//! combinator, next to the shared ones.

mod fork;
mod freetext;
mod literal;
mod number;
mod optional;
mod pick;
mod repeat;
mod sequence;
mod whitespace;
mod word;

use std::iter;

use crate::branch::ParsingBranch;
use crate::error::Error;
use crate::parser::BranchIter;

pub use fork::{Fork, fork};
pub use freetext::{Freetext, freetext, substrings};
pub use literal::{Literal, literal};
pub use number::{Number, number};
pub use optional::{Optional, optional};
pub use pick::{Pick, pick};
pub use repeat::{MAX_REPEATS, Repeat, repeat};
pub use sequence::{Sequence, sequence};
pub use whitespace::{Whitespace, whitespace};
pub use word::{Word, word, word_with};

fn single<D: 'static>(result: Result<ParsingBranch<D>, Error>) -> BranchIter<D> {
    Box::new(iter::once(result))
}

fn nothing<D: 'static>() -> BranchIter<D> {
    Box::new(iter::empty())
}

/// Defers building an iterator until the first pull.
fn deferred<D, F>(make: F) -> BranchIter<D>
where
    D: 'static,
    F: FnOnce() -> BranchIter<D> + 'static,
{
    Box::new(iter::once_with(make).flatten())
}
