//! The parser runtime: type-erased [`Parser`] handles, the builder that
//! creates them and the custom parser definition layer.

mod define;
mod factory;

use std::fmt;
use std::sync::Arc;

use crate::branch::ParsingBranch;
use crate::error::Error;

pub use define::{Custom, Emitter, ParserDefinition, define_parser};
pub use factory::{BaseOptions, Emit, ExecCtx, Executor, OnEmit, OnMatch, ParserBuilder};

/// Lazy sequence of branches produced by a parser.
///
/// Nothing is computed until the iterator is pulled; dropping it abandons the
/// rest of the search.
pub type BranchIter<D> = Box<dyn Iterator<Item = Result<ParsingBranch<D>, Error>>>;

/// Object safe view of a built parser.
pub(crate) trait ErasedParser<D>: Send + Sync {
    fn name(&self) -> &str;

    fn parse(self: Arc<Self>, branch: ParsingBranch<D>) -> BranchIter<D>;
}

/// A built, reusable parser.
///
/// Parsers are cheap to clone and can be shared between any number of
/// grammars and parent combinators.
pub struct Parser<D> {
    inner: Arc<dyn ErasedParser<D>>,
}

impl<D: 'static> Parser<D> {
    pub(crate) fn from_erased(inner: Arc<dyn ErasedParser<D>>) -> Self {
        Self { inner }
    }

    /// Name of the combinator, used in diagnostics.
    #[inline]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Runs the parser against a branch, yielding every continuation.
    pub fn parse(&self, branch: ParsingBranch<D>) -> BranchIter<D> {
        Arc::clone(&self.inner).parse(branch)
    }
}

impl<D> Clone for Parser<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> fmt::Debug for Parser<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser").field(&self.inner.name()).finish()
    }
}
