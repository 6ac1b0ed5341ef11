//! Runtime-agnostic [`Stream`] over parse results.

use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::Stream;

use crate::branch::ParseResult;
use crate::error::Error;
use crate::grammar::ParseResults;

/// A stream adapter over [`ParseResults`].
///
/// Parsing never waits on I/O, so every poll is immediately ready; the
/// stream form lets results be consumed from async code and dropped early
/// like any other stream.
pub struct ParseStream<D> {
    inner: ParseResults<D>,
}

impl<D> ParseStream<D> {
    /// Wraps a lazy result iterator.
    pub fn new(inner: ParseResults<D>) -> Self {
        Self { inner }
    }

    /// Unwraps the underlying iterator.
    pub fn into_inner(self) -> ParseResults<D> {
        self.inner
    }
}

impl<D: 'static> Stream for ParseStream<D> {
    type Item = Result<ParseResult<D>, Error>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().inner.next())
    }
}

impl<D> core::fmt::Debug for ParseStream<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParseStream").field("inner", &self.inner).finish()
    }
}
