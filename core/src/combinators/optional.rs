use std::iter;
use std::sync::Arc;

use super::deferred;
use crate::branch::ParsingBranch;
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, Parser, ParserBuilder};

/// Zero or one occurrence of a child.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional;

impl<D: 'static> Executor<D> for Optional {
    type Emit = ();

    fn name(&self) -> &str {
        "optional"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        options.expect_children("optional", 1)
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<(), D>) -> BranchIter<D> {
        let skipped = branch.clone();
        Box::new(iter::once(Ok(skipped)).chain(deferred(move || match cx.children().first() {
            Some(child) => child.parse(branch),
            None => Box::new(iter::empty()),
        })))
    }
}

/// Yields the branch unchanged, then every result of `child`.
pub fn optional<D: 'static>(child: Parser<D>) -> ParserBuilder<Optional, D> {
    ParserBuilder::new(Optional).child(child)
}
