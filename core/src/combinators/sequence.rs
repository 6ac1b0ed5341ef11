use std::sync::Arc;

use tracing::trace;

use super::deferred;
use crate::branch::ParsingBranch;
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, Parser, ParserBuilder};

/// Runs children one after another over the set of surviving branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequence;

impl<D: 'static> Executor<D> for Sequence {
    type Emit = ();

    fn name(&self) -> &str {
        "sequence"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        options.require_children("sequence")
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<(), D>) -> BranchIter<D> {
        deferred(move || {
            let mut live = vec![branch];
            let mut errors = Vec::new();

            for (step, child) in cx.children().iter().enumerate() {
                let mut next = Vec::with_capacity(live.len());
                for branch in live {
                    for result in child.parse(branch) {
                        match result {
                            Ok(branch) => next.push(branch),
                            Err(err) => errors.push(err),
                        }
                    }
                }

                trace!(step, child = child.name(), survivors = next.len(), "sequence step");
                live = next;
                if live.is_empty() {
                    break;
                }
            }

            Box::new(errors.into_iter().map(Err).chain(live.into_iter().map(Ok)))
        })
    }
}

/// Matches `children` in order.
///
/// Each child runs against every branch that survived the previous child,
/// so alternatives multiply across steps. Errors raised on one branch are
/// passed on without discarding the others.
pub fn sequence<D: 'static>(children: impl IntoIterator<Item = Parser<D>>) -> ParserBuilder<Sequence, D> {
    ParserBuilder::new(Sequence).children(children)
}
