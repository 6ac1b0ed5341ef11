use std::sync::Arc;

use crate::branch::ParsingBranch;
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, Parser, ParserBuilder};

/// Alternation over children.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fork;

impl<D: 'static> Executor<D> for Fork {
    type Emit = ();

    fn name(&self) -> &str {
        "fork"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        options.require_children("fork")
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<(), D>) -> BranchIter<D> {
        let children = cx.children().to_vec();
        Box::new(
            children
                .into_iter()
                .flat_map(move |child| child.parse(branch.clone())),
        )
    }
}

/// Tries every child on its own copy of the branch, in order.
pub fn fork<D: 'static>(children: impl IntoIterator<Item = Parser<D>>) -> ParserBuilder<Fork, D> {
    ParserBuilder::new(Fork).children(children)
}
