use std::iter;
use std::sync::Arc;

use super::{deferred, single};
use crate::branch::ParsingBranch;
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, Parser, ParserBuilder};

/// Unordered selection of children without repetition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pick {
    limit: Option<usize>,
}

impl Pick {
    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Every chain of distinct children starting from `branch`, depth first.
fn chains<D: 'static>(children: Arc<[Parser<D>]>, used: Vec<usize>, branch: ParsingBranch<D>) -> BranchIter<D> {
    let available: Vec<usize> = (0..children.len()).filter(|i| !used.contains(i)).collect();

    Box::new(available.into_iter().flat_map(move |index| {
        let children = Arc::clone(&children);
        let mut used = used.clone();
        used.push(index);

        children[index]
            .parse(branch.clone())
            .flat_map(move |result| -> BranchIter<D> {
                match result {
                    Ok(chosen) => {
                        let children = Arc::clone(&children);
                        let used = used.clone();
                        let rest = chosen.clone();
                        Box::new(iter::once(Ok(chosen)).chain(deferred(move || chains(children, used, rest))))
                    }
                    Err(err) => single(Err(err)),
                }
            })
    }))
}

impl<D: 'static> Executor<D> for Pick {
    type Emit = ();

    fn name(&self) -> &str {
        "pick"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        options.require_children("pick")
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<(), D>) -> BranchIter<D> {
        let children: Arc<[Parser<D>]> = cx.children().into();
        let all = chains(children, Vec::new(), branch);

        match self.limit {
            Some(limit) if limit > 0 => Box::new(all.take(limit)),
            _ => all,
        }
    }
}

/// Matches any number of distinct children in any order.
///
/// Each child is tried against the branch; every result is yielded and then
/// extended with the children not used yet.
pub fn pick<D: 'static>(children: impl IntoIterator<Item = Parser<D>>) -> ParserBuilder<Pick, D> {
    ParserBuilder::new(Pick::default()).children(children)
}

impl<D: 'static> ParserBuilder<Pick, D> {
    /// Caps the total number of yielded branches. `0` means no cap.
    pub fn limit(mut self, limit: usize) -> Self {
        self.executor.limit = Some(limit);
        self
    }
}
