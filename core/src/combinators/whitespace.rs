use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{nothing, single};
use crate::branch::{Match, ParsingBranch};
use crate::parser::{BranchIter, ExecCtx, Executor, ParserBuilder};

#[allow(clippy::expect_used)]
static LEADING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").expect("valid regex"));

/// Matches a run of whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whitespace;

impl<D: 'static> Executor<D> for Whitespace {
    type Emit = String;

    fn name(&self) -> &str {
        "whitespace"
    }

    fn execute(self: Arc<Self>, mut branch: ParsingBranch<D>, cx: ExecCtx<String, D>) -> BranchIter<D> {
        let Some(found) = LEADING_WHITESPACE.find(branch.input()) else {
            return nothing();
        };
        let text = found.as_str().to_owned();

        if let Err(err) = branch.add_match(Match::input(text.as_str()).with_marker(cx.marker())) {
            return single(Err(err));
        }
        cx.emit(&mut branch, text);
        single(Ok(branch))
    }
}

/// Matches all whitespace at the start of the input.
pub fn whitespace<D: 'static>() -> ParserBuilder<Whitespace, D> {
    ParserBuilder::new(Whitespace)
}
