use std::sync::Arc;

use super::{literal, nothing, single};
use crate::branch::{Marker, Match, ParsingBranch};
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, OnEmit, Parser, ParserBuilder};

const SEPARATOR: &str = " ";

/// Wraps text or a child parser with space boundaries.
#[derive(Debug, Clone, Default)]
pub struct Word {
    text: Option<String>,
}

impl Word {
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

}

/// Checks the boundary in front of the word, consuming a typed separator.
///
/// Returns `None` when the input continues without a separator.
fn open<D>(mut branch: ParsingBranch<D>, marker: Option<&Marker>) -> Option<Result<ParsingBranch<D>, Error>> {
    if !branch.has_matches() || branch.matched_input().ends_with(SEPARATOR) {
        return Some(Ok(branch));
    }

    let separator = if branch.input().starts_with(SEPARATOR) {
        Match::input(SEPARATOR)
    } else if branch.has_more_input() {
        return None;
    } else {
        Match::whitespace(SEPARATOR)
    };

    Some(
        branch
            .add_match(separator.with_marker(marker.cloned()))
            .map(|()| branch),
    )
}

/// Checks the boundary after the word.
fn close<D>(mut branch: ParsingBranch<D>, marker: Option<&Marker>) -> Option<Result<ParsingBranch<D>, Error>> {
    let separator = if branch.input().starts_with(SEPARATOR) {
        Match::input(SEPARATOR)
    } else if branch.matched_input().ends_with(SEPARATOR) || branch.is_finished() {
        return Some(Ok(branch));
    } else if !branch.has_more_input() {
        Match::suggestion(SEPARATOR)
    } else {
        return None;
    };

    Some(
        branch
            .add_match(separator.with_marker(marker.cloned()))
            .map(|()| branch),
    )
}

impl<D: 'static> Executor<D> for Word {
    type Emit = String;

    fn name(&self) -> &str {
        "word"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        match &self.text {
            Some(_) if !options.children().is_empty() => Err(Error::WordTextAndChild),
            Some(text) if text.is_empty() => Err(Error::WordMissingContent),
            Some(_) => Ok(()),
            None if options.children().is_empty() => Err(Error::WordMissingContent),
            None => options.expect_children("word", 1),
        }
    }

    fn prepare(&mut self, options: &mut BaseOptions<D>, on_emit: Option<&OnEmit<String, D>>) -> Result<(), Error> {
        let Some(text) = &self.text else {
            return Ok(());
        };

        let mut inner = literal(text.as_str()).on_emit_handler(on_emit.cloned());
        if let Some(marker) = options.marker() {
            inner = inner.marker(marker.clone());
        }
        options.children = vec![inner.build()?];
        Ok(())
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<String, D>) -> BranchIter<D> {
        let marker = cx.marker();
        let branch = match open(branch, marker.as_ref()) {
            Some(Ok(branch)) => branch,
            Some(Err(err)) => return single(Err(err)),
            None => return nothing(),
        };

        let Some(inner) = cx.children().first().cloned() else {
            return single(Err(Error::WordMissingContent));
        };

        Box::new(inner.parse(branch).filter_map(move |result| match result {
            Ok(branch) => close(branch, marker.as_ref()),
            Err(err) => Some(Err(err)),
        }))
    }
}

/// Matches `text` as a whole word.
///
/// A space is required before the word unless it starts the branch, and
/// after it unless the input ends there; at the end of input the space is
/// suggested.
///
/// # Example
///
/// ```ignore
/// let parser = sequence([word("foo").build()?, word("bar").build()?]).build()?;
/// // "foo bar" matches, "foobar" does not
/// ```
pub fn word<D: 'static>(text: impl Into<String>) -> ParserBuilder<Word, D> {
    ParserBuilder::new(Word {
        text: Some(text.into()),
    })
}

/// Applies word boundaries around any parser.
pub fn word_with<D: 'static>(child: Parser<D>) -> ParserBuilder<Word, D> {
    ParserBuilder::new(Word::default()).child(child)
}
