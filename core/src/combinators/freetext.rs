use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::branch::{Match, ParsingBranch};
use crate::parser::{BranchIter, ExecCtx, Executor, ParserBuilder};

/// Score factor per captured word; longer captures rank lower.
const WORD_PENALTY: f64 = 0.975;

type FilterFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Byte length of the run of delimiters at the start of `text`.
fn delimiter_run<S: AsRef<str>>(text: &str, delimiters: &[S]) -> usize {
    let mut end = 0;
    'run: while end < text.len() {
        for delimiter in delimiters {
            let delimiter = delimiter.as_ref();
            if !delimiter.is_empty() && text[end..].starts_with(delimiter) {
                end += delimiter.len();
                continue 'run;
            }
        }
        break;
    }
    end
}

fn starts_with_delimiter<S: AsRef<str>>(text: &str, delimiters: &[S]) -> bool {
    delimiters
        .iter()
        .any(|d| !d.as_ref().is_empty() && text.starts_with(d.as_ref()))
}

/// Next word boundary at or after `offset`.
///
/// Returns the end of the prefix that closes the word, and the offset the
/// scan resumes from once the delimiters after it are skipped.
fn next_boundary<S: AsRef<str>>(input: &str, offset: usize, delimiters: &[S]) -> Option<(usize, usize)> {
    let rest = input.get(offset..).filter(|rest| !rest.is_empty())?;
    let leading = delimiter_run(rest, delimiters);
    if leading == rest.len() {
        return Some((input.len(), input.len()));
    }

    let word = &rest[leading..];
    let first = word.chars().next().map_or(0, char::len_utf8);
    let word_len = word
        .char_indices()
        .skip(1)
        .find(|&(idx, _)| starts_with_delimiter(&word[idx..], delimiters))
        .map_or(word.len(), |(idx, _)| idx)
        .max(first);

    let end = offset + leading + word_len;
    Some((end, end + delimiter_run(&input[end..], delimiters)))
}

/// Every prefix of `input` that ends at the end of a word, computed lazily.
///
/// Words are separated by runs of `delimiters`; consecutive delimiters form a
/// single boundary and the prefixes keep the original separators. Input made
/// only of delimiters yields itself once, empty input yields nothing.
///
/// # Example
///
/// ```ignore
/// let prefixes: Vec<_> = substrings(",12 , 45", &[" ", ","]).collect();
/// assert_eq!(prefixes, [",12", ",12 , 45"]);
/// ```
pub fn substrings<'a, S>(input: &'a str, delimiters: &'a [S]) -> impl Iterator<Item = &'a str> + 'a
where
    S: AsRef<str> + 'a,
{
    let mut offset = 0;
    iter::from_fn(move || {
        let (end, next) = next_boundary(input, offset, delimiters)?;
        offset = next;
        Some(&input[..end])
    })
}

/// Matches arbitrary text up to a word boundary.
#[derive(Clone)]
pub struct Freetext {
    filter: Option<FilterFn>,
    max_length: Option<usize>,
    split_by: Vec<String>,
}

impl Default for Freetext {
    fn default() -> Self {
        Self {
            filter: None,
            max_length: None,
            split_by: vec![" ".into(), ",".into()],
        }
    }
}

impl fmt::Debug for Freetext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Freetext")
            .field("filter", &self.filter.is_some())
            .field("max_length", &self.max_length)
            .field("split_by", &self.split_by)
            .finish()
    }
}

impl Freetext {
    fn accepts(&self, variant: &str) -> bool {
        if self.max_length.is_some_and(|max| variant.chars().count() > max) {
            return false;
        }
        self.filter.as_ref().is_none_or(|filter| filter(variant))
    }
}

impl<D: 'static> Executor<D> for Freetext {
    type Emit = String;

    fn name(&self) -> &str {
        "freetext"
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<String, D>) -> BranchIter<D> {
        let mut offset = 0;

        Box::new(iter::from_fn(move || {
            loop {
                let input = branch.input();
                let (end, next_offset) = next_boundary(input, offset, self.split_by.as_slice())?;
                offset = next_offset;

                let variant = &input[..end];
                if !self.accepts(variant) {
                    continue;
                }
                let variant = variant.to_owned();

                let words = i32::try_from(variant.split(' ').count()).unwrap_or(i32::MAX);
                let factor = WORD_PENALTY.powi(words.saturating_add(1)).max(f64::MIN_POSITIVE);
                let mut next = branch.clone();
                let added = next
                    .add_match(Match::input(variant.as_str()).with_marker(cx.marker()))
                    .and_then(|()| next.add_score(factor));
                if let Err(err) = added {
                    return Some(Err(err));
                }

                cx.emit(&mut next, variant);
                return Some(Ok(next));
            }
        }))
    }
}

/// Captures free text, yielding one branch per word boundary.
///
/// Shorter captures score higher, so a following parser that matches the
/// rest of the input wins over a greedy capture.
pub fn freetext<D: 'static>() -> ParserBuilder<Freetext, D> {
    ParserBuilder::new(Freetext::default())
}

impl<D: 'static> ParserBuilder<Freetext, D> {
    /// Skips captures the predicate rejects.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.executor.filter = Some(Arc::new(filter));
        self
    }

    /// Skips captures longer than `chars` characters.
    pub fn max_length(mut self, chars: usize) -> Self {
        self.executor.max_length = Some(chars);
        self
    }

    /// Word delimiters, `[" ", ","]` by default. Multi-char delimiters are
    /// allowed.
    pub fn split_by<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.executor.split_by = delimiters.into_iter().map(Into::into).collect();
        self
    }
}
