use std::iter;
use std::sync::Arc;

use super::literal::TextMatch;
use super::{deferred, nothing, single};
use crate::branch::{Match, MatchKind, ParsingBranch};
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, Parser, ParserBuilder};

/// Hard ceiling on repetitions; a repeated fork multiplies quickly.
pub const MAX_REPEATS: usize = 6;

/// One or more occurrences of a child joined by glue text.
#[derive(Debug, Clone)]
pub struct Repeat {
    glue: Vec<String>,
    limit: usize,
    repetition_placeholder: Option<String>,
}

impl Repeat {
    #[inline]
    pub fn glue(&self) -> &[String] {
        &self.glue
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Text shown for a further occurrence once the input is used up;
    /// defaults to the first glue.
    pub fn repetition_placeholder(&self) -> Option<&str> {
        self.repetition_placeholder
            .as_deref()
            .or_else(|| self.glue.first().map(String::as_str))
    }
}

struct Extend<D> {
    subject: Parser<D>,
    glue: Arc<[String]>,
    placeholder: Option<Arc<str>>,
}

impl<D: 'static> Extend<D> {
    /// Glue followed by another subject, recursively, while `remaining`
    /// allows one more occurrence.
    fn repeat_after(self: Arc<Self>, branch: ParsingBranch<D>, remaining: usize) -> BranchIter<D> {
        if remaining <= 1 || branch.is_finished() || branch.has_match_of_kind(MatchKind::Suggestion) {
            return nothing();
        }

        if let Some(text) = self.placeholder.as_deref().filter(|_| branch.should_apply_placeholder()) {
            let mut placeheld = branch;
            return single(placeheld.add_match(Match::placeholder(text)).map(|()| {
                placeheld.mark_as_finished();
                placeheld
            }));
        }

        let glue = Arc::clone(&self.glue);
        Box::new((0..glue.len()).flat_map(move |index| {
            let text = &glue[index];
            let Some(found) = TextMatch::of(branch.input(), text, false) else {
                return nothing();
            };

            let mut glued = branch.clone();
            if let Err(err) = found.apply(&mut glued, text, None) {
                return single(Err(err));
            }
            if glued.has_match_of_kind(MatchKind::Suggestion) {
                return single(Ok(glued));
            }

            let this = Arc::clone(&self);
            Box::new(self.subject.parse(glued).flat_map(move |result| -> BranchIter<D> {
                match result {
                    Ok(repeated) => {
                        let this = Arc::clone(&this);
                        let rest = repeated.clone();
                        Box::new(iter::once(Ok(repeated)).chain(deferred(move || this.repeat_after(rest, remaining - 1))))
                    }
                    Err(err) => single(Err(err)),
                }
            }))
        }))
    }
}

impl<D: 'static> Executor<D> for Repeat {
    type Emit = ();

    fn name(&self) -> &str {
        "repeat"
    }

    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        options.expect_children("repeat", 1)?;
        if self.glue.is_empty() || self.glue.iter().any(String::is_empty) {
            return Err(Error::EmptyGlue);
        }
        if self.limit > MAX_REPEATS {
            return Err(Error::RepeatLimitTooLarge {
                limit: self.limit,
                max: MAX_REPEATS,
            });
        }
        Ok(())
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<(), D>) -> BranchIter<D> {
        let Some(subject) = cx.children().first().cloned() else {
            return nothing();
        };
        let extend = Arc::new(Extend {
            subject: subject.clone(),
            glue: self.glue.as_slice().into(),
            placeholder: self.repetition_placeholder().map(Arc::from),
        });
        let limit = self.limit;

        Box::new(subject.parse(branch).flat_map(move |result| -> BranchIter<D> {
            match result {
                Ok(first) => {
                    let extend = Arc::clone(&extend);
                    let rest = first.clone();
                    Box::new(iter::once(Ok(first)).chain(deferred(move || extend.repeat_after(rest, limit))))
                }
                Err(err) => single(Err(err)),
            }
        }))
    }
}

/// Matches `child` one or more times, separated by glue.
///
/// Glue must be configured with [`glue`](ParserBuilder::glue) or
/// [`glue_any`](ParserBuilder::glue_any). Once the subject has matched, the
/// glue is suggested when the input ends. A branch that used up its input
/// through fuzzy or suggested parts gets the repetition placeholder instead.
///
/// # Example
///
/// ```ignore
/// let fruits = repeat(fork([literal("apple").build()?, literal("banana").build()?]).build()?)
///     .glue(" and ")
///     .limit(3)
///     .build()?;
/// ```
pub fn repeat<D: 'static>(child: Parser<D>) -> ParserBuilder<Repeat, D> {
    ParserBuilder::new(Repeat {
        glue: Vec::new(),
        limit: MAX_REPEATS,
        repetition_placeholder: None,
    })
    .child(child)
}

impl<D: 'static> ParserBuilder<Repeat, D> {
    /// Separates occurrences with `text`.
    pub fn glue(mut self, text: impl Into<String>) -> Self {
        self.executor.glue = vec![text.into()];
        self
    }

    /// Accepts any of `texts` between occurrences; the first one is suggested
    /// first.
    pub fn glue_any<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.executor.glue = texts.into_iter().map(Into::into).collect();
        self
    }

    /// Maximum number of occurrences, at most [`MAX_REPEATS`].
    pub fn limit(mut self, limit: usize) -> Self {
        self.executor.limit = limit;
        self
    }

    /// Placeholder for a further occurrence, shown instead of the glue when
    /// the input ran out on a branch that was not typed out in full.
    pub fn repetition_placeholder(mut self, text: impl Into<String>) -> Self {
        self.executor.repetition_placeholder = Some(text.into());
        self
    }
}
