use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::literal::TextMatch;
use super::{nothing, single};
use crate::branch::{Match, ParsingBranch};
use crate::error::Error;
use crate::parser::{BaseOptions, BranchIter, ExecCtx, Executor, ParserBuilder};

#[allow(clippy::expect_used)]
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+([.,][0-9]+)?").expect("valid regex"));

#[allow(clippy::expect_used)]
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+").expect("valid regex"));

/// Matches a number at the start of the input.
#[derive(Debug, Clone, Default)]
pub struct Number {
    min: Option<f64>,
    max: Option<f64>,
    ignore_negative: bool,
    only_integer: bool,
    suggestions: bool,
}

impl Number {
    #[inline]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    fn accepts(&self, value: f64) -> bool {
        if self.ignore_negative && value < 0.0 {
            return false;
        }
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    fn parse_number<D: 'static>(&self, mut branch: ParsingBranch<D>, cx: &ExecCtx<f64, D>) -> BranchIter<D> {
        let pattern = if self.only_integer { &*INTEGER } else { &*FLOAT };
        let Some(found) = pattern.find(branch.input()) else {
            return nothing();
        };
        let text = found.as_str().to_owned();

        let Ok(value) = text.replacen(',', ".", 1).parse::<f64>() else {
            return nothing();
        };
        if !self.accepts(value) {
            return nothing();
        }

        if let Err(err) = branch.add_match(Match::input(text).with_marker(cx.marker())) {
            return single(Err(err));
        }
        cx.emit(&mut branch, value);
        single(Ok(branch))
    }

    /// Treats every integer in `[min, max]` as a literal alternative.
    fn suggest<D: 'static>(&self, branch: ParsingBranch<D>, cx: ExecCtx<f64, D>) -> BranchIter<D> {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return nothing();
        };
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let (low, high) = (low.ceil() as i64, high.floor() as i64);

        Box::new((low..=high).filter_map(move |candidate| {
            let text = candidate.to_string();
            let found = TextMatch::of(branch.input(), &text, false)?;
            let mut next = branch.clone();

            match found.apply(&mut next, &text, cx.options().marker()) {
                Ok(full) => {
                    if full {
                        cx.emit(&mut next, candidate as f64);
                    }
                    Some(Ok(next))
                }
                Err(err) => Some(Err(err)),
            }
        }))
    }
}

impl<D: 'static> Executor<D> for Number {
    type Emit = f64;

    fn name(&self) -> &str {
        "number"
    }

    fn validate(&self, _options: &BaseOptions<D>) -> Result<(), Error> {
        if self.suggestions {
            if !self.only_integer {
                return Err(Error::SuggestionsRequireInteger);
            }
            if self.min.is_none() || self.max.is_none() {
                return Err(Error::SuggestionsRequireBounds);
            }
        }
        Ok(())
    }

    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<f64, D>) -> BranchIter<D> {
        if self.suggestions {
            self.suggest(branch, cx)
        } else {
            self.parse_number(branch, &cx)
        }
    }
}

/// Matches an integer or decimal number (`3`, `-3`, `3.14`, `3,14`).
///
/// # Example
///
/// ```ignore
/// let tickets = number().min(1.0).max(10.0).only_integer(true).build()?;
/// ```
pub fn number<D: 'static>() -> ParserBuilder<Number, D> {
    ParserBuilder::new(Number::default())
}

impl<D: 'static> ParserBuilder<Number, D> {
    /// Smallest accepted value.
    pub fn min(mut self, min: f64) -> Self {
        self.executor.min = Some(min);
        self
    }

    /// Largest accepted value.
    pub fn max(mut self, max: f64) -> Self {
        self.executor.max = Some(max);
        self
    }

    /// Rejects negative values.
    pub fn ignore_negative(mut self, yes: bool) -> Self {
        self.executor.ignore_negative = yes;
        self
    }

    /// Rejects decimals.
    pub fn only_integer(mut self, yes: bool) -> Self {
        self.executor.only_integer = yes;
        self
    }

    /// Suggests every integer of the range while digits are being typed.
    ///
    /// Requires [`only_integer`](Self::only_integer) and both bounds.
    pub fn generate_suggestions(mut self, yes: bool) -> Self {
        self.executor.suggestions = yes;
        self
    }
}
