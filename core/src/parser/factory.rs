use std::fmt;
use std::iter;
use std::sync::Arc;

use tracing::trace;

use super::{BranchIter, ErasedParser, Parser};
use crate::branch::{Marker, Match, ParsingBranch};
use crate::error::Error;

/// Hook fired for every branch a parser yields.
pub type OnMatch<D> = Arc<dyn Fn(&ParsingBranch<D>) + Send + Sync>;

/// Turns an emitted value into new branch data.
///
/// Returning `Some` replaces the branch data; `None` leaves it untouched.
pub type OnEmit<E, D> = Arc<dyn Fn(E, &D) -> Option<D> + Send + Sync>;

type EnabledFn<X> = Arc<dyn Fn(&X) -> bool + Send + Sync>;

/// Options shared by every combinator.
pub struct BaseOptions<D> {
    pub(crate) children: Vec<Parser<D>>,
    pub(crate) marker: Option<Marker>,
    pub(crate) placeholder: Option<String>,
    pub(crate) on_match: Option<OnMatch<D>>,
    pub(crate) requires_input: bool,
}

impl<D> BaseOptions<D> {
    /// Child parsers, in configured order.
    #[inline]
    pub fn children(&self) -> &[Parser<D>] {
        &self.children
    }

    #[inline]
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    #[inline]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Fails unless exactly `expected` children were configured.
    pub fn expect_children(&self, combinator: &'static str, expected: usize) -> Result<(), Error> {
        if self.children.len() == expected {
            Ok(())
        } else {
            Err(Error::ChildCount {
                combinator,
                expected,
                found: self.children.len(),
            })
        }
    }

    /// Fails when no children were configured.
    pub fn require_children(&self, combinator: &'static str) -> Result<(), Error> {
        if self.children.is_empty() {
            Err(Error::MissingChildren { combinator })
        } else {
            Ok(())
        }
    }
}

impl<D> Default for BaseOptions<D> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            marker: None,
            placeholder: None,
            on_match: None,
            requires_input: false,
        }
    }
}

/// Write path from an executor into branch data.
pub struct Emit<E, D> {
    handler: Option<OnEmit<E, D>>,
}

impl<E, D> Emit<E, D> {
    /// Hands `value` to the configured handler and stores its result.
    pub fn emit(&self, branch: &mut ParsingBranch<D>, value: E) {
        if let Some(handler) = &self.handler {
            if let Some(data) = handler(value, branch.data()) {
                branch.set_data(data);
            }
        }
    }

    /// The configured handler, for forwarding to an inner parser.
    #[inline]
    pub fn handler(&self) -> Option<&OnEmit<E, D>> {
        self.handler.as_ref()
    }
}

impl<E, D> Clone for Emit<E, D> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

/// Everything an executor can see besides the branch.
pub struct ExecCtx<E, D> {
    options: Arc<BaseOptions<D>>,
    emit: Emit<E, D>,
}

impl<E, D> ExecCtx<E, D> {
    #[inline]
    pub fn options(&self) -> &BaseOptions<D> {
        &self.options
    }

    #[inline]
    pub fn children(&self) -> &[Parser<D>] {
        &self.options.children
    }

    #[inline]
    pub fn marker(&self) -> Option<Marker> {
        self.options.marker.clone()
    }

    #[inline]
    pub fn emitter(&self) -> &Emit<E, D> {
        &self.emit
    }

    /// Shorthand for [`Emit::emit`].
    #[inline]
    pub fn emit(&self, branch: &mut ParsingBranch<D>, value: E) {
        self.emit.emit(branch, value);
    }
}

impl<E, D> Clone for ExecCtx<E, D> {
    fn clone(&self) -> Self {
        Self {
            options: Arc::clone(&self.options),
            emit: self.emit.clone(),
        }
    }
}

/// The matching logic of a combinator.
///
/// The runtime around it takes care of finished and disabled branches,
/// placeholders, the diagnostic stack and `on_match` hooks; an executor only
/// decides how one branch continues.
pub trait Executor<D: 'static>: Send + Sync + Sized + 'static {
    /// Value type handed to `on_emit`.
    type Emit: 'static;

    /// Name shown in diagnostics.
    fn name(&self) -> &str;

    /// Checks the configuration once, when the parser is built.
    fn validate(&self, options: &BaseOptions<D>) -> Result<(), Error> {
        let _ = options;
        Ok(())
    }

    /// Completes the configuration once validation passed, for example by
    /// building inner parsers that depend on the shared options.
    fn prepare(&mut self, options: &mut BaseOptions<D>, on_emit: Option<&OnEmit<Self::Emit, D>>) -> Result<(), Error> {
        let _ = (options, on_emit);
        Ok(())
    }

    /// Yields every continuation of `branch`.
    fn execute(self: Arc<Self>, branch: ParsingBranch<D>, cx: ExecCtx<Self::Emit, D>) -> BranchIter<D>;
}

enum Enabled<X> {
    Always(bool),
    When(EnabledFn<X>),
}

impl<X> Enabled<X> {
    fn check(&self, executor: &X) -> bool {
        match self {
            Enabled::Always(enabled) => *enabled,
            Enabled::When(predicate) => predicate(executor),
        }
    }
}

/// Fluent configuration for a combinator, finished with [`build`](Self::build).
///
/// # Example
///
/// ```ignore
/// let city = fork(cities.iter().map(|c| literal(*c).build()).collect::<Result<Vec<_>, _>>()?)
///     .marker(city_marker.clone())
///     .placeholder("city")
///     .on_match(|branch| tracing::info!(input = branch.input()))
///     .build()?;
/// ```
#[must_use = "a builder does nothing until `build` is called"]
pub struct ParserBuilder<X: Executor<D>, D: 'static> {
    pub(crate) executor: X,
    options: BaseOptions<D>,
    enabled: Enabled<X>,
    on_emit: Option<OnEmit<X::Emit, D>>,
}

impl<X: Executor<D>, D: 'static> ParserBuilder<X, D> {
    /// Wraps a custom executor.
    pub fn new(executor: X) -> Self {
        Self {
            executor,
            options: BaseOptions::default(),
            enabled: Enabled::Always(true),
            on_emit: None,
        }
    }

    /// Replaces the children.
    pub fn children(mut self, children: impl IntoIterator<Item = Parser<D>>) -> Self {
        self.options.children = children.into_iter().collect();
        self
    }

    /// Appends one child.
    pub fn child(mut self, child: Parser<D>) -> Self {
        self.options.children.push(child);
        self
    }

    /// Tags every match this parser adds.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.options.marker = Some(marker);
        self
    }

    /// Text shown in place of this parser when there is nothing to analyse.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.options.placeholder = Some(text.into());
        self
    }

    /// Turns the parser on or off. A disabled parser passes branches through.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Enabled::Always(enabled);
        self
    }

    /// Decides per parse whether the parser is on, from its own options.
    pub fn enabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        self.enabled = Enabled::When(Arc::new(predicate));
        self
    }

    /// Side effect fired for every yielded branch.
    pub fn on_match<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ParsingBranch<D>) + Send + Sync + 'static,
    {
        self.options.on_match = Some(Arc::new(hook));
        self
    }

    /// Receives emitted values; see [`OnEmit`].
    pub fn on_emit<F>(mut self, handler: F) -> Self
    where
        F: Fn(X::Emit, &D) -> Option<D> + Send + Sync + 'static,
    {
        self.on_emit = Some(Arc::new(handler));
        self
    }

    pub(crate) fn on_emit_handler(mut self, handler: Option<OnEmit<X::Emit, D>>) -> Self {
        self.on_emit = handler;
        self
    }

    /// Finishes branches that have no input left instead of running.
    pub fn requires_input(mut self, yes: bool) -> Self {
        self.options.requires_input = yes;
        self
    }

    /// Validates the configuration and creates the parser.
    pub fn build(mut self) -> Result<Parser<D>, Error> {
        self.executor.validate(&self.options)?;
        self.executor.prepare(&mut self.options, self.on_emit.as_ref())?;
        let name: Arc<str> = Arc::from(self.executor.name());

        Ok(Parser::from_erased(Arc::new(Runtime {
            name,
            executor: Arc::new(self.executor),
            options: Arc::new(self.options),
            enabled: self.enabled,
            emit: Emit {
                handler: self.on_emit,
            },
        })))
    }
}

impl<X: Executor<D> + fmt::Debug, D: 'static> fmt::Debug for ParserBuilder<X, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserBuilder")
            .field("executor", &self.executor)
            .field("children", &self.options.children.len())
            .field("marker", &self.options.marker)
            .field("placeholder", &self.options.placeholder)
            .finish_non_exhaustive()
    }
}

struct Runtime<X: Executor<D>, D: 'static> {
    name: Arc<str>,
    executor: Arc<X>,
    options: Arc<BaseOptions<D>>,
    enabled: Enabled<X>,
    emit: Emit<X::Emit, D>,
}

impl<X: Executor<D>, D: 'static> Runtime<X, D> {
    fn placeholder(&self, mut branch: ParsingBranch<D>, text: &str) -> Result<ParsingBranch<D>, Error> {
        branch.add_match(Match::placeholder(text).with_marker(self.options.marker.clone()))?;
        branch.mark_as_finished();
        Ok(branch)
    }
}

impl<X: Executor<D>, D: 'static> ErasedParser<D> for Runtime<X, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(self: Arc<Self>, mut branch: ParsingBranch<D>) -> BranchIter<D> {
        if branch.is_finished() || !self.enabled.check(&self.executor) {
            return Box::new(iter::once(Ok(branch)));
        }

        if let Some(text) = &self.options.placeholder {
            if branch.should_apply_placeholder() {
                return Box::new(iter::once(self.placeholder(branch, text)));
            }
        }

        if self.options.requires_input && !branch.has_more_input() {
            branch.mark_as_finished();
            return Box::new(iter::once(Ok(branch)));
        }

        trace!(
            combinator = %self.name,
            stack = %branch.stack_description(),
            input = branch.input(),
            "running parser"
        );

        let fallback = self
            .options
            .placeholder
            .as_ref()
            .filter(|_| !branch.has_more_input())
            .map(|_| branch.clone());

        branch.push_stack(Arc::clone(&self.name));
        let cx = ExecCtx {
            options: Arc::clone(&self.options),
            emit: self.emit.clone(),
        };
        let inner = Arc::clone(&self.executor).execute(branch, cx);

        Box::new(Relay {
            runtime: self,
            inner,
            matches: 0,
            failed: false,
            fallback,
        })
    }
}

/// Post-processes executor output: pops the stack entry, counts matches and
/// falls back to the placeholder when nothing matched and nothing failed.
struct Relay<X: Executor<D>, D: 'static> {
    runtime: Arc<Runtime<X, D>>,
    inner: BranchIter<D>,
    matches: usize,
    failed: bool,
    fallback: Option<ParsingBranch<D>>,
}

impl<X: Executor<D>, D: 'static> Iterator for Relay<X, D> {
    type Item = Result<ParsingBranch<D>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(Ok(mut branch)) => {
                self.matches += 1;
                branch.pop_stack();
                if let Some(hook) = &self.runtime.options.on_match {
                    hook(&branch);
                }
                Some(Ok(branch))
            }
            Some(Err(err)) => {
                self.failed = true;
                Some(Err(err))
            }
            None => {
                trace!(combinator = %self.runtime.name, matches = self.matches, failed = self.failed, "parser done");
                let fallback = self.fallback.take()?;
                if self.matches > 0 || self.failed {
                    return None;
                }
                let text = self.runtime.options.placeholder.as_deref()?;
                trace!(combinator = %self.runtime.name, "no match, using placeholder");
                Some(self.runtime.placeholder(fallback, text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::{DataHolder, MatchKind};

    struct Echo;

    impl Executor<()> for Echo {
        type Emit = ();

        fn name(&self) -> &str {
            "echo"
        }

        fn execute(self: Arc<Self>, branch: ParsingBranch<()>, _cx: ExecCtx<(), ()>) -> BranchIter<()> {
            let stack = branch.stack_description();
            assert_eq!(stack, "echo");
            Box::new(iter::once(Ok(branch)))
        }
    }

    struct Nothing;

    impl Executor<()> for Nothing {
        type Emit = ();

        fn name(&self) -> &str {
            "nothing"
        }

        fn execute(self: Arc<Self>, _branch: ParsingBranch<()>, _cx: ExecCtx<(), ()>) -> BranchIter<()> {
            Box::new(iter::empty())
        }
    }

    fn branch(input: &str) -> ParsingBranch<()> {
        ParsingBranch::new(input, DataHolder::default())
    }

    #[test]
    fn test_stack_is_balanced() {
        let parser = ParserBuilder::new(Echo).build().unwrap();
        let results: Vec<_> = parser.parse(branch("foo")).collect::<Result<_, _>>().unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stack_description(), "");
    }

    #[test]
    fn test_finished_branch_passes_through() {
        let parser = ParserBuilder::new(Nothing).build().unwrap();
        let mut finished = branch("foo");
        finished.mark_as_finished();

        assert_eq!(parser.parse(finished).count(), 1);
        assert_eq!(parser.parse(branch("foo")).count(), 0);
    }

    #[test]
    fn test_disabled_parser_passes_through() {
        let off = ParserBuilder::new(Nothing).enabled(false).build().unwrap();
        let when = ParserBuilder::new(Nothing)
            .enabled_when(|_: &Nothing| false)
            .build()
            .unwrap();

        assert_eq!(off.parse(branch("foo")).count(), 1);
        assert_eq!(when.parse(branch("foo")).count(), 1);
    }

    #[test]
    fn test_placeholder_without_input() {
        let parser = ParserBuilder::new(Echo).placeholder("city").build().unwrap();
        let result = parser.parse(branch("")).next().unwrap().unwrap();

        assert!(result.is_finished());
        assert_eq!(result.matches()[0].kind, MatchKind::Placeholder);
        assert_eq!(result.matches()[0].content, "city");
    }

    #[test]
    fn test_requires_input_finishes_branch() {
        let parser = ParserBuilder::new(Nothing).requires_input(true).build().unwrap();
        let result = parser.parse(branch("")).next().unwrap().unwrap();

        assert!(result.is_finished());
        assert!(!result.has_matches());
    }

    #[test]
    fn test_on_match_counts_results() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let parser = ParserBuilder::new(Echo)
            .on_match(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let _ = parser.parse(branch("foo")).count();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(format!("{parser:?}"), "Parser(\"echo\")");
    }
}
