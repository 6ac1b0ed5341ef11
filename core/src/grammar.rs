//! The grammar driver: runs a root parser over an input string.

use std::fmt;

use tracing::debug;

use crate::branch::{DataHolder, ParseResult, ParsingBranch};
use crate::config::ParseOptions;
use crate::error::Error;
use crate::parser::{BranchIter, Parser};

/// A root parser plus the description of its branch data.
///
/// # Example
///
/// ```ignore
/// let grammar = Grammar::new(fork([literal("foo").build()?, literal("bar").build()?]).build()?);
///
/// for result in grammar.parse("fo", ParseOptions::new().allow_partial()) {
///     println!("{}", result?.suggestion());
/// }
/// ```
pub struct Grammar<D> {
    parser: Parser<D>,
    holder: DataHolder<D>,
}

impl<D: Default + Clone + 'static> Grammar<D> {
    /// Creates a grammar whose data starts as `D::default()`.
    pub fn new(parser: Parser<D>) -> Self {
        Self::with_holder(parser, DataHolder::default())
    }
}

impl<D: 'static> Grammar<D> {
    /// Creates a grammar with explicit data creation and cloning.
    pub fn with_holder(parser: Parser<D>, holder: DataHolder<D>) -> Self {
        Self { parser, holder }
    }

    pub fn builder() -> GrammarBuilder<D> {
        GrammarBuilder::default()
    }

    /// The root parser.
    #[inline]
    pub fn parser(&self) -> &Parser<D> {
        &self.parser
    }

    /// Lazily parses `input`.
    ///
    /// Nothing runs until the returned iterator is pulled; stopping early
    /// leaves the rest of the search unexplored.
    pub fn parse(&self, input: &str, options: ParseOptions) -> ParseResults<D> {
        debug!(
            parser = self.parser.name(),
            input_len = input.len(),
            max_results = ?options.max_results,
            require_entire_input = options.require_entire_input,
            "parse started"
        );
        let root = ParsingBranch::new(input, self.holder.clone());

        ParseResults {
            branches: Some(self.parser.parse(root)),
            options,
            yielded: 0,
        }
    }

    /// Parses `input` and collects every result, stopping at the first error.
    pub fn parse_all(&self, input: &str, options: ParseOptions) -> Result<Vec<ParseResult<D>>, Error> {
        self.parse(input, options).collect()
    }

    /// Lazily parses `input` as a [`Stream`](futures_core::Stream).
    #[cfg(feature = "futures")]
    pub fn parse_stream(&self, input: &str, options: ParseOptions) -> crate::stream::ParseStream<D> {
        crate::stream::ParseStream::new(self.parse(input, options))
    }
}

impl<D> Clone for Grammar<D> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            holder: self.holder.clone(),
        }
    }
}

impl<D> fmt::Debug for Grammar<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

/// Builder for grammars with a custom [`DataHolder`].
pub struct GrammarBuilder<D> {
    parser: Option<Parser<D>>,
    holder: Option<DataHolder<D>>,
}

impl<D> Default for GrammarBuilder<D> {
    fn default() -> Self {
        Self {
            parser: None,
            holder: None,
        }
    }
}

impl<D: 'static> GrammarBuilder<D> {
    pub fn parser(mut self, parser: Parser<D>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn data_holder(mut self, holder: DataHolder<D>) -> Self {
        self.holder = Some(holder);
        self
    }

    /// Fails with [`Error::MissingParser`] when no parser was set.
    ///
    /// Without a data holder, data starts as `D::default()`.
    pub fn build(self) -> Result<Grammar<D>, Error>
    where
        D: Default + Clone,
    {
        let parser = self.parser.ok_or(Error::MissingParser)?;
        Ok(Grammar {
            parser,
            holder: self.holder.unwrap_or_default(),
        })
    }
}

/// Lazy iterator over the results of [`Grammar::parse`].
pub struct ParseResults<D> {
    branches: Option<BranchIter<D>>,
    options: ParseOptions,
    yielded: usize,
}

impl<D: 'static> Iterator for ParseResults<D> {
    type Item = Result<ParseResult<D>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.branches.is_some() && self.options.max_results.is_some_and(|max| self.yielded >= max) {
            debug!(results = self.yielded, "result cap reached");
            self.branches = None;
        }

        loop {
            let next = self.branches.as_mut()?.next();
            let Some(result) = next else {
                debug!(results = self.yielded, "parse finished");
                self.branches = None;
                return None;
            };

            let branch = match result {
                Ok(branch) => branch,
                Err(err) => return Some(Err(err)),
            };

            if self.options.require_entire_input && branch.has_more_input() {
                debug!(branch = branch.id(), remaining = branch.input(), "dropping partial parse");
                continue;
            }

            self.yielded += 1;
            return Some(Ok(branch.into_result()));
        }
    }
}

impl<D> fmt::Debug for ParseResults<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResults")
            .field("options", &self.options)
            .field("yielded", &self.yielded)
            .field("done", &self.branches.is_none())
            .finish()
    }
}
