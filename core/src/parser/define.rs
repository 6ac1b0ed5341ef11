use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use super::factory::{BaseOptions, ExecCtx, Executor, ParserBuilder};
use super::{BranchIter, Parser};
use crate::branch::{ParseScope, ParsingBranch};
use crate::error::Error;

type CreatorFn<O, E, D> =
    dyn Fn(&O, &mut ParseScope<'_, D>, Emitter<E>) -> Result<Parser<D>, Error> + Send + Sync;
type ValidatorFn<O> = dyn Fn(&O) -> Result<(), String> + Send + Sync;

/// Buffers values emitted by the inner parser of a custom parser.
///
/// Buffered values are handed to the custom parser's own `on_emit` for each
/// branch the inner parser yields, then the buffer is cleared.
pub struct Emitter<E> {
    buffer: Arc<Mutex<Vec<E>>>,
}

impl<E> Emitter<E> {
    fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Records a value for the branch currently being produced.
    pub fn emit(&self, value: E) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value);
    }

    fn drain(&self) -> Vec<E> {
        std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}

/// A user defined combinator, created with [`define_parser`].
pub struct ParserDefinition<O, E, D> {
    name: Arc<str>,
    creator: Arc<CreatorFn<O, E, D>>,
    validator: Option<Arc<ValidatorFn<O>>>,
}

/// Turns a parser creating function into a reusable combinator.
///
/// `creator` runs once for every branch that reaches the parser. It may read
/// and write [`Context`](crate::Context) values through the scope and
/// returns the parser that actually matches the branch. Values passed to the
/// [`Emitter`] are delivered to the `on_emit` handler configured on the
/// created parser.
///
/// # Example
///
/// ```ignore
/// let price = define_parser("price", |currency: &String, _scope, emit: Emitter<f64>| {
///     sequence([
///         number().max(100.0).on_emit(move |n, _| { emit.emit(n); None }).build()?,
///         literal(currency.as_str()).build()?,
///     ])
///     .build()
/// });
///
/// let parser = price.create("usd".into()).on_emit(|n, _| Some(n)).build()?;
/// ```
pub fn define_parser<O, E, D, F>(name: impl Into<Arc<str>>, creator: F) -> ParserDefinition<O, E, D>
where
    F: Fn(&O, &mut ParseScope<'_, D>, Emitter<E>) -> Result<Parser<D>, Error> + Send + Sync + 'static,
{
    ParserDefinition {
        name: name.into(),
        creator: Arc::new(creator),
        validator: None,
    }
}

impl<O, E, D> ParserDefinition<O, E, D>
where
    O: Send + Sync + 'static,
    E: 'static,
    D: 'static,
{
    /// Adds an options check, run when a parser is built from the definition.
    pub fn validate<V>(mut self, validator: V) -> Self
    where
        V: Fn(&O) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts configuring a parser instance with the given options.
    pub fn create(&self, options: O) -> ParserBuilder<Custom<O, E, D>, D> {
        ParserBuilder::new(Custom {
            definition: self.clone(),
            options,
            _data: PhantomData,
        })
    }
}

impl<O, E, D> Clone for ParserDefinition<O, E, D> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            creator: Arc::clone(&self.creator),
            validator: self.validator.clone(),
        }
    }
}

impl<O, E, D> fmt::Debug for ParserDefinition<O, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Executor behind parsers made from a [`ParserDefinition`].
pub struct Custom<O, E, D> {
    definition: ParserDefinition<O, E, D>,
    options: O,
    _data: PhantomData<fn() -> D>,
}

impl<O, E, D> Custom<O, E, D> {
    /// Options the parser was created with.
    #[inline]
    pub fn options(&self) -> &O {
        &self.options
    }
}

impl<O, E, D> Executor<D> for Custom<O, E, D>
where
    O: Send + Sync + 'static,
    E: 'static,
    D: 'static,
{
    type Emit = E;

    fn name(&self) -> &str {
        &self.definition.name
    }

    fn validate(&self, _options: &BaseOptions<D>) -> Result<(), Error> {
        match &self.definition.validator {
            Some(validator) => validator(&self.options).map_err(|reason| Error::InvalidOptions {
                combinator: self.definition.name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn execute(self: Arc<Self>, mut branch: ParsingBranch<D>, cx: ExecCtx<E, D>) -> BranchIter<D> {
        let emitter = Emitter::new();
        let created = {
            let mut scope = ParseScope::new(&mut branch);
            (self.definition.creator)(&self.options, &mut scope, emitter.clone())
        };

        let inner = match created {
            Ok(parser) => parser,
            Err(err) => return Box::new(iter::once(Err(err))),
        };

        Box::new(inner.parse(branch).map(move |result| {
            let mut branch = result?;
            for value in emitter.drain() {
                cx.emit(&mut branch, value);
            }
            Ok(branch)
        }))
    }
}
