use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::ParsingBranch;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) type ContextSlot = Arc<dyn Any + Send + Sync>;

/// Handle on the branch a custom parser is currently running for.
///
/// Only the engine creates scopes, so branch-scoped state can only be read
/// or written while a parse is in progress.
pub struct ParseScope<'a, D> {
    branch: &'a mut ParsingBranch<D>,
}

impl<'a, D> ParseScope<'a, D> {
    pub(crate) fn new(branch: &'a mut ParsingBranch<D>) -> Self {
        Self { branch }
    }

    /// The branch being parsed.
    #[inline]
    pub fn branch(&self) -> &ParsingBranch<D> {
        self.branch
    }

    /// Remaining input of the branch.
    #[inline]
    pub fn input(&self) -> &str {
        self.branch.input()
    }

    /// Current data of the branch.
    #[inline]
    pub fn data(&self) -> &D {
        self.branch.data()
    }
}

impl<D> fmt::Debug for ParseScope<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseScope")
            .field("branch", &self.branch.id())
            .finish()
    }
}

/// Branch-scoped value, similar to dynamically scoped parser state.
///
/// Each branch sees the initial value until a parser sets a new one; the
/// value then follows that branch and every branch forked from it.
///
/// # Example
///
/// ```ignore
/// let counter = create_context(0u32);
///
/// let next_number = define_parser("next_number", move |_: &(), scope, _emit| {
///     let n = counter.get(scope);
///     counter.set(scope, n + 1);
///     word(n.to_string()).build()
/// });
/// ```
pub struct Context<T> {
    id: u64,
    initial: Arc<T>,
    _marker: PhantomData<fn() -> T>,
}

/// Creates a new branch-scoped context with an initial value.
pub fn create_context<T>(initial: T) -> Context<T>
where
    T: Clone + Send + Sync + 'static,
{
    Context {
        id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
        initial: Arc::new(initial),
        _marker: PhantomData,
    }
}

impl<T> Context<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Reads the value visible to the scoped branch.
    pub fn get<D>(&self, scope: &ParseScope<'_, D>) -> T {
        scope
            .branch
            .context_slot(self.id)
            .and_then(|slot| slot.downcast_ref::<T>())
            .unwrap_or(&self.initial)
            .clone()
    }

    /// Replaces the value for the scoped branch and its descendants.
    pub fn set<D>(&self, scope: &mut ParseScope<'_, D>, value: T) {
        scope.branch.set_context_slot(self.id, Arc::new(value));
    }
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            initial: Arc::clone(&self.initial),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("id", &self.id).finish_non_exhaustive()
    }
}
