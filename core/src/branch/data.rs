use std::fmt;
use std::sync::Arc;

type InitFn<D> = Arc<dyn Fn() -> D + Send + Sync>;
type CloneFn<D> = Arc<dyn Fn(&D) -> D + Send + Sync>;

/// Describes how branch data is created and forked.
///
/// `init` supplies the data of the root branch; `clone` produces an
/// independent copy whenever a branch forks.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Clone)]
/// struct Ticket { city: Option<String>, count: Option<f64> }
///
/// let grammar = Grammar::builder()
///     .parser(parser)
///     .data_holder(DataHolder::new(Ticket::default))
///     .build()?;
/// ```
pub struct DataHolder<D> {
    init: InitFn<D>,
    clone: CloneFn<D>,
}

impl<D> DataHolder<D> {
    /// Pairs an initializer with an explicit clone function.
    pub fn with_clone<I, C>(init: I, clone: C) -> Self
    where
        I: Fn() -> D + Send + Sync + 'static,
        C: Fn(&D) -> D + Send + Sync + 'static,
    {
        Self {
            init: Arc::new(init),
            clone: Arc::new(clone),
        }
    }

    /// Creates the data for a root branch.
    #[inline]
    pub fn init(&self) -> D {
        (self.init)()
    }

    /// Copies data for a forked branch.
    #[inline]
    pub fn clone_data(&self, data: &D) -> D {
        (self.clone)(data)
    }
}

impl<D: Clone + 'static> DataHolder<D> {
    /// Uses `D::clone` when branches fork.
    pub fn new<I>(init: I) -> Self
    where
        I: Fn() -> D + Send + Sync + 'static,
    {
        Self::with_clone(init, D::clone)
    }
}

impl<D: Default + Clone + 'static> Default for DataHolder<D> {
    fn default() -> Self {
        Self::new(D::default)
    }
}

impl<D> Clone for DataHolder<D> {
    fn clone(&self) -> Self {
        Self {
            init: Arc::clone(&self.init),
            clone: Arc::clone(&self.clone),
        }
    }
}

impl<D> fmt::Debug for DataHolder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataHolder").finish_non_exhaustive()
    }
}
