use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(0);

/// Identity tag for a logical grammar field.
///
/// Markers compare by identity: two markers created with the same name are
/// different markers. Clones share the identity.
///
/// # Example
///
/// ```ignore
/// let city = Marker::new("City");
/// let parser = fork(cities.iter().map(|c| literal(*c).build()))
///     .marker(city.clone())
///     .build()?;
///
/// for part in result.parts(&[city]) { /* only city parts keep their marker */ }
/// ```
#[derive(Clone)]
pub struct Marker {
    id: u64,
    name: Arc<str>,
}

impl Marker {
    /// Creates a new marker with a human readable name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    /// The marker's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Marker {}

impl std::hash::Hash for Marker {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({:?}#{})", self.name, self.id)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Marker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
