//! Parse configuration for a single [`Grammar::parse`](crate::Grammar::parse) call.
//!
//! # Example
//!
//! ```ignore
//! use suggestkit_core::config::ParseOptions;
//!
//! // Only complete parses, no cap (the default)
//! let options = ParseOptions::default();
//!
//! // Autocomplete popup: accept partial parses, show at most 5
//! let options = ParseOptions::new()
//!     .with_require_entire_input(false)
//!     .with_max_results(5);
//! ```

/// Configuration for a parse run.
///
/// # Default Values
///
/// | Setting | Default | Meaning |
/// |---------|---------|---------|
/// | `max_results` | `None` | Yield every result |
/// | `require_entire_input` | `true` | Drop branches that left input unconsumed |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of results to yield.
    ///
    /// The search stops as soon as this many results have been produced;
    /// the rest of the branch tree is never explored.
    pub max_results: Option<usize>,

    /// Whether a branch must consume the whole input to become a result.
    ///
    /// When parsing `"blue and also I like cats"` against a color grammar,
    /// `"blue"` alone matches, but it is not a parse of the input.
    pub require_entire_input: bool,
}

impl Default for ParseOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseOptions {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_results: None,
        require_entire_input: true,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Caps the number of yielded results.
    #[inline]
    pub const fn with_max_results(mut self, count: usize) -> Self {
        self.max_results = Some(count);
        self
    }

    /// Sets whether results must consume the entire input.
    #[inline]
    pub const fn with_require_entire_input(mut self, require: bool) -> Self {
        self.require_entire_input = require;
        self
    }

    /// Accepts partial parses, the usual setting for autocomplete.
    #[inline]
    pub const fn allow_partial(self) -> Self {
        self.with_require_entire_input(false)
    }
}
