//! Decoder configuration.

use crate::layout::CacheLayout;

/// Configuration for reading a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Layout the cache is expected to have. The header must match it.
    pub layout: CacheLayout,

    /// Stop after this many records (`None` = all).
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: CacheLayout::native(),
            limit: None,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expected layout.
    #[must_use]
    pub const fn layout(mut self, layout: CacheLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the record limit.
    #[must_use]
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}
