use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Answers dimension value searches. Custom providers are recovered through [`Self::as_any`].
pub trait SearchProvider: Any + fmt::Debug + Send + Sync {
    /// Discriminator the provider was built from.
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Accepts queries but finds nothing; only guards the query weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoOpSearchProvider {
    query_weight_limit: u32,
}

impl NoOpSearchProvider {
    #[must_use]
    pub const fn new(query_weight_limit: u32) -> Self {
        Self { query_weight_limit }
    }

    #[must_use]
    pub const fn query_weight_limit(&self) -> u32 {
        self.query_weight_limit
    }

    /// Whether a query of `weight` stays within the limit.
    #[must_use]
    pub const fn admits(&self, weight: u32) -> bool {
        weight <= self.query_weight_limit
    }
}

impl SearchProvider for NoOpSearchProvider {
    fn kind(&self) -> &'static str {
        "NoOpSearchProvider"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Index-backed provider. Only its settings are modelled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuceneSearchProvider {
    index_path: PathBuf,
    max_results: u32,
    search_timeout: Duration,
}

impl LuceneSearchProvider {
    pub fn new(index_path: impl Into<PathBuf>, max_results: u32, search_timeout: Duration) -> Self {
        Self { index_path: index_path.into(), max_results, search_timeout }
    }

    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    #[must_use]
    pub const fn max_results(&self) -> u32 {
        self.max_results
    }

    #[must_use]
    pub const fn search_timeout(&self) -> Duration {
        self.search_timeout
    }
}

impl SearchProvider for LuceneSearchProvider {
    fn kind(&self) -> &'static str {
        "LuceneSearchProvider"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Scans the backing store; no settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSearchProvider;

impl SearchProvider for ScanSearchProvider {
    fn kind(&self) -> &'static str {
        "ScanSearchProvider"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
