use luthier_domain::{DefaultTimeGrain, Granularity};
use std::sync::Arc;

/// A queryable table as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalTable {
    name: Arc<str>,
    granularity: Granularity,
    metrics: Vec<Arc<str>>,
}

impl LogicalTable {
    pub fn new(name: impl Into<Arc<str>>, granularity: Granularity, metrics: Vec<Arc<str>>) -> Self {
        Self { name: name.into(), granularity, metrics }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    #[must_use]
    pub fn metrics(&self) -> &[Arc<str>] {
        &self.metrics
    }
}

/// A table as stored in the backing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalTable {
    name: Arc<str>,
    grain: DefaultTimeGrain,
}

impl PhysicalTable {
    pub fn new(name: impl Into<Arc<str>>, grain: DefaultTimeGrain) -> Self {
        Self { name: name.into(), grain }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn grain(&self) -> DefaultTimeGrain {
        self.grain
    }
}
