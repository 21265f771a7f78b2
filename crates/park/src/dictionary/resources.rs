use crate::dictionary::Dictionary;
use crate::entities::{Dimension, LogicalMetric, LogicalTable, PhysicalTable};
use luthier_domain::Namespace;
use std::sync::Arc;

pub type DimensionDictionary = Dictionary<Dimension>;
pub type MetricDictionary = Dictionary<LogicalMetric>;
pub type LogicalTableDictionary = Dictionary<LogicalTable>;
pub type PhysicalTableDictionary = Dictionary<PhysicalTable>;

/// Dictionaries a park shares with the rest of the application.
///
/// Cloning shares the underlying dictionaries; hand a clone to
/// [`crate::ParkBuilder::dictionaries`] to have several parks publish into the same maps.
#[derive(Debug, Clone)]
pub struct ResourceDictionaries {
    dimensions: Arc<DimensionDictionary>,
    metrics: Arc<MetricDictionary>,
    logical_tables: Arc<LogicalTableDictionary>,
    physical_tables: Arc<PhysicalTableDictionary>,
}

impl ResourceDictionaries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dimensions: Arc::new(Dictionary::new(Namespace::Dimensions)),
            metrics: Arc::new(Dictionary::new(Namespace::Metrics)),
            logical_tables: Arc::new(Dictionary::new(Namespace::LogicalTables)),
            physical_tables: Arc::new(Dictionary::new(Namespace::PhysicalTables)),
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> &Arc<DimensionDictionary> {
        &self.dimensions
    }

    #[must_use]
    pub const fn metrics(&self) -> &Arc<MetricDictionary> {
        &self.metrics
    }

    #[must_use]
    pub const fn logical_tables(&self) -> &Arc<LogicalTableDictionary> {
        &self.logical_tables
    }

    #[must_use]
    pub const fn physical_tables(&self) -> &Arc<PhysicalTableDictionary> {
        &self.physical_tables
    }
}

impl Default for ResourceDictionaries {
    fn default() -> Self {
        Self::new()
    }
}
