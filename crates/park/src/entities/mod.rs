//! Entities the park builds or holds. Their behavior beyond construction is intentionally thin.

mod dimension;
mod metric;
mod search;
mod store;
mod table;

pub use dimension::Dimension;
pub use metric::{AggregationAverageMaker, LogicalMetric, LongSumMaker, MetricFormula, MetricMaker};
pub use search::{LuceneSearchProvider, NoOpSearchProvider, ScanSearchProvider, SearchProvider};
pub use store::{KeyValueStore, MapStore};
pub use table::{LogicalTable, PhysicalTable};
