use crate::dictionary::MetricDictionary;
use crate::error::{ParkError, ParkResult};
use luthier_domain::{DefaultTimeGrain, Namespace};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A named metric, as published into the shared metric dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalMetric {
    name: Arc<str>,
    formula: MetricFormula,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricFormula {
    /// Sum of a raw long column.
    LongSum { field: String },
    /// Average of another metric, re-aggregated at `grain`.
    AggregationAverage { inner: Arc<LogicalMetric>, grain: DefaultTimeGrain },
}

impl LogicalMetric {
    pub fn new(name: impl Into<Arc<str>>, formula: MetricFormula) -> Self {
        Self { name: name.into(), formula }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn formula(&self) -> &MetricFormula {
        &self.formula
    }
}

/// Turns dependency names into a [`LogicalMetric`] and publishes it.
pub trait MetricMaker: Any + fmt::Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    /// How many dependency names [`Self::make`] takes.
    fn dependency_count(&self) -> usize;

    /// Builds `metric` from `dependencies`, or returns the metric already published under that
    /// name.
    ///
    /// # Errors
    /// [`ParkError::Validation`] on field `dependencies` when the count is wrong or a referenced
    /// metric is unknown.
    fn make(&self, metric: &str, dependencies: &[&str]) -> ParkResult<Arc<LogicalMetric>>;

    fn as_any(&self) -> &dyn Any;
}

fn check_dependencies(maker: &dyn MetricMaker, metric: &str, dependencies: &[&str]) -> ParkResult<()> {
    let expected = maker.dependency_count();
    if dependencies.len() == expected {
        return Ok(());
    }
    Err(ParkError::validation(
        Namespace::Metrics,
        metric,
        "dependencies",
        format!("{} expects {expected} dependencies, got {}", maker.kind(), dependencies.len()),
    ))
}

/// Sums one raw column.
#[derive(Debug, Clone)]
pub struct LongSumMaker {
    metrics: Arc<MetricDictionary>,
}

impl LongSumMaker {
    #[must_use]
    pub const fn new(metrics: Arc<MetricDictionary>) -> Self {
        Self { metrics }
    }
}

impl MetricMaker for LongSumMaker {
    fn kind(&self) -> &'static str {
        "LongSumMaker"
    }

    fn dependency_count(&self) -> usize {
        1
    }

    fn make(&self, metric: &str, dependencies: &[&str]) -> ParkResult<Arc<LogicalMetric>> {
        check_dependencies(self, metric, dependencies)?;
        let field = dependencies[0].to_owned();
        self.metrics.get_or_build(metric, || {
            Ok(Arc::new(LogicalMetric::new(metric, MetricFormula::LongSum { field })))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Averages an already published metric over `inner_grain` buckets.
#[derive(Debug, Clone)]
pub struct AggregationAverageMaker {
    metrics: Arc<MetricDictionary>,
    inner_grain: DefaultTimeGrain,
}

impl AggregationAverageMaker {
    #[must_use]
    pub const fn new(metrics: Arc<MetricDictionary>, inner_grain: DefaultTimeGrain) -> Self {
        Self { metrics, inner_grain }
    }

    #[must_use]
    pub const fn inner_grain(&self) -> DefaultTimeGrain {
        self.inner_grain
    }
}

impl MetricMaker for AggregationAverageMaker {
    fn kind(&self) -> &'static str {
        "AggregationAverageMaker"
    }

    fn dependency_count(&self) -> usize {
        1
    }

    fn make(&self, metric: &str, dependencies: &[&str]) -> ParkResult<Arc<LogicalMetric>> {
        check_dependencies(self, metric, dependencies)?;
        let inner = self.metrics.get(dependencies[0]).ok_or_else(|| {
            ParkError::validation(
                Namespace::Metrics,
                metric,
                "dependencies",
                format!("unknown metric '{}'", dependencies[0]),
            )
        })?;

        let grain = self.inner_grain;
        self.metrics.get_or_build(metric, || {
            Ok(Arc::new(LogicalMetric::new(metric, MetricFormula::AggregationAverage { inner, grain })))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
