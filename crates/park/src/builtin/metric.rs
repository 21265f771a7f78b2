use crate::entities::{AggregationAverageMaker, LongSumMaker, MetricMaker};
use crate::error::ParkResult;
use crate::factory::{Factory, FactoryMap};
use crate::park::IndustrialPark;
use crate::source::ConfigEntry;
use std::sync::Arc;

pub const LONG_SUM: &str = "LongSumMaker";
pub const AGGREGATION_AVERAGE: &str = "AggregationAverageMaker";

/// Makers publish into the park's metric dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongSumMakerFactory;

impl Factory<dyn MetricMaker> for LongSumMakerFactory {
    fn build(&self, _: &str, _: &ConfigEntry, park: &IndustrialPark) -> ParkResult<Arc<dyn MetricMaker>> {
        Ok(Arc::new(LongSumMaker::new(Arc::clone(park.metric_dictionary()))))
    }
}

/// `innerGrain` must name a zoneless time grain; `all` is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationAverageMakerFactory;

impl Factory<dyn MetricMaker> for AggregationAverageMakerFactory {
    fn build(&self, name: &str, entry: &ConfigEntry, park: &IndustrialPark) -> ParkResult<Arc<dyn MetricMaker>> {
        let raw = entry.required_str("innerGrain")?;
        let grain = park
            .granularity_parser()
            .parse_granularity(raw)
            .ok()
            .and_then(|granularity| granularity.zoneless())
            .ok_or_else(|| {
                entry.invalid("innerGrain", format!("'{raw}' is not a zoneless time grain for maker '{name}'"))
            })?;

        Ok(Arc::new(AggregationAverageMaker::new(Arc::clone(park.metric_dictionary()), grain)))
    }
}

#[must_use]
pub fn factories() -> FactoryMap<dyn MetricMaker> {
    let mut map = FactoryMap::<dyn MetricMaker>::default();
    map.insert(LONG_SUM.to_owned(), Arc::new(LongSumMakerFactory));
    map.insert(AGGREGATION_AVERAGE.to_owned(), Arc::new(AggregationAverageMakerFactory));
    map
}
