#![allow(dead_code, unreachable_pub)]

use luthier_domain::Namespace;
use luthier_park::{ConfigEntry, IndustrialPark, JsonSource, ParkBuilder, ParkResult};
use luthier_park::entities::{Dimension, MapStore, ScanSearchProvider};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn search_providers() -> Value {
    json!({
        "noop": { "type": "NoOpSearchProvider", "queryWeightLimit": 100_000 },
        "lucene": {
            "type": "LuceneSearchProvider",
            "indexPath": "/var/lib/luthier/lucene",
            "maxResults": 500,
            "searchTimeout": 3_000
        },
        "scan": { "type": "ScanSearchProvider" }
    })
}

pub fn key_value_stores() -> Value {
    json!({
        "memory": { "type": "MapStore" },
        "custom": { "type": "SomethingHomegrown" }
    })
}

pub fn metric_makers() -> Value {
    json!({
        "longSum": { "type": "LongSumMaker" },
        "dailyAverage": { "type": "AggregationAverageMaker", "innerGrain": "day" }
    })
}

pub fn dimensions() -> Value {
    json!({
        "gender": {
            "type": "KeyValueStoreDimension",
            "keyValueStore": "memory",
            "searchProvider": "noop",
            "fields": ["id", "desc"],
            "description": "Reader gender",
            "category": "Demographics"
        },
        "country": {
            "type": "KeyValueStoreDimension",
            "keyValueStore": "memory",
            "searchProvider": "lucene",
            "fields": ["id", "name", "region"]
        }
    })
}

/// Built-in factories with every document above.
pub fn standard_builder() -> ParkBuilder {
    IndustrialPark::builder()
        .source(JsonSource::new(Namespace::SearchProviders, search_providers()))
        .source(JsonSource::new(Namespace::KeyValueStores, key_value_stores()))
        .source(JsonSource::new(Namespace::MetricMakers, metric_makers()))
        .source(JsonSource::new(Namespace::Dimensions, dimensions()))
}

pub fn standard_park() -> IndustrialPark {
    standard_builder().build()
}

/// A dimension factory that counts its builds and, when the entry has a `parent`, resolves it
/// first.
pub fn chained_dimension_factory(
    builds: Arc<AtomicUsize>,
) -> impl Fn(&str, &ConfigEntry, &IndustrialPark) -> ParkResult<Arc<Dimension>> + Send + Sync + 'static {
    move |name: &str, entry: &ConfigEntry, park: &IndustrialPark| {
        builds.fetch_add(1, Ordering::SeqCst);
        if let Some(parent) = entry.optional_str("parent")? {
            park.dimension(parent)?;
        }
        Ok(Arc::new(bare_dimension(name)))
    }
}

pub fn bare_dimension(name: &str) -> Dimension {
    Dimension::new(name, vec!["id".to_owned()], Arc::new(MapStore::new()), Arc::new(ScanSearchProvider))
}

pub fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
