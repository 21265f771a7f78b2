//! Factories registered by [`crate::IndustrialPark::builder`].
//!
//! | Namespace        | Discriminators                                             |
//! |------------------|------------------------------------------------------------|
//! | `searchProviders`| `NoOpSearchProvider`, `LuceneSearchProvider`, `ScanSearchProvider` |
//! | `keyValueStores` | `MapStore` (also the fallback); `RedisStore` is unsupported |
//! | `metricMakers`   | `LongSumMaker`, `AggregationAverageMaker`                  |
//! | `dimensions`     | `KeyValueStoreDimension`                                   |

pub mod dimension;
pub mod metric;
pub mod search;
pub mod store;
