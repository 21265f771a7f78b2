//! # Luthier Park
//!
//! A lazy, memoizing registry of named entities built from JSON configuration documents.
//!
//! Each namespace (dimensions, search providers, key-value stores, metric makers) has one
//! document mapping entity names to entries. An entry's `type` field selects a [`Factory`], which
//! builds the entity and may request other entities from the same [`IndustrialPark`]. Built
//! entities are published into a [`Dictionary`] and shared from then on.
//!
//! ```rust
//! use luthier_domain::Namespace;
//! use luthier_park::{IndustrialPark, JsonSource};
//! use serde_json::json;
//!
//! let park = IndustrialPark::builder()
//!     .source(JsonSource::new(
//!         Namespace::SearchProviders,
//!         json!({ "noop": { "type": "NoOpSearchProvider", "queryWeightLimit": 100 } }),
//!     ))
//!     .source(JsonSource::new(Namespace::KeyValueStores, json!({ "store": { "type": "MapStore" } })))
//!     .source(JsonSource::new(
//!         Namespace::Dimensions,
//!         json!({
//!             "gender": {
//!                 "type": "KeyValueStoreDimension",
//!                 "keyValueStore": "store",
//!                 "searchProvider": "noop",
//!                 "fields": ["id", "desc"]
//!             }
//!         }),
//!     ))
//!     .build();
//!
//! let gender = park.dimension("gender").unwrap();
//! assert_eq!(gender.key_field(), Some("id"));
//! assert!(park.search_provider_dictionary().contains("noop"));
//! ```

pub mod builder;
pub mod builtin;
pub mod dictionary;
pub mod dispatch;
pub mod entities;
pub mod error;
pub mod factory;
pub mod granularity;
pub mod park;
pub mod source;

pub use builder::ParkBuilder;
pub use dictionary::{
    Dictionary, DimensionDictionary, LogicalTableDictionary, MetricDictionary, PhysicalTableDictionary,
    ResourceDictionaries,
};
pub use dispatch::TypeDispatcher;
pub use error::{ParkError, ParkErrorExt, ParkErrorKind, ParkResult};
pub use factory::{Factory, FactoryMap, SharedFactory};
pub use granularity::{GranularityError, GranularityParser, StandardGranularityParser};
pub use park::{Entity, IndustrialPark};
pub use source::{ConfigEntry, ConfigSource, ConfigTree, FileSource, JsonSource, MissingSource};
