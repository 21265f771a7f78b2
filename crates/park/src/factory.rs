//! # Factories
//!
//! A [`Factory`] turns one [`ConfigEntry`] into an entity. It receives the park so it can resolve
//! the entities it depends on, in its own namespace or any other.
//!
//! Plain closures are factories too. Annotate the parameter types so the closure is generic over
//! their lifetimes:
//!
//! ```rust
//! use luthier_park::{ConfigEntry, IndustrialPark, ParkResult};
//! use luthier_park::entities::{NoOpSearchProvider, SearchProvider};
//! use std::sync::Arc;
//!
//! let park = IndustrialPark::builder()
//!     .search_provider_factory(
//!         "FixedSearchProvider",
//!         |_: &str, _: &ConfigEntry, _: &IndustrialPark| -> ParkResult<Arc<dyn SearchProvider>> {
//!             Ok(Arc::new(NoOpSearchProvider::new(10)))
//!         },
//!     )
//!     .build();
//! # drop(park);
//! ```

use crate::error::ParkResult;
use crate::park::IndustrialPark;
use crate::source::ConfigEntry;
use fxhash::FxHashMap;
use std::sync::Arc;

pub trait Factory<T: ?Sized>: Send + Sync {
    /// # Errors
    /// [`crate::ParkError::Validation`] for bad fields, or any error raised while resolving
    /// dependencies through `park`.
    fn build(&self, name: &str, entry: &ConfigEntry, park: &IndustrialPark) -> ParkResult<Arc<T>>;
}

impl<T, F> Factory<T> for F
where
    T: ?Sized,
    F: Fn(&str, &ConfigEntry, &IndustrialPark) -> ParkResult<Arc<T>> + Send + Sync,
{
    fn build(&self, name: &str, entry: &ConfigEntry, park: &IndustrialPark) -> ParkResult<Arc<T>> {
        self(name, entry, park)
    }
}

pub type SharedFactory<T> = Arc<dyn Factory<T>>;

/// Discriminator to factory.
pub type FactoryMap<T> = FxHashMap<String, SharedFactory<T>>;
