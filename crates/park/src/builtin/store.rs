use crate::entities::{KeyValueStore, MapStore};
use crate::error::ParkResult;
use crate::factory::{Factory, FactoryMap, SharedFactory};
use crate::park::IndustrialPark;
use crate::source::ConfigEntry;
use std::sync::Arc;

pub const MAP_STORE: &str = "MapStore";
pub const REDIS_STORE: &str = "RedisStore";

/// Recognized store types without an implementation.
pub const UNSUPPORTED: &[&str] = &[REDIS_STORE];

#[derive(Debug, Clone, Copy, Default)]
pub struct MapStoreFactory;

impl Factory<dyn KeyValueStore> for MapStoreFactory {
    fn build(&self, _: &str, _: &ConfigEntry, _: &IndustrialPark) -> ParkResult<Arc<dyn KeyValueStore>> {
        Ok(Arc::new(MapStore::new()))
    }
}

#[must_use]
pub fn factories() -> FactoryMap<dyn KeyValueStore> {
    let mut map = FactoryMap::<dyn KeyValueStore>::default();
    map.insert(MAP_STORE.to_owned(), Arc::new(MapStoreFactory));
    map
}

/// Unrecognized store types get an in-memory store.
#[must_use]
pub fn fallback() -> SharedFactory<dyn KeyValueStore> {
    Arc::new(MapStoreFactory)
}
