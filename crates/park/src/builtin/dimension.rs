use crate::entities::Dimension;
use crate::error::ParkResult;
use crate::factory::{Factory, FactoryMap};
use crate::park::IndustrialPark;
use crate::source::ConfigEntry;
use std::sync::Arc;
use tracing::trace;

pub const KEY_VALUE_STORE_DIMENSION: &str = "KeyValueStoreDimension";

/// Resolves `keyValueStore` and `searchProvider` by name through the park, then reads `fields`
/// and the optional `description`, `longName` and `category`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueStoreDimensionFactory;

impl Factory<Dimension> for KeyValueStoreDimensionFactory {
    fn build(&self, name: &str, entry: &ConfigEntry, park: &IndustrialPark) -> ParkResult<Arc<Dimension>> {
        let store_name = entry.required_str("keyValueStore")?;
        let provider_name = entry.required_str("searchProvider")?;
        let fields = entry.required_str_list("fields")?.into_iter().map(str::to_owned).collect();

        trace!(dimension = name, store = store_name, provider = provider_name, "Resolving dimension dependencies");
        let store = park.key_value_store(store_name)?;
        let provider = park.search_provider(provider_name)?;

        let mut dimension = Dimension::new(name, fields, store, provider);
        if let Some(description) = entry.optional_str("description")? {
            dimension = dimension.with_description(description);
        }
        if let Some(long_name) = entry.optional_str("longName")? {
            dimension = dimension.with_long_name(long_name);
        }
        if let Some(category) = entry.optional_str("category")? {
            dimension = dimension.with_category(category);
        }
        Ok(Arc::new(dimension))
    }
}

#[must_use]
pub fn factories() -> FactoryMap<Dimension> {
    let mut map = FactoryMap::<Dimension>::default();
    map.insert(KEY_VALUE_STORE_DIMENSION.to_owned(), Arc::new(KeyValueStoreDimensionFactory));
    map
}
