use crate::entities::{LuceneSearchProvider, NoOpSearchProvider, ScanSearchProvider, SearchProvider};
use crate::error::ParkResult;
use crate::factory::{Factory, FactoryMap};
use crate::park::IndustrialPark;
use crate::source::ConfigEntry;
use std::sync::Arc;
use std::time::Duration;

pub const NO_OP: &str = "NoOpSearchProvider";
pub const LUCENE: &str = "LuceneSearchProvider";
pub const SCAN: &str = "ScanSearchProvider";

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSearchProviderFactory;

impl Factory<dyn SearchProvider> for NoOpSearchProviderFactory {
    fn build(&self, _: &str, entry: &ConfigEntry, _: &IndustrialPark) -> ParkResult<Arc<dyn SearchProvider>> {
        let limit = entry.required_u32("queryWeightLimit")?;
        Ok(Arc::new(NoOpSearchProvider::new(limit)))
    }
}

/// `indexPath` (non-empty), `maxResults` (positive), `searchTimeout` in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuceneSearchProviderFactory;

impl Factory<dyn SearchProvider> for LuceneSearchProviderFactory {
    fn build(&self, _: &str, entry: &ConfigEntry, _: &IndustrialPark) -> ParkResult<Arc<dyn SearchProvider>> {
        let index_path = entry.required_str("indexPath")?;
        if index_path.trim().is_empty() {
            return Err(entry.invalid("indexPath", "must not be empty"));
        }
        let max_results = entry.required_u32("maxResults")?;
        if max_results == 0 {
            return Err(entry.invalid("maxResults", "must be positive"));
        }
        let timeout = Duration::from_millis(entry.required_u64("searchTimeout")?);

        Ok(Arc::new(LuceneSearchProvider::new(index_path, max_results, timeout)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanSearchProviderFactory;

impl Factory<dyn SearchProvider> for ScanSearchProviderFactory {
    fn build(&self, _: &str, _: &ConfigEntry, _: &IndustrialPark) -> ParkResult<Arc<dyn SearchProvider>> {
        Ok(Arc::new(ScanSearchProvider))
    }
}

#[must_use]
pub fn factories() -> FactoryMap<dyn SearchProvider> {
    let mut map = FactoryMap::<dyn SearchProvider>::default();
    map.insert(NO_OP.to_owned(), Arc::new(NoOpSearchProviderFactory));
    map.insert(LUCENE.to_owned(), Arc::new(LuceneSearchProviderFactory));
    map.insert(SCAN.to_owned(), Arc::new(ScanSearchProviderFactory));
    map
}
