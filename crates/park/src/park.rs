//! # Industrial Park
//!
//! The registry facade. Each configured namespace is served by a plant: a configuration source,
//! a type dispatcher and a dictionary. Requesting an entity consults the dictionary, and on a miss
//! fetches the namespace document, picks the factory by the entry's `type`, and builds. Factories
//! resolve their own dependencies through the same park, so whole graphs materialize on demand.

use crate::builder::ParkBuilder;
use crate::dictionary::{
    Chain, Dictionary, DimensionDictionary, LogicalTableDictionary, MetricDictionary, PhysicalTableDictionary,
    ResourceDictionaries,
};
use crate::dispatch::TypeDispatcher;
use crate::entities::{
    Dimension, KeyValueStore, LogicalMetric, LogicalTable, MetricMaker, PhysicalTable, SearchProvider,
};
use crate::error::{ParkError, ParkResult};
use crate::granularity::GranularityParser;
use crate::source::ConfigSource;
use luthier_domain::{Namespace, NamespaceSet};
use std::sync::Arc;
use tracing::{debug, debug_span, info, warn};

#[derive(Debug)]
pub(crate) struct Plant<T: ?Sized> {
    source: Arc<dyn ConfigSource>,
    dispatcher: TypeDispatcher<T>,
    dictionary: Arc<Dictionary<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Plant<T> {
    pub(crate) const fn new(
        source: Arc<dyn ConfigSource>,
        dispatcher: TypeDispatcher<T>,
        dictionary: Arc<Dictionary<T>>,
    ) -> Self {
        Self { source, dispatcher, dictionary }
    }

    fn resolve(&self, name: &str, park: &IndustrialPark) -> ParkResult<Arc<T>> {
        let _span = debug_span!("resolve", namespace = %self.dictionary.namespace(), name).entered();

        self.dictionary.get_or_build_within(&park.chain(), name, |nested| {
            let entry = self.source.fetch()?.entry(name)?;
            let factory = self.dispatcher.resolve(entry.discriminator()?)?;
            factory.build(name, &entry, &park.within(nested))
        })
    }

    fn configured_names(&self) -> ParkResult<Vec<Arc<str>>> {
        Ok(self.source.fetch()?.names().map(Arc::from).collect())
    }

    fn load(&self, park: &IndustrialPark) -> ParkResult<Vec<Arc<str>>> {
        let namespace = self.dictionary.namespace();
        let names = self.configured_names()?;
        info!(%namespace, count = names.len(), "Loading namespace");

        for name in &names {
            if let Err(err) = self.resolve(name, park) {
                warn!(%namespace, name = %name, error = %err, "Loading stopped at the first failure");
                return Err(err);
            }
        }
        Ok(names)
    }
}

/// Any entity the park can hand out.
#[derive(Debug, Clone)]
pub enum Entity {
    Dimension(Arc<Dimension>),
    SearchProvider(Arc<dyn SearchProvider>),
    KeyValueStore(Arc<dyn KeyValueStore>),
    MetricMaker(Arc<dyn MetricMaker>),
    Metric(Arc<LogicalMetric>),
    LogicalTable(Arc<LogicalTable>),
    PhysicalTable(Arc<PhysicalTable>),
}

impl Entity {
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        match self {
            Self::Dimension(_) => Namespace::Dimensions,
            Self::SearchProvider(_) => Namespace::SearchProviders,
            Self::KeyValueStore(_) => Namespace::KeyValueStores,
            Self::MetricMaker(_) => Namespace::MetricMakers,
            Self::Metric(_) => Namespace::Metrics,
            Self::LogicalTable(_) => Namespace::LogicalTables,
            Self::PhysicalTable(_) => Namespace::PhysicalTables,
        }
    }
}

/// The registry handle.
///
/// Factories receive a handle that remembers which builds they run for, so their requests are
/// checked for cycles even when made from helper threads.
#[derive(Debug)]
pub struct IndustrialPark {
    core: Arc<ParkCore>,
    chain: Option<Chain>,
}

#[derive(Debug)]
struct ParkCore {
    resources: ResourceDictionaries,
    dimensions: Plant<Dimension>,
    search_providers: Plant<dyn SearchProvider>,
    key_value_stores: Plant<dyn KeyValueStore>,
    metric_makers: Plant<dyn MetricMaker>,
    granularity_parser: Arc<dyn GranularityParser>,
}

impl IndustrialPark {
    /// A builder seeded with every built-in factory.
    #[must_use]
    pub fn builder() -> ParkBuilder {
        ParkBuilder::new()
    }

    pub(crate) fn from_parts(
        resources: ResourceDictionaries,
        dimensions: Plant<Dimension>,
        search_providers: Plant<dyn SearchProvider>,
        key_value_stores: Plant<dyn KeyValueStore>,
        metric_makers: Plant<dyn MetricMaker>,
        granularity_parser: Arc<dyn GranularityParser>,
    ) -> Self {
        let core = ParkCore {
            resources,
            dimensions,
            search_providers,
            key_value_stores,
            metric_makers,
            granularity_parser,
        };
        Self { core: Arc::new(core), chain: None }
    }

    /// The same park, handed to a factory whose nested requests run in `chain`.
    fn within(&self, chain: Chain) -> Self {
        Self { core: Arc::clone(&self.core), chain: Some(chain) }
    }

    fn chain(&self) -> Chain {
        self.chain.clone().unwrap_or_else(Chain::current)
    }

    // --- Typed Resolution ---

    /// # Errors
    /// Any [`ParkError`] raised while building the dimension or its dependencies.
    pub fn dimension(&self, name: &str) -> ParkResult<Arc<Dimension>> {
        self.core.dimensions.resolve(name, self)
    }

    /// # Errors
    /// See [`Self::dimension`].
    pub fn search_provider(&self, name: &str) -> ParkResult<Arc<dyn SearchProvider>> {
        self.core.search_providers.resolve(name, self)
    }

    /// # Errors
    /// See [`Self::dimension`].
    pub fn key_value_store(&self, name: &str) -> ParkResult<Arc<dyn KeyValueStore>> {
        self.core.key_value_stores.resolve(name, self)
    }

    /// # Errors
    /// See [`Self::dimension`].
    pub fn metric_maker(&self, name: &str) -> ParkResult<Arc<dyn MetricMaker>> {
        self.core.metric_makers.resolve(name, self)
    }

    /// Metrics are only published by makers; nothing is built here.
    ///
    /// # Errors
    /// [`ParkError::ConfigNotFound`] when nothing is published under `name`.
    pub fn metric(&self, name: &str) -> ParkResult<Arc<LogicalMetric>> {
        published(self.core.resources.metrics(), name)
    }

    /// # Errors
    /// [`ParkError::ConfigNotFound`] when nothing is published under `name`.
    pub fn logical_table(&self, name: &str) -> ParkResult<Arc<LogicalTable>> {
        published(self.core.resources.logical_tables(), name)
    }

    /// # Errors
    /// [`ParkError::ConfigNotFound`] when nothing is published under `name`.
    pub fn physical_table(&self, name: &str) -> ParkResult<Arc<PhysicalTable>> {
        published(self.core.resources.physical_tables(), name)
    }

    /// Resolves `name` in any namespace.
    ///
    /// # Errors
    /// As the typed accessor of `namespace`.
    pub fn get(&self, namespace: Namespace, name: &str) -> ParkResult<Entity> {
        Ok(match namespace {
            Namespace::Dimensions => Entity::Dimension(self.dimension(name)?),
            Namespace::SearchProviders => Entity::SearchProvider(self.search_provider(name)?),
            Namespace::KeyValueStores => Entity::KeyValueStore(self.key_value_store(name)?),
            Namespace::MetricMakers => Entity::MetricMaker(self.metric_maker(name)?),
            Namespace::Metrics => Entity::Metric(self.metric(name)?),
            Namespace::LogicalTables => Entity::LogicalTable(self.logical_table(name)?),
            Namespace::PhysicalTables => Entity::PhysicalTable(self.physical_table(name)?),
        })
    }

    // --- Eager Loading ---

    /// Builds every entry of the namespace document, in document order, and returns their names.
    ///
    /// Stops at the first failure; entities built before it stay published. Dictionary-only
    /// namespaces have no document and load nothing.
    ///
    /// # Errors
    /// The first failure, unchanged.
    pub fn load(&self, namespace: Namespace) -> ParkResult<Vec<Arc<str>>> {
        match namespace {
            Namespace::Dimensions => self.core.dimensions.load(self),
            Namespace::SearchProviders => self.core.search_providers.load(self),
            Namespace::KeyValueStores => self.core.key_value_stores.load(self),
            Namespace::MetricMakers => self.core.metric_makers.load(self),
            Namespace::Metrics | Namespace::LogicalTables | Namespace::PhysicalTables => {
                debug!(%namespace, "No configuration document; nothing to load");
                Ok(Vec::new())
            },
        }
    }

    /// Loads the selected namespaces, leaves first. Returns how many entities were loaded.
    ///
    /// # Errors
    /// The first failure, unchanged.
    pub fn load_selected(&self, selection: NamespaceSet) -> ParkResult<usize> {
        let mut loaded = 0;
        for namespace in selection.namespaces() {
            loaded += self.load(namespace)?.len();
        }
        info!(loaded, "Park loaded");
        Ok(loaded)
    }

    /// # Errors
    /// The first failure, unchanged.
    pub fn load_all(&self) -> ParkResult<usize> {
        self.load_selected(NamespaceSet::CONFIGURED)
    }

    /// Names in the namespace document, in document order. For dictionary-only namespaces, the
    /// published names.
    ///
    /// # Errors
    /// [`ParkError::ConfigSource`] when the document cannot be fetched.
    pub fn configured_names(&self, namespace: Namespace) -> ParkResult<Vec<Arc<str>>> {
        match namespace {
            Namespace::Dimensions => self.core.dimensions.configured_names(),
            Namespace::SearchProviders => self.core.search_providers.configured_names(),
            Namespace::KeyValueStores => self.core.key_value_stores.configured_names(),
            Namespace::MetricMakers => self.core.metric_makers.configured_names(),
            Namespace::Metrics => Ok(self.core.resources.metrics().names()),
            Namespace::LogicalTables => Ok(self.core.resources.logical_tables().names()),
            Namespace::PhysicalTables => Ok(self.core.resources.physical_tables().names()),
        }
    }

    // --- Dictionaries ---

    #[must_use]
    pub fn dictionaries(&self) -> &ResourceDictionaries {
        &self.core.resources
    }

    #[must_use]
    pub fn dimension_dictionary(&self) -> &Arc<DimensionDictionary> {
        self.core.resources.dimensions()
    }

    #[must_use]
    pub fn metric_dictionary(&self) -> &Arc<MetricDictionary> {
        self.core.resources.metrics()
    }

    #[must_use]
    pub fn logical_table_dictionary(&self) -> &Arc<LogicalTableDictionary> {
        self.core.resources.logical_tables()
    }

    #[must_use]
    pub fn physical_table_dictionary(&self) -> &Arc<PhysicalTableDictionary> {
        self.core.resources.physical_tables()
    }

    #[must_use]
    pub fn search_provider_dictionary(&self) -> &Arc<Dictionary<dyn SearchProvider>> {
        &self.core.search_providers.dictionary
    }

    #[must_use]
    pub fn key_value_store_dictionary(&self) -> &Arc<Dictionary<dyn KeyValueStore>> {
        &self.core.key_value_stores.dictionary
    }

    #[must_use]
    pub fn metric_maker_dictionary(&self) -> &Arc<Dictionary<dyn MetricMaker>> {
        &self.core.metric_makers.dictionary
    }

    /// Published names of any namespace, sorted.
    #[must_use]
    pub fn published_names(&self, namespace: Namespace) -> Vec<Arc<str>> {
        match namespace {
            Namespace::Dimensions => self.core.resources.dimensions().names(),
            Namespace::SearchProviders => self.core.search_providers.dictionary.names(),
            Namespace::KeyValueStores => self.core.key_value_stores.dictionary.names(),
            Namespace::MetricMakers => self.core.metric_makers.dictionary.names(),
            Namespace::Metrics => self.core.resources.metrics().names(),
            Namespace::LogicalTables => self.core.resources.logical_tables().names(),
            Namespace::PhysicalTables => self.core.resources.physical_tables().names(),
        }
    }

    #[must_use]
    pub fn granularity_parser(&self) -> &dyn GranularityParser {
        self.core.granularity_parser.as_ref()
    }
}

fn published<T: ?Sized + Send + Sync>(dictionary: &Dictionary<T>, name: &str) -> ParkResult<Arc<T>> {
    dictionary.get(name).ok_or_else(|| ParkError::not_found(dictionary.namespace(), name))
}
