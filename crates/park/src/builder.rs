//! # Park Builder
//!
//! Collects sources, factories and shared dictionaries, then assembles an [`IndustrialPark`].
//! [`ParkBuilder::build`] copies everything it holds, so later changes to the builder never reach
//! a park that was already built.
//!
//! ```rust
//! use luthier_domain::Namespace;
//! use luthier_park::{IndustrialPark, JsonSource};
//! use serde_json::json;
//!
//! let park = IndustrialPark::builder()
//!     .source(JsonSource::new(
//!         Namespace::SearchProviders,
//!         json!({ "scan": { "type": "ScanSearchProvider" } }),
//!     ))
//!     .build();
//!
//! assert_eq!(park.search_provider("scan").unwrap().kind(), "ScanSearchProvider");
//! ```

use crate::builtin;
use crate::dictionary::{Dictionary, ResourceDictionaries};
use crate::dispatch::TypeDispatcher;
use crate::entities::{Dimension, KeyValueStore, MetricMaker, SearchProvider};
use crate::factory::{Factory, FactoryMap};
use crate::granularity::{GranularityParser, StandardGranularityParser};
use crate::park::{IndustrialPark, Plant};
use crate::source::{ConfigSource, FileSource, MissingSource};
use fxhash::FxHashMap;
use luthier_domain::{Namespace, ParkSettings};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ParkBuilder {
    resources: Option<ResourceDictionaries>,
    sources: FxHashMap<Namespace, Arc<dyn ConfigSource>>,
    dimensions: TypeDispatcher<Dimension>,
    search_providers: TypeDispatcher<dyn SearchProvider>,
    key_value_stores: TypeDispatcher<dyn KeyValueStore>,
    metric_makers: TypeDispatcher<dyn MetricMaker>,
    granularity_parser: Arc<dyn GranularityParser>,
}

impl ParkBuilder {
    /// Every built-in factory registered, no sources.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Self::empty();
        builder.dimensions.set_bindings(builtin::dimension::factories());
        builder.search_providers.set_bindings(builtin::search::factories());
        builder.key_value_stores.set_bindings(builtin::store::factories());
        builder.key_value_stores.set_fallback(Some(builtin::store::fallback()));
        for discriminator in builtin::store::UNSUPPORTED {
            builder.key_value_stores.mark_unsupported(*discriminator);
        }
        builder.metric_makers.set_bindings(builtin::metric::factories());
        builder
    }

    /// No factories, no fallbacks, no sources.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            resources: None,
            sources: FxHashMap::default(),
            dimensions: TypeDispatcher::new(Namespace::Dimensions),
            search_providers: TypeDispatcher::new(Namespace::SearchProviders),
            key_value_stores: TypeDispatcher::new(Namespace::KeyValueStores),
            metric_makers: TypeDispatcher::new(Namespace::MetricMakers),
            granularity_parser: Arc::new(StandardGranularityParser::new()),
        }
    }

    /// Shares existing dictionaries instead of creating fresh ones per build.
    #[must_use]
    pub fn dictionaries(mut self, resources: ResourceDictionaries) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Sets the document of the source's namespace, replacing any previous one.
    #[must_use]
    pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
        let namespace = source.namespace();
        if !namespace.is_configured() {
            warn!(%namespace, "Ignoring a source for a namespace without configuration documents");
            return self;
        }
        self.sources.insert(namespace, Arc::new(source));
        self
    }

    /// A [`FileSource`] for every configured namespace, at the paths the settings name.
    #[must_use]
    pub fn settings(mut self, settings: &ParkSettings) -> Self {
        for namespace in Namespace::CONFIGURED {
            if let Some(path) = settings.source_path(namespace) {
                debug!(%namespace, path = %path.display(), "Registering file source");
                self.sources.insert(namespace, Arc::new(FileSource::new(namespace, path)));
            }
        }
        self
    }

    #[must_use]
    pub fn granularity_parser(mut self, parser: impl GranularityParser + 'static) -> Self {
        self.granularity_parser = Arc::new(parser);
        self
    }

    /// Marks a discriminator as recognized but unimplemented in `namespace`.
    #[must_use]
    pub fn unsupported(mut self, namespace: Namespace, discriminator: &str) -> Self {
        match namespace {
            Namespace::Dimensions => self.dimensions.mark_unsupported(discriminator),
            Namespace::SearchProviders => self.search_providers.mark_unsupported(discriminator),
            Namespace::KeyValueStores => self.key_value_stores.mark_unsupported(discriminator),
            Namespace::MetricMakers => self.metric_makers.mark_unsupported(discriminator),
            Namespace::Metrics | Namespace::LogicalTables | Namespace::PhysicalTables => {
                warn!(%namespace, discriminator, "Namespace has no factories; ignoring");
            },
        }
        self
    }

    // --- Factories ---

    /// Replaces every dimension factory.
    #[must_use]
    pub fn dimension_factories(mut self, factories: FactoryMap<Dimension>) -> Self {
        self.dimensions.set_bindings(factories);
        self
    }

    #[must_use]
    pub fn dimension_factory(
        mut self,
        discriminator: &str,
        factory: impl Factory<Dimension> + 'static,
    ) -> Self {
        self.dimensions.bind(discriminator, Arc::new(factory));
        self
    }

    #[must_use]
    pub fn search_provider_factories(mut self, factories: FactoryMap<dyn SearchProvider>) -> Self {
        self.search_providers.set_bindings(factories);
        self
    }

    #[must_use]
    pub fn search_provider_factory(
        mut self,
        discriminator: &str,
        factory: impl Factory<dyn SearchProvider> + 'static,
    ) -> Self {
        self.search_providers.bind(discriminator, Arc::new(factory));
        self
    }

    #[must_use]
    pub fn key_value_store_factories(mut self, factories: FactoryMap<dyn KeyValueStore>) -> Self {
        self.key_value_stores.set_bindings(factories);
        self
    }

    #[must_use]
    pub fn key_value_store_factory(
        mut self,
        discriminator: &str,
        factory: impl Factory<dyn KeyValueStore> + 'static,
    ) -> Self {
        self.key_value_stores.bind(discriminator, Arc::new(factory));
        self
    }

    /// Factory for store types nobody registered. Built-in default: an in-memory store.
    #[must_use]
    pub fn key_value_store_fallback(
        mut self,
        factory: Option<Arc<dyn Factory<dyn KeyValueStore>>>,
    ) -> Self {
        self.key_value_stores.set_fallback(factory);
        self
    }

    #[must_use]
    pub fn metric_maker_factories(mut self, factories: FactoryMap<dyn MetricMaker>) -> Self {
        self.metric_makers.set_bindings(factories);
        self
    }

    #[must_use]
    pub fn metric_maker_factory(
        mut self,
        discriminator: &str,
        factory: impl Factory<dyn MetricMaker> + 'static,
    ) -> Self {
        self.metric_makers.bind(discriminator, Arc::new(factory));
        self
    }

    // --- Assembly ---

    /// Namespaces without a registered source fail every lookup with a source error.
    #[must_use]
    pub fn build(&self) -> IndustrialPark {
        let resources = self.resources.clone().unwrap_or_default();
        let source = |namespace: Namespace| -> Arc<dyn ConfigSource> {
            self.sources
                .get(&namespace)
                .cloned()
                .unwrap_or_else(|| Arc::new(MissingSource::new(namespace)))
        };

        debug!(
            dimensions = ?self.dimensions,
            search_providers = ?self.search_providers,
            key_value_stores = ?self.key_value_stores,
            metric_makers = ?self.metric_makers,
            "Building park"
        );

        IndustrialPark::from_parts(
            resources.clone(),
            Plant::new(
                source(Namespace::Dimensions),
                self.dimensions.clone(),
                Arc::clone(resources.dimensions()),
            ),
            Plant::new(
                source(Namespace::SearchProviders),
                self.search_providers.clone(),
                Arc::new(Dictionary::new(Namespace::SearchProviders)),
            ),
            Plant::new(
                source(Namespace::KeyValueStores),
                self.key_value_stores.clone(),
                Arc::new(Dictionary::new(Namespace::KeyValueStores)),
            ),
            Plant::new(
                source(Namespace::MetricMakers),
                self.metric_makers.clone(),
                Arc::new(Dictionary::new(Namespace::MetricMakers)),
            ),
            Arc::clone(&self.granularity_parser),
        )
    }
}

impl Default for ParkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
