use crate::namespace::Namespace;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the park finds its configuration documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParkSettingsInner {
    /// Base directory for relative document paths.
    pub config_dir: PathBuf,
    pub sources: SourceFiles,
    /// Resolve every configured entity at startup instead of on first use.
    pub eager_load: bool,
}

/// Thin Arc-wrapped settings for inexpensive cloning.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ParkSettings {
    #[serde(flatten, default)]
    inner: Arc<ParkSettingsInner>,
}

impl Deref for ParkSettings {
    type Target = ParkSettingsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ParkSettings {
    fn deref_mut(&mut self) -> &mut ParkSettingsInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl ParkSettings {
    /// Full path of a namespace's document. `None` for dictionary-only namespaces.
    #[must_use]
    pub fn source_path(&self, namespace: Namespace) -> Option<PathBuf> {
        let file = match namespace {
            Namespace::Dimensions => &self.sources.dimensions,
            Namespace::SearchProviders => &self.sources.search_providers,
            Namespace::KeyValueStores => &self.sources.key_value_stores,
            Namespace::MetricMakers => &self.sources.metric_makers,
            Namespace::Metrics | Namespace::LogicalTables | Namespace::PhysicalTables => {
                return None;
            },
        };
        Some(self.config_dir.join(file))
    }
}

/// Document file per configured namespace, relative to `config_dir` unless absolute.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub dimensions: PathBuf,
    pub search_providers: PathBuf,
    pub key_value_stores: PathBuf,
    pub metric_makers: PathBuf,
}

// --- Default ---

impl Default for ParkSettingsInner {
    fn default() -> Self {
        Self { config_dir: PathBuf::from("config"), sources: SourceFiles::default(), eager_load: true }
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            dimensions: PathBuf::from("DimensionConfig.json"),
            search_providers: PathBuf::from("SearchProviderConfig.json"),
            key_value_stores: PathBuf::from("KeyValueStoreConfig.json"),
            metric_makers: PathBuf::from("MetricMakerConfig.json"),
        }
    }
}
