use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entity kind, with its own configuration document and dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    Dimensions,
    SearchProviders,
    KeyValueStores,
    MetricMakers,
    Metrics,
    LogicalTables,
    PhysicalTables,
}

impl Namespace {
    pub const ALL: [Self; 7] = [
        Self::Dimensions,
        Self::SearchProviders,
        Self::KeyValueStores,
        Self::MetricMakers,
        Self::Metrics,
        Self::LogicalTables,
        Self::PhysicalTables,
    ];

    /// Namespaces built from a configuration document, in eager-load order:
    /// leaves (providers, stores, makers) before the dimensions that reference them.
    pub const CONFIGURED: [Self; 4] =
        [Self::SearchProviders, Self::KeyValueStores, Self::MetricMakers, Self::Dimensions];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dimensions => "dimensions",
            Self::SearchProviders => "searchProviders",
            Self::KeyValueStores => "keyValueStores",
            Self::MetricMakers => "metricMakers",
            Self::Metrics => "metrics",
            Self::LogicalTables => "logicalTables",
            Self::PhysicalTables => "physicalTables",
        }
    }

    /// Whether entities of this kind come from a configuration document.
    /// The others are only ever published into their dictionary by code.
    #[must_use]
    pub const fn is_configured(self) -> bool {
        matches!(
            self,
            Self::Dimensions | Self::SearchProviders | Self::KeyValueStores | Self::MetricMakers
        )
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `searchProviders`, `search_providers` and `search-providers` alike.
impl FromStr for Namespace {
    type Err = ParseNamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String =
            s.chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect();

        Self::ALL
            .into_iter()
            .find(|ns| ns.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| ParseNamespaceError { input: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNamespaceError {
    pub input: String,
}

impl fmt::Display for ParseNamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown namespace '{}'", self.input)
    }
}

impl std::error::Error for ParseNamespaceError {}

bitflags! {
    /// A selection of configured namespaces, e.g. the ones to load eagerly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NamespaceSet: u8 {
        const SEARCH_PROVIDERS = 1 << 0;
        const KEY_VALUE_STORES = 1 << 1;
        const METRIC_MAKERS = 1 << 2;
        const DIMENSIONS = 1 << 3;

        const CONFIGURED = Self::SEARCH_PROVIDERS.bits()
            | Self::KEY_VALUE_STORES.bits()
            | Self::METRIC_MAKERS.bits()
            | Self::DIMENSIONS.bits();
    }
}

impl NamespaceSet {
    /// The selected namespaces in eager-load order.
    pub fn namespaces(self) -> impl Iterator<Item = Namespace> {
        Namespace::CONFIGURED.into_iter().filter(move |ns| self.contains(Self::from(*ns)))
    }
}

/// Dictionary-only namespaces map to the empty set.
impl From<Namespace> for NamespaceSet {
    fn from(ns: Namespace) -> Self {
        match ns {
            Namespace::SearchProviders => Self::SEARCH_PROVIDERS,
            Namespace::KeyValueStores => Self::KEY_VALUE_STORES,
            Namespace::MetricMakers => Self::METRIC_MAKERS,
            Namespace::Dimensions => Self::DIMENSIONS,
            Namespace::Metrics | Namespace::LogicalTables | Namespace::PhysicalTables => {
                Self::empty()
            },
        }
    }
}

impl FromIterator<Namespace> for NamespaceSet {
    fn from_iter<I: IntoIterator<Item = Namespace>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, ns| set | Self::from(ns))
    }
}
