use crate::entities::{KeyValueStore, SearchProvider};
use std::sync::Arc;

/// A queryable attribute, wired to the store holding its rows and the provider searching them.
#[derive(Debug, Clone)]
pub struct Dimension {
    api_name: Arc<str>,
    description: String,
    long_name: String,
    category: String,
    fields: Vec<String>,
    key_value_store: Arc<dyn KeyValueStore>,
    search_provider: Arc<dyn SearchProvider>,
}

impl Dimension {
    /// `fields` must be non-empty; the first one is the key field.
    pub fn new(
        api_name: impl Into<Arc<str>>,
        fields: Vec<String>,
        key_value_store: Arc<dyn KeyValueStore>,
        search_provider: Arc<dyn SearchProvider>,
    ) -> Self {
        let api_name = api_name.into();
        Self {
            description: api_name.to_string(),
            long_name: api_name.to_string(),
            category: String::from("General"),
            api_name,
            fields,
            key_value_store,
            search_provider,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn key_field(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    #[must_use]
    pub fn key_value_store(&self) -> &Arc<dyn KeyValueStore> {
        &self.key_value_store
    }

    #[must_use]
    pub fn search_provider(&self) -> &Arc<dyn SearchProvider> {
        &self.search_provider
    }

    /// Row value stored under `key`.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<String> {
        self.key_value_store.get(key)
    }
}
