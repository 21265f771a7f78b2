use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;

/// String key-value storage behind a dimension.
pub trait KeyValueStore: Any + fmt::Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    fn get(&self, key: &str) -> Option<String>;

    /// Returns the previous value.
    fn put(&self, key: &str, value: String) -> Option<String>;

    fn remove(&self, key: &str) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MapStore {
    rows: RwLock<FxHashMap<String, String>>,
}

impl MapStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MapStore {
    fn kind(&self) -> &'static str {
        "MapStore"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.rows.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: String) -> Option<String> {
        self.rows.write().insert(key.to_owned(), value)
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.rows.write().remove(key)
    }

    fn len(&self) -> usize {
        self.rows.read().len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_store_round_trips_values() {
        let store = MapStore::new();
        assert!(store.is_empty());
        assert_eq!(store.put("m", "male".to_owned()), None);
        assert_eq!(store.put("m", "Male".to_owned()).as_deref(), Some("male"));
        assert_eq!(store.get("m").as_deref(), Some("Male"));
        assert_eq!(store.remove("m").as_deref(), Some("Male"));
        assert_eq!(store.len(), 0);
    }
}
