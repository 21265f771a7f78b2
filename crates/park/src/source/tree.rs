use crate::error::{ParkError, ParkResult};
use crate::source::entry::ConfigEntry;
use luthier_domain::Namespace;
use serde_json::{Map, Value};

/// One parsed namespace document: a JSON object mapping entity names to entries.
///
/// Names iterate in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTree {
    namespace: Namespace,
    entries: Map<String, Value>,
}

impl ConfigTree {
    /// # Errors
    /// [`ParkError::ConfigSource`] when the document is not a JSON object.
    pub fn from_value(namespace: Namespace, document: Value) -> ParkResult<Self> {
        match document {
            Value::Object(entries) => Ok(Self { namespace, entries }),
            other => Err(ParkError::ConfigSource {
                namespace,
                message: format!("document must be a JSON object, found {}", kind_of(&other)).into(),
                context: None,
            }),
        }
    }

    /// # Errors
    /// [`ParkError::ConfigSource`] on malformed JSON or a non-object document.
    pub fn parse(namespace: Namespace, text: &str) -> ParkResult<Self> {
        let document = serde_json::from_str(text).map_err(|err| ParkError::ConfigSource {
            namespace,
            message: err.to_string().into(),
            context: None,
        })?;
        Self::from_value(namespace, document)
    }

    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up and detaches the entry for `name`.
    ///
    /// # Errors
    /// [`ParkError::ConfigNotFound`] when absent, [`ParkError::Validation`] on field `type` when
    /// the entry is not an object.
    pub fn entry(&self, name: &str) -> ParkResult<ConfigEntry> {
        match self.entries.get(name) {
            None => Err(ParkError::not_found(self.namespace, name)),
            Some(Value::Object(fields)) => Ok(ConfigEntry::new(self.namespace, name, fields.clone())),
            Some(other) => Err(ParkError::validation(
                self.namespace,
                name,
                "type",
                format!("entry must be a JSON object, found {}", kind_of(other)),
            )),
        }
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParkErrorKind;
    use serde_json::json;

    #[test]
    fn names_follow_document_order() {
        let tree = ConfigTree::parse(
            Namespace::Dimensions,
            r#"{ "zeta": {"type": "a"}, "alpha": {"type": "b"}, "mid": {"type": "c"} }"#,
        )
        .unwrap();

        assert_eq!(tree.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn non_object_document_is_a_source_error() {
        let err = ConfigTree::from_value(Namespace::Dimensions, json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), ParkErrorKind::ConfigSource);
        assert!(err.to_string().contains("an array"), "{err}");
    }

    #[test]
    fn malformed_json_is_a_source_error() {
        let err = ConfigTree::parse(Namespace::MetricMakers, "{ not json").unwrap_err();
        assert_eq!(err.kind(), ParkErrorKind::ConfigSource);
        assert_eq!(err.namespace(), Some(Namespace::MetricMakers));
    }

    #[test]
    fn entry_lookup_distinguishes_absent_and_malformed() {
        let tree =
            ConfigTree::from_value(Namespace::KeyValueStores, json!({ "bad": 3, "good": {"type": "MapStore"} }))
                .unwrap();

        assert_eq!(tree.entry("missing").unwrap_err().kind(), ParkErrorKind::ConfigNotFound);
        assert_eq!(tree.entry("bad").unwrap_err().kind(), ParkErrorKind::Validation);
        assert_eq!(tree.entry("good").unwrap().discriminator().unwrap(), "MapStore");
    }
}
