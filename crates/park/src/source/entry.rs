use crate::error::{ParkError, ParkResult};
use luthier_domain::Namespace;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Field every entry uses to select its factory.
pub const TYPE_FIELD: &str = "type";

/// The configuration object of one named entity, detached from its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    namespace: Namespace,
    name: Arc<str>,
    fields: Map<String, Value>,
}

impl ConfigEntry {
    pub fn new(namespace: Namespace, name: impl Into<Arc<str>>, fields: Map<String, Value>) -> Self {
        Self { namespace, name: name.into(), fields }
    }

    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Raw access for custom factories. JSON `null` reads as absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// The `type` field.
    ///
    /// # Errors
    /// [`ParkError::Validation`] when it is missing or not a string.
    pub fn discriminator(&self) -> ParkResult<&str> {
        self.required_str(TYPE_FIELD)
    }

    /// # Errors
    /// [`ParkError::Validation`] when the field is missing or not a string.
    pub fn required_str(&self, field: &str) -> ParkResult<&str> {
        self.optional_str(field)?.ok_or_else(|| self.invalid(field, "is required"))
    }

    /// # Errors
    /// [`ParkError::Validation`] when the field is present but not a string.
    pub fn optional_str(&self, field: &str) -> ParkResult<Option<&str>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(self.invalid(field, expected("a string", other))),
        }
    }

    /// # Errors
    /// [`ParkError::Validation`] when the field is missing, negative, fractional, or not a number.
    pub fn required_u64(&self, field: &str) -> ParkResult<u64> {
        match self.get(field) {
            None => Err(self.invalid(field, "is required")),
            Some(value) => value
                .as_u64()
                .ok_or_else(|| self.invalid(field, expected("a non-negative integer", value))),
        }
    }

    /// # Errors
    /// As [`Self::required_u64`], plus a range check.
    pub fn required_u32(&self, field: &str) -> ParkResult<u32> {
        let value = self.required_u64(field)?;
        u32::try_from(value).map_err(|_| self.invalid(field, format!("{value} exceeds {}", u32::MAX)))
    }

    /// A required, non-empty array of strings.
    ///
    /// # Errors
    /// [`ParkError::Validation`] naming the offending position when an element is not a string.
    pub fn required_str_list(&self, field: &str) -> ParkResult<Vec<&str>> {
        let Some(value) = self.get(field) else {
            return Err(self.invalid(field, "is required"));
        };
        let Value::Array(items) = value else {
            return Err(self.invalid(field, expected("an array of strings", value)));
        };
        if items.is_empty() {
            return Err(self.invalid(field, "must not be empty"));
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .ok_or_else(|| self.invalid(field, expected(&format!("a string at [{index}]"), item)))
            })
            .collect()
    }

    /// A [`ParkError::Validation`] for this entry.
    #[must_use]
    pub fn invalid(&self, field: &str, message: impl Into<Cow<'static, str>>) -> ParkError {
        ParkError::validation(self.namespace, Arc::clone(&self.name), field.to_owned(), message)
    }
}

fn expected(what: &str, found: &Value) -> String {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    format!("expected {what}, found {found}")
}
