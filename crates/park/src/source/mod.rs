//! # Configuration Sources
//!
//! A [`ConfigSource`] supplies the current document of one namespace. The park calls
//! [`ConfigSource::fetch`] at resolution time, so a source may re-read its backing store.

mod entry;
mod tree;

pub use entry::{ConfigEntry, TYPE_FIELD};
pub use tree::ConfigTree;

use crate::error::{ParkError, ParkErrorExt, ParkResult};
use luthier_domain::Namespace;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait ConfigSource: fmt::Debug + Send + Sync {
    fn namespace(&self) -> Namespace;

    /// # Errors
    /// [`ParkError::ConfigSource`] when the document is unavailable or malformed.
    fn fetch(&self) -> ParkResult<ConfigTree>;
}

/// Reads a JSON document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    namespace: Namespace,
    path: PathBuf,
}

impl FileSource {
    pub fn new(namespace: Namespace, path: impl Into<PathBuf>) -> Self {
        Self { namespace, path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    fn fetch(&self) -> ParkResult<ConfigTree> {
        debug!(namespace = %self.namespace, path = %self.path.display(), "Reading configuration document");

        let text = std::fs::read_to_string(&self.path).map_err(|err| ParkError::ConfigSource {
            namespace: self.namespace,
            message: err.to_string().into(),
            context: None,
        });

        ConfigTree::parse(self.namespace, &text.context(self.path.display().to_string())?)
            .context(self.path.display().to_string())
    }
}

/// An in-memory document, handy for embedding and tests.
#[derive(Debug, Clone)]
pub struct JsonSource {
    namespace: Namespace,
    document: Value,
}

impl JsonSource {
    #[must_use]
    pub const fn new(namespace: Namespace, document: Value) -> Self {
        Self { namespace, document }
    }
}

impl ConfigSource for JsonSource {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    fn fetch(&self) -> ParkResult<ConfigTree> {
        ConfigTree::from_value(self.namespace, self.document.clone())
    }
}

/// Stands in for a namespace nobody configured. Every fetch fails.
#[derive(Debug, Clone, Copy)]
pub struct MissingSource {
    namespace: Namespace,
}

impl MissingSource {
    #[must_use]
    pub const fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }
}

impl ConfigSource for MissingSource {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    fn fetch(&self) -> ParkResult<ConfigTree> {
        Err(ParkError::ConfigSource {
            namespace: self.namespace,
            message: "no configuration source registered".into(),
            context: None,
        })
    }
}
