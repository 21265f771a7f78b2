//! # Dictionaries
//!
//! A [`Dictionary`] is the append-only, shareable name-to-entity map behind every namespace.
//! [`Dictionary::get_or_build`] memoizes construction: an entity is built at most once per
//! dictionary, failed builds publish nothing, and concurrent callers of the same name wait for the
//! single in-flight build.

mod claim;
mod resources;

pub use resources::{
    DimensionDictionary, LogicalTableDictionary, MetricDictionary, PhysicalTableDictionary,
    ResourceDictionaries,
};

use crate::error::{ParkError, ParkResult};
pub(crate) use claim::Chain;
use claim::{Claim, ClaimKey, Cycle};
use fxhash::FxHashMap;
use luthier_domain::Namespace;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub struct Dictionary<T: ?Sized> {
    id: u64,
    namespace: Namespace,
    entries: RwLock<FxHashMap<Arc<str>, Arc<T>>>,
}

impl<T: ?Sized + Send + Sync> Dictionary<T> {
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self { id: claim::next_dictionary_id(), namespace, entries: RwLock::default() }
    }

    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.entries.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Published names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Publishes a ready-made entity.
    ///
    /// # Errors
    /// [`ParkError::Duplicate`] when the name is taken; the existing entity stays.
    pub fn insert(&self, name: impl Into<Arc<str>>, entity: Arc<T>) -> ParkResult<Arc<T>> {
        let name = name.into();
        let mut entries = self.entries.write();
        if entries.contains_key(&name) {
            return Err(ParkError::Duplicate { namespace: self.namespace, name, context: None });
        }
        entries.insert(name, Arc::clone(&entity));
        Ok(entity)
    }

    /// Returns the entity published under `name`, running `build` first if there is none.
    ///
    /// `build` runs at most once at a time per name and may itself resolve other names, including
    /// in other dictionaries. On failure nothing is published and the next request tries again.
    ///
    /// # Errors
    /// Whatever `build` returns, or [`ParkError::CyclicDependency`] when `name` is already being
    /// built on behalf of this request, or by a build that is waiting on it.
    pub fn get_or_build<F>(&self, name: &str, build: F) -> ParkResult<Arc<T>>
    where
        F: FnOnce() -> ParkResult<Arc<T>>,
    {
        self.get_or_build_within(&Chain::current(), name, |_| build())
    }

    /// [`Self::get_or_build`] on behalf of `chain`. `build` receives the chain its own nested
    /// requests must run in.
    pub(crate) fn get_or_build_within<F>(&self, chain: &Chain, name: &str, build: F) -> ParkResult<Arc<T>>
    where
        F: FnOnce(Chain) -> ParkResult<Arc<T>>,
    {
        if let Some(entity) = self.get(name) {
            trace!(namespace = %self.namespace, name, "Dictionary hit");
            return Ok(entity);
        }

        let guard = match claim::claim(ClaimKey::new(self.id, name), chain, || self.get(name)) {
            Ok(Claim::Published(entity)) => return Ok(entity),
            Ok(Claim::Owned(guard)) => guard,
            Err(Cycle) => {
                warn!(namespace = %self.namespace, name, "Cyclic dependency detected");
                return Err(ParkError::CyclicDependency {
                    namespace: self.namespace,
                    name: name.into(),
                    context: None,
                });
            }
        };

        debug!(namespace = %self.namespace, name, "Building entity");
        let nested = guard.chain();
        let result = {
            let _scope = nested.enter();
            build(nested)
        };
        let result = result.map(|entity| self.publish(name, entity));
        if let Err(err) = &result {
            debug!(namespace = %self.namespace, name, kind = %err.kind(), "Build failed; nothing published");
        }

        drop(guard);
        result
    }

    /// First publication wins: an entity inserted directly while we were building is kept.
    fn publish(&self, name: &str, entity: Arc<T>) -> Arc<T> {
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(name) {
            warn!(namespace = %self.namespace, name, "Entity was inserted during its build; keeping the first");
            return Arc::clone(existing);
        }
        entries.insert(name.into(), Arc::clone(&entity));
        entity
    }
}

impl<T: ?Sized> fmt::Debug for Dictionary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("namespace", &self.namespace)
            .field("len", &self.entries.read().len())
            .finish_non_exhaustive()
    }
}
