use crate::error::{ParkError, ParkResult};
use crate::factory::{Factory, FactoryMap, SharedFactory};
use fxhash::FxHashSet;
use luthier_domain::Namespace;
use std::fmt;

/// Maps a namespace's discriminators to factories.
///
/// Lookup order: registered factory, then the unsupported list, then the fallback. Anything else
/// is an unknown type.
pub struct TypeDispatcher<T: ?Sized> {
    namespace: Namespace,
    bindings: FactoryMap<T>,
    unsupported: FxHashSet<String>,
    fallback: Option<SharedFactory<T>>,
}

impl<T: ?Sized + 'static> TypeDispatcher<T> {
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            bindings: FactoryMap::default(),
            unsupported: FxHashSet::default(),
            fallback: None,
        }
    }

    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Replaces every binding.
    pub fn set_bindings(&mut self, bindings: FactoryMap<T>) {
        self.bindings = bindings;
    }

    /// Binds `discriminator`, replacing any previous factory and clearing an unsupported mark.
    pub fn bind(&mut self, discriminator: impl Into<String>, factory: SharedFactory<T>) {
        let discriminator = discriminator.into();
        self.unsupported.remove(&discriminator);
        self.bindings.insert(discriminator, factory);
    }

    /// Marks `discriminator` as known but unimplemented, removing its factory if any.
    pub fn mark_unsupported(&mut self, discriminator: impl Into<String>) {
        let discriminator = discriminator.into();
        self.bindings.remove(&discriminator);
        self.unsupported.insert(discriminator);
    }

    pub fn set_fallback(&mut self, fallback: Option<SharedFactory<T>>) {
        self.fallback = fallback;
    }

    /// # Errors
    /// [`ParkError::UnsupportedCapability`] for marked discriminators, [`ParkError::UnknownType`]
    /// when nothing applies.
    pub fn resolve(&self, discriminator: &str) -> ParkResult<&dyn Factory<T>> {
        if let Some(factory) = self.bindings.get(discriminator) {
            return Ok(factory.as_ref());
        }
        if self.unsupported.contains(discriminator) {
            return Err(ParkError::UnsupportedCapability {
                namespace: self.namespace,
                discriminator: discriminator.into(),
                context: None,
            });
        }
        self.fallback.as_deref().ok_or_else(|| ParkError::UnknownType {
            namespace: self.namespace,
            discriminator: discriminator.into(),
            context: None,
        })
    }

    /// Bound discriminators, sorted.
    #[must_use]
    pub fn discriminators(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// Shallow: factories are shared, the maps are not.
impl<T: ?Sized> Clone for TypeDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace,
            bindings: self.bindings.clone(),
            unsupported: self.unsupported.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for TypeDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<_> = self.bindings.keys().collect();
        bound.sort_unstable();
        let mut unsupported: Vec<_> = self.unsupported.iter().collect();
        unsupported.sort_unstable();

        f.debug_struct("TypeDispatcher")
            .field("namespace", &self.namespace)
            .field("bindings", &bound)
            .field("unsupported", &unsupported)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParkErrorKind;
    use crate::park::IndustrialPark;
    use crate::source::ConfigEntry;
    use std::sync::Arc;

    fn constant(value: u32) -> SharedFactory<u32> {
        Arc::new(move |_: &str, _: &ConfigEntry, _: &IndustrialPark| -> ParkResult<Arc<u32>> {
            Ok(Arc::new(value))
        })
    }

    fn built(dispatcher: &TypeDispatcher<u32>, discriminator: &str) -> u32 {
        let park = IndustrialPark::builder().build();
        let entry = ConfigEntry::new(Namespace::KeyValueStores, "x", serde_json::Map::new());
        *dispatcher.resolve(discriminator).unwrap().build("x", &entry, &park).unwrap()
    }

    #[test]
    fn binding_wins_over_fallback() {
        let mut dispatcher = TypeDispatcher::new(Namespace::KeyValueStores);
        dispatcher.bind("MapStore", constant(1));
        dispatcher.set_fallback(Some(constant(2)));

        assert_eq!(built(&dispatcher, "MapStore"), 1);
        assert_eq!(built(&dispatcher, "Anything"), 2);
    }

    #[test]
    fn unsupported_is_checked_before_fallback() {
        let mut dispatcher = TypeDispatcher::new(Namespace::KeyValueStores);
        dispatcher.set_fallback(Some(constant(2)));
        dispatcher.mark_unsupported("RedisStore");

        let err = dispatcher.resolve("RedisStore").err().unwrap();
        assert_eq!(err.kind(), ParkErrorKind::UnsupportedCapability);
    }

    #[test]
    fn unknown_without_fallback() {
        let dispatcher = TypeDispatcher::<u32>::new(Namespace::SearchProviders);
        let err = dispatcher.resolve("ElasticSearchProvider").err().unwrap();

        assert_eq!(err.kind(), ParkErrorKind::UnknownType);
        assert!(err.to_string().contains("ElasticSearchProvider"), "{err}");
    }

    #[test]
    fn clones_do_not_share_bindings() {
        let mut original = TypeDispatcher::new(Namespace::Dimensions);
        original.bind("A", constant(1));
        let copy = original.clone();
        original.bind("B", constant(2));

        assert_eq!(copy.discriminators(), ["A"]);
        assert_eq!(original.discriminators(), ["A", "B"]);
    }
}
