mod fixtures;

use fixtures::{bare_dimension, same, standard_builder};
use luthier_domain::Namespace;
use luthier_park::entities::{Dimension, MapStore, NoOpSearchProvider, SearchProvider};
use luthier_park::{
    ConfigEntry, FactoryMap, IndustrialPark, JsonSource, ParkBuilder, ParkErrorKind, ParkResult,
    ResourceDictionaries,
};
use serde_json::json;
use std::sync::Arc;

fn fixed(_: &str, _: &ConfigEntry, _: &IndustrialPark) -> ParkResult<Arc<Dimension>> {
    Ok(Arc::new(bare_dimension("fixed")))
}

#[test]
fn built_park_ignores_later_builder_changes() {
    let document = json!({ "d": { "type": "Late" } });
    let builder = IndustrialPark::builder().source(JsonSource::new(Namespace::Dimensions, document));

    let early = builder.build();
    let builder = builder.dimension_factory("Late", fixed);
    let late = builder.build();

    assert_eq!(early.dimension("d").unwrap_err().kind(), ParkErrorKind::UnknownType);
    assert_eq!(late.dimension("d").unwrap().api_name(), "fixed");
}

#[test]
fn empty_builder_knows_no_types() {
    let park = ParkBuilder::empty()
        .source(JsonSource::new(Namespace::KeyValueStores, json!({ "memory": { "type": "MapStore" } })))
        .build();

    // No built-ins and no fallback.
    assert_eq!(park.key_value_store("memory").unwrap_err().kind(), ParkErrorKind::UnknownType);
}

#[test]
fn registered_factory_replaces_a_built_in() {
    let park = standard_builder()
        .search_provider_factory(
            "ScanSearchProvider",
            |_: &str, _: &ConfigEntry, _: &IndustrialPark| -> ParkResult<Arc<dyn SearchProvider>> {
                Ok(Arc::new(NoOpSearchProvider::new(7)))
            },
        )
        .build();

    let provider = park.search_provider("scan").unwrap();
    assert!(provider.as_any().is::<NoOpSearchProvider>());
}

#[test]
fn replacing_the_factory_map_drops_built_ins() {
    let mut factories = FactoryMap::<Dimension>::default();
    factories.insert("Fixed".to_owned(), Arc::new(fixed));

    let park = standard_builder()
        .dimension_factories(factories)
        .source(JsonSource::new(
            Namespace::Dimensions,
            json!({ "a": { "type": "Fixed" }, "b": { "type": "KeyValueStoreDimension" } }),
        ))
        .build();

    assert!(park.dimension("a").is_ok());
    assert_eq!(park.dimension("b").unwrap_err().kind(), ParkErrorKind::UnknownType);
}

#[test]
fn unsupported_marks_take_precedence_over_fallbacks() {
    let park = standard_builder()
        .unsupported(Namespace::KeyValueStores, "MapStore")
        .build();

    assert_eq!(park.key_value_store("memory").unwrap_err().kind(), ParkErrorKind::UnsupportedCapability);
    // Unknown types still reach the fallback.
    assert!(park.key_value_store("custom").unwrap().as_any().is::<MapStore>());
}

#[test]
fn fallback_can_be_removed() {
    let park = standard_builder().key_value_store_fallback(None).build();
    assert_eq!(park.key_value_store("custom").unwrap_err().kind(), ParkErrorKind::UnknownType);
}

#[test]
fn parks_share_supplied_dictionaries() {
    let shared = ResourceDictionaries::new();
    let first = standard_builder().dictionaries(shared.clone()).build();
    let second = standard_builder().dictionaries(shared.clone()).build();

    let built = first.dimension("gender").unwrap();
    assert!(same(&built, &second.dimension("gender").unwrap()));
    assert!(shared.dimensions().contains("gender"));

    // Search providers are per park.
    assert!(second.search_provider_dictionary().is_empty());
}

#[test]
fn each_build_gets_fresh_dictionaries_by_default() {
    let builder = standard_builder();
    let first = builder.build();
    let second = builder.build();

    first.dimension("gender").unwrap();
    assert!(second.dimension_dictionary().is_empty());
}

#[test]
fn directly_inserted_dimensions_are_served() {
    let park = standard_builder().build();
    let manual = Arc::new(bare_dimension("manual"));
    park.dimension_dictionary().insert("manual", Arc::clone(&manual)).unwrap();

    assert!(same(&park.dimension("manual").unwrap(), &manual));
    let err = park.dimension_dictionary().insert("manual", manual).unwrap_err();
    assert_eq!(err.kind(), ParkErrorKind::Duplicate);
}

#[test]
fn sources_for_dictionary_only_namespaces_are_ignored() {
    let park = standard_builder()
        .source(JsonSource::new(Namespace::Metrics, json!({ "revenue": { "type": "LongSum" } })))
        .build();

    assert_eq!(park.metric("revenue").unwrap_err().kind(), ParkErrorKind::ConfigNotFound);
}
