mod fixtures;

use fixtures::{same, standard_builder, standard_park};
use luthier_domain::{DefaultTimeGrain, Granularity, Namespace};
use luthier_park::entities::{
    AggregationAverageMaker, LogicalTable, LuceneSearchProvider, MapStore, MetricFormula, NoOpSearchProvider,
    PhysicalTable,
};
use luthier_park::{
    ConfigSource, ConfigTree, Entity, IndustrialPark, JsonSource, ParkError, ParkErrorKind, ParkResult,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct CountingSource {
    inner: JsonSource,
    fetches: Arc<AtomicUsize>,
}

impl ConfigSource for CountingSource {
    fn namespace(&self) -> Namespace {
        self.inner.namespace()
    }

    fn fetch(&self) -> ParkResult<ConfigTree> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch()
    }
}

#[test]
fn dimension_graph_resolves_on_demand() {
    let park = standard_park();
    assert!(park.search_provider_dictionary().is_empty());

    let gender = park.dimension("gender").unwrap();

    assert_eq!(gender.api_name(), "gender");
    assert_eq!(gender.description(), "Reader gender");
    assert_eq!(gender.long_name(), "gender");
    assert_eq!(gender.category(), "Demographics");
    assert_eq!(gender.fields(), ["id", "desc"]);

    let provider = gender.search_provider().as_any().downcast_ref::<NoOpSearchProvider>().unwrap();
    assert_eq!(provider.query_weight_limit(), 100_000);
    assert!(provider.admits(100_000));
    assert!(!provider.admits(100_001));

    // Only what the dimension needed was built.
    assert_eq!(park.search_provider_dictionary().names().len(), 1);
    assert!(park.key_value_store_dictionary().contains("memory"));
    assert!(!park.key_value_store_dictionary().contains("custom"));
}

#[test]
fn shared_dependencies_are_built_once() {
    let park = standard_park();
    let gender = park.dimension("gender").unwrap();
    let country = park.dimension("country").unwrap();

    assert!(same(gender.key_value_store(), country.key_value_store()));
    assert!(same(gender.key_value_store(), &park.key_value_store("memory").unwrap()));
    assert!(same(&gender, &park.dimension("gender").unwrap()));

    // Rows written through one dimension's store are visible to the other.
    gender.key_value_store().put("f", "female".to_owned());
    assert_eq!(country.value_of("f").as_deref(), Some("female"));
    assert_eq!(country.value_of("m"), None);
}

#[test]
fn cached_entities_do_not_refetch_the_document() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let park = standard_builder()
        .source(CountingSource {
            inner: JsonSource::new(Namespace::SearchProviders, fixtures::search_providers()),
            fetches: Arc::clone(&fetches),
        })
        .build();

    let first = park.search_provider("noop").unwrap();
    let second = park.search_provider("noop").unwrap();

    assert!(same(&first, &second));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn lucene_settings_are_read() {
    let provider = standard_park().search_provider("lucene").unwrap();
    let lucene = provider.as_any().downcast_ref::<LuceneSearchProvider>().unwrap();

    assert_eq!(lucene.index_path().to_str(), Some("/var/lib/luthier/lucene"));
    assert_eq!(lucene.max_results(), 500);
    assert_eq!(lucene.search_timeout(), Duration::from_secs(3));
}

#[test]
fn missing_dependency_surfaces_unchanged() {
    let park = standard_builder()
        .source(JsonSource::new(
            Namespace::Dimensions,
            json!({
                "browser": {
                    "type": "KeyValueStoreDimension",
                    "keyValueStore": "memory",
                    "searchProvider": "elastic",
                    "fields": ["id"]
                }
            }),
        ))
        .build();

    let err = park.dimension("browser").unwrap_err();
    let ParkError::ConfigNotFound { namespace, name, .. } = &err else {
        panic!("expected a missing entry, got {err}");
    };
    assert_eq!(*namespace, Namespace::SearchProviders);
    assert_eq!(&**name, "elastic");
    assert!(!park.dimension_dictionary().contains("browser"));
}

#[test]
fn unknown_name_is_config_not_found() {
    let err = standard_park().dimension("age").unwrap_err();
    assert_eq!(err.kind(), ParkErrorKind::ConfigNotFound);
    assert_eq!(err.namespace(), Some(Namespace::Dimensions));
}

#[test]
fn unknown_type_names_the_discriminator() {
    let park = IndustrialPark::builder()
        .source(JsonSource::new(
            Namespace::SearchProviders,
            json!({ "elastic": { "type": "ElasticSearchProvider" } }),
        ))
        .build();

    let err = park.search_provider("elastic").unwrap_err();
    let ParkError::UnknownType { discriminator, .. } = &err else { panic!("got {err}") };
    assert_eq!(&**discriminator, "ElasticSearchProvider");
}

#[test]
fn redis_store_is_unsupported_and_others_fall_back_to_memory() {
    let park = standard_builder()
        .source(JsonSource::new(
            Namespace::KeyValueStores,
            json!({ "redis": { "type": "RedisStore" }, "custom": { "type": "SomethingHomegrown" } }),
        ))
        .build();

    assert_eq!(park.key_value_store("redis").unwrap_err().kind(), ParkErrorKind::UnsupportedCapability);

    let custom = park.key_value_store("custom").unwrap();
    assert!(custom.as_any().is::<MapStore>());
}

#[test]
fn entries_without_type_fail_validation() {
    let park = IndustrialPark::builder()
        .source(JsonSource::new(Namespace::SearchProviders, json!({ "typeless": { "queryWeightLimit": 1 } })))
        .build();

    let err = park.search_provider("typeless").unwrap_err();
    let ParkError::Validation { field, .. } = &err else { panic!("got {err}") };
    assert_eq!(field, "type");
}

#[test]
fn invalid_fields_name_the_field() {
    let park = IndustrialPark::builder()
        .source(JsonSource::new(
            Namespace::SearchProviders,
            json!({
                "noLimit": { "type": "NoOpSearchProvider" },
                "badLimit": { "type": "NoOpSearchProvider", "queryWeightLimit": "lots" },
                "noIndex": { "type": "LuceneSearchProvider", "maxResults": 10, "searchTimeout": 10 },
                "noResults": {
                    "type": "LuceneSearchProvider",
                    "indexPath": "/tmp/index",
                    "maxResults": 0,
                    "searchTimeout": 10
                }
            }),
        ))
        .build();

    for (name, expected) in [
        ("noLimit", "queryWeightLimit"),
        ("badLimit", "queryWeightLimit"),
        ("noIndex", "indexPath"),
        ("noResults", "maxResults"),
    ] {
        let err = park.search_provider(name).unwrap_err();
        let ParkError::Validation { field, name: entity, .. } = &err else { panic!("got {err}") };
        assert_eq!(field, expected);
        assert_eq!(&**entity, name);
    }
    assert!(park.search_provider_dictionary().is_empty());
}

#[test]
fn dimension_fields_must_be_a_non_empty_string_list() {
    let park = standard_builder()
        .source(JsonSource::new(
            Namespace::Dimensions,
            json!({
                "empty": { "type": "KeyValueStoreDimension", "keyValueStore": "memory", "searchProvider": "scan", "fields": [] },
                "numeric": { "type": "KeyValueStoreDimension", "keyValueStore": "memory", "searchProvider": "scan", "fields": [1] }
            }),
        ))
        .build();

    for name in ["empty", "numeric"] {
        let err = park.dimension(name).unwrap_err();
        let ParkError::Validation { field, .. } = &err else { panic!("got {err}") };
        assert_eq!(field, "fields");
    }
}

#[test]
fn aggregation_average_reads_its_inner_grain() {
    let maker = standard_park().metric_maker("dailyAverage").unwrap();
    let average = maker.as_any().downcast_ref::<AggregationAverageMaker>().unwrap();
    assert_eq!(average.inner_grain(), DefaultTimeGrain::Day);
}

#[test]
fn aggregation_average_rejects_all_and_unknown_grains() {
    let park = IndustrialPark::builder()
        .source(JsonSource::new(
            Namespace::MetricMakers,
            json!({
                "everything": { "type": "AggregationAverageMaker", "innerGrain": "all" },
                "fortnightly": { "type": "AggregationAverageMaker", "innerGrain": "fortnight" }
            }),
        ))
        .build();

    for (name, grain) in [("everything", "all"), ("fortnightly", "fortnight")] {
        let err = park.metric_maker(name).unwrap_err();
        let message = err.to_string();
        assert_eq!(err.kind(), ParkErrorKind::Validation);
        assert!(message.contains(grain) && message.contains(name), "{message}");
    }
}

#[test]
fn makers_publish_into_the_metric_dictionary() {
    let park = standard_park();
    let long_sum = park.metric_maker("longSum").unwrap();
    let average = park.metric_maker("dailyAverage").unwrap();

    long_sum.make("pageViews", &["page_views"]).unwrap();
    let made = average.make("dailyAvgPageViews", &["pageViews"]).unwrap();

    let MetricFormula::AggregationAverage { inner, grain } = made.formula() else {
        panic!("unexpected formula {:?}", made.formula());
    };
    assert_eq!(inner.name(), "pageViews");
    assert_eq!(*grain, DefaultTimeGrain::Day);

    let Entity::Metric(published) = park.get(Namespace::Metrics, "dailyAvgPageViews").unwrap() else {
        panic!("metrics namespace returned another entity");
    };
    assert!(same(&published, &made));
}

#[test]
fn dictionary_only_namespaces_never_build() {
    let park = standard_park();
    assert_eq!(park.metric("revenue").unwrap_err().kind(), ParkErrorKind::ConfigNotFound);
    assert_eq!(park.logical_table("wiki").unwrap_err().namespace(), Some(Namespace::LogicalTables));
    assert_eq!(park.physical_table("wiki").unwrap_err().kind(), ParkErrorKind::ConfigNotFound);
}

#[test]
fn published_tables_are_served_by_name() {
    let park = standard_park();
    park.physical_table_dictionary()
        .insert("wiki_hourly", Arc::new(PhysicalTable::new("wiki_hourly", DefaultTimeGrain::Hour)))
        .unwrap();
    let wiki = park
        .logical_table_dictionary()
        .insert("wiki", Arc::new(LogicalTable::new("wiki", Granularity::All, vec![Arc::from("pageViews")])))
        .unwrap();

    let Entity::LogicalTable(logical) = park.get(Namespace::LogicalTables, "wiki").unwrap() else {
        panic!("logical tables namespace returned another entity");
    };
    assert!(same(&logical, &wiki));
    assert_eq!(logical.metrics(), [Arc::<str>::from("pageViews")]);

    let Entity::PhysicalTable(physical) = park.get(Namespace::PhysicalTables, "wiki_hourly").unwrap() else {
        panic!("physical tables namespace returned another entity");
    };
    assert_eq!(physical.grain(), DefaultTimeGrain::Hour);

    assert_eq!(park.published_names(Namespace::LogicalTables), [Arc::<str>::from("wiki")]);
    assert_eq!(park.configured_names(Namespace::PhysicalTables).unwrap(), [Arc::<str>::from("wiki_hourly")]);
    assert!(park.load(Namespace::LogicalTables).unwrap().is_empty());
}

#[test]
fn get_dispatches_on_namespace() {
    let park = standard_park();

    for (namespace, name) in [
        (Namespace::Dimensions, "country"),
        (Namespace::SearchProviders, "scan"),
        (Namespace::KeyValueStores, "memory"),
        (Namespace::MetricMakers, "longSum"),
    ] {
        assert_eq!(park.get(namespace, name).unwrap().namespace(), namespace);
    }
}

#[test]
fn unconfigured_namespace_is_a_source_error() {
    let park = IndustrialPark::builder()
        .source(JsonSource::new(Namespace::Dimensions, fixtures::dimensions()))
        .build();

    let err = park.dimension("gender").unwrap_err();
    assert_eq!(err.kind(), ParkErrorKind::ConfigSource);
    assert_eq!(err.namespace(), Some(Namespace::KeyValueStores));
}
