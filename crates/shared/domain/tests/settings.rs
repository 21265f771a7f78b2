use luthier_domain::{Namespace, ParkSettings};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn settings_defaults_point_at_config_dir() {
    let settings = ParkSettings::default();

    assert!(settings.eager_load);
    assert_eq!(
        settings.source_path(Namespace::Dimensions),
        Some(PathBuf::from("config/DimensionConfig.json"))
    );
    assert_eq!(
        settings.source_path(Namespace::SearchProviders),
        Some(PathBuf::from("config/SearchProviderConfig.json"))
    );
    assert_eq!(settings.source_path(Namespace::Metrics), None);
}

#[test]
fn settings_deserialize_with_partial_overrides() {
    let raw = json!({
        "config_dir": "/etc/luthier",
        "eager_load": false,
        "sources": { "dimensions": "dims.json" }
    });

    let settings: ParkSettings = serde_json::from_value(raw).expect("settings deserialize");

    assert!(!settings.eager_load);
    assert_eq!(
        settings.source_path(Namespace::Dimensions),
        Some(PathBuf::from("/etc/luthier/dims.json"))
    );
    assert_eq!(
        settings.source_path(Namespace::MetricMakers),
        Some(PathBuf::from("/etc/luthier/MetricMakerConfig.json"))
    );
}

#[test]
fn absolute_source_files_ignore_config_dir() {
    let mut settings = ParkSettings::default();
    settings.sources.key_value_stores = PathBuf::from("/srv/stores.json");

    assert_eq!(
        settings.source_path(Namespace::KeyValueStores),
        Some(PathBuf::from("/srv/stores.json"))
    );
}
