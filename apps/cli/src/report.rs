//! One-line summaries of resolved entities.

use luthier_park::Entity;
use luthier_park::entities::{LuceneSearchProvider, NoOpSearchProvider};

pub(crate) fn describe(entity: &Entity) -> String {
    match entity {
        Entity::Dimension(dimension) => format!(
            "dimension {} ({}) fields=[{}] store={} search={}",
            dimension.api_name(),
            dimension.category(),
            dimension.fields().join(", "),
            dimension.key_value_store().kind(),
            dimension.search_provider().kind(),
        ),
        Entity::SearchProvider(provider) => {
            let any = provider.as_any();
            if let Some(noop) = any.downcast_ref::<NoOpSearchProvider>() {
                format!("{} queryWeightLimit={}", provider.kind(), noop.query_weight_limit())
            } else if let Some(lucene) = any.downcast_ref::<LuceneSearchProvider>() {
                format!(
                    "{} index={} maxResults={} timeout={}ms",
                    provider.kind(),
                    lucene.index_path().display(),
                    lucene.max_results(),
                    lucene.search_timeout().as_millis(),
                )
            } else {
                provider.kind().to_owned()
            }
        },
        Entity::KeyValueStore(store) => format!("{} rows={}", store.kind(), store.len()),
        Entity::MetricMaker(maker) => {
            format!("{} dependencies={}", maker.kind(), maker.dependency_count())
        },
        Entity::Metric(metric) => format!("metric {} {:?}", metric.name(), metric.formula()),
        Entity::LogicalTable(table) => {
            format!("logical table {} granularity={}", table.name(), table.granularity())
        },
        Entity::PhysicalTable(table) => {
            format!("physical table {} grain={}", table.name(), table.grain())
        },
    }
}
