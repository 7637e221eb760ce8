//! Merge and propagation behavior of the route table builder.

use std::sync::Arc;

use gateway_core::registry::metadata::KeyedMetadataParser;
use gateway_core::routing::builder::{
    MergeStrategy, RouteDescriptor, RouteMap, RouteTableBuilder,
};
use gateway_core::routing::channel::ChannelType;

mod common;

use common::{MockRegistry, RecordingConsumer};

fn builder(registry: Arc<MockRegistry>) -> RouteTableBuilder {
    RouteTableBuilder::new(registry, Arc::new(KeyedMetadataParser::new()))
}

#[tokio::test]
async fn test_discovered_service_routes_located() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");

    let routes = builder(registry).locate_routes(&RouteMap::new()).await;

    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes.get("/api/v1/service/**"),
        Some(&RouteDescriptor::new("service"))
    );
}

#[tokio::test]
async fn test_service_with_two_routes_gets_two_entries() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");
    registry.add_route(&instance, "ws-v1", "ws/v1", "/ws");

    let routes = builder(registry).locate_routes(&RouteMap::new()).await;

    assert_eq!(routes.len(), 2);
    assert!(routes.contains_key("/api/v1/service/**"));
    assert!(routes.contains_key("/ws/v1/service/**"));
}

#[tokio::test]
async fn test_service_without_metadata_gets_default_route() {
    let registry = MockRegistry::new();
    registry.add_instance("service");

    let routes = builder(registry).locate_routes(&RouteMap::new()).await;

    assert_eq!(routes.len(), 1);
    assert!(routes.contains_key("/service/**"));
}

#[tokio::test]
async fn test_service_without_instances_is_skipped() {
    let registry = MockRegistry::new();
    registry.add_offline_service("restarting");
    let consumer = RecordingConsumer::new();

    let routes = builder(registry)
        .with_consumer(consumer.clone())
        .locate_routes(&RouteMap::new())
        .await;

    // transiently absent: no route, no table push, no error
    assert!(routes.is_empty());
    assert!(consumer.updates().is_empty());
}

#[tokio::test]
async fn test_offline_service_reappears_once_instances_return() {
    let registry = MockRegistry::new();
    registry.add_offline_service("service");
    let builder = builder(registry.clone());

    let first = builder.locate_routes(&RouteMap::new()).await;
    assert!(first.is_empty());

    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");

    let second = builder.locate_routes(&RouteMap::new()).await;
    assert!(second.contains_key("/api/v1/service/**"));
}

#[tokio::test]
async fn test_static_route_wins_over_discovery() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");

    let mut static_routes = RouteMap::new();
    static_routes.insert(
        "/api/v1/service/**",
        RouteDescriptor::with_url("service", "https://pinned.internal:8443"),
    );

    let routes = builder(registry).locate_routes(&static_routes).await;

    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes.get("/api/v1/service/**").unwrap().url.as_deref(),
        Some("https://pinned.internal:8443")
    );
}

#[tokio::test]
async fn test_placeholder_removed_once_service_is_discovered() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");

    let mut static_routes = RouteMap::new();
    static_routes.insert("/service/**", RouteDescriptor::new("service"));

    let routes = builder(registry).locate_routes(&static_routes).await;

    assert!(!routes.contains_key("/service/**"));
    assert!(routes.contains_key("/api/v1/service/**"));
}

#[tokio::test]
async fn test_placeholder_removed_even_without_metadata_routes() {
    // absence of metadata is not consent to the auto-default: the
    // placeholder goes away and its key is not resurrected by the
    // synthesized default for the same service
    let registry = MockRegistry::new();
    registry.add_instance("service");

    let mut static_routes = RouteMap::new();
    static_routes.insert("/service/**", RouteDescriptor::new("service"));

    let routes = builder(registry).locate_routes(&static_routes).await;

    assert!(routes.is_empty());
}

#[tokio::test]
async fn test_ignored_service_contributes_no_routes_but_tables_flow() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("discovery");
    registry.add_route(&instance, "api-v1", "api/v1", "/");
    let consumer = RecordingConsumer::new();

    let routes = builder(registry)
        .with_ignored_services(vec!["disc*".to_string()])
        .with_consumer(consumer.clone())
        .locate_routes(&RouteMap::new())
        .await;

    assert!(routes.is_empty());
    // exposure policy does not gate route knowledge
    let tables = consumer.tables_for("discovery");
    assert_eq!(tables.len(), 1);
    assert!(tables[0].get(ChannelType::Api).is_some());
}

#[tokio::test]
async fn test_tables_pushed_once_per_service_per_cycle() {
    let registry = MockRegistry::new();
    let first = registry.add_instance("service");
    registry.add_route(&first, "api-v1", "api/v1", "/");
    let second = registry.add_instance("service");
    registry.add_route(&second, "ui-v1", "ui/v1", "/ui");
    registry.add_instance("catalog");
    let consumer = RecordingConsumer::new();

    builder(registry)
        .with_consumer(consumer.clone())
        .locate_routes(&RouteMap::new())
        .await;

    let updates = consumer.updates();
    assert_eq!(updates.len(), 2);
    // both instances' metadata land in the one table for the service
    let tables = consumer.tables_for("service");
    assert!(tables[0].get(ChannelType::Api).is_some());
    assert!(tables[0].get(ChannelType::Ui).is_some());
    assert!(consumer.tables_for("catalog")[0].is_empty());
}

#[tokio::test]
async fn test_global_prefix_applied_to_every_key() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");

    let mut static_routes = RouteMap::new();
    static_routes.insert(
        "/catalog/**",
        RouteDescriptor::with_url("catalog", "https://catalog.internal:8443"),
    );

    let routes = builder(registry)
        .with_prefix("gateway")
        .locate_routes(&static_routes)
        .await;

    let keys: Vec<&String> = routes.keys().collect();
    assert_eq!(keys, ["/gateway/catalog/**", "/gateway/api/v1/service/**"]);
}

#[tokio::test]
async fn test_merge_is_deterministic() {
    let registry = MockRegistry::new();
    let instance = registry.add_instance("service");
    registry.add_route(&instance, "api-v1", "api/v1", "/");
    registry.add_route(&instance, "ws-v1", "ws/v1", "/ws");
    registry.add_instance("catalog");

    let mut static_routes = RouteMap::new();
    static_routes.insert(
        "/pinned/**",
        RouteDescriptor::with_url("pinned", "https://pinned.internal"),
    );

    let builder = builder(registry);
    let first = builder.locate_routes(&static_routes).await;
    let second = builder.locate_routes(&static_routes).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_discovery_only_strategy_drops_placeholders() {
    let registry = MockRegistry::new();
    registry.add_instance("service");
    let consumer = RecordingConsumer::new();

    let mut located = RouteMap::new();
    located.insert(
        "/catalog/**",
        RouteDescriptor::with_url("catalog", "https://catalog.internal:8443"),
    );
    located.insert("/service/**", RouteDescriptor::new("service"));

    let routes = builder(registry)
        .with_strategy(MergeStrategy::DiscoveryOnly)
        .with_consumer(consumer.clone())
        .locate_routes(&located)
        .await;

    assert_eq!(routes.len(), 1);
    assert!(routes.contains_key("/catalog/**"));
    // the single-pass variant does not propagate tables
    assert!(consumer.updates().is_empty());
}
