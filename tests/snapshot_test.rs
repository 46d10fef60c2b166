//! Snapshot building from raw cluster documents

use clusterlens::model::{Cluster, RawDocuments};
use clusterlens::ClusterError;
use serde_json::{json, Value};

fn node(name: &str, attributes: Value) -> Value {
    json!({"name": name, "transport_address": format!("inet[/{}:9300]", name), "attributes": attributes})
}

fn documents() -> RawDocuments {
    RawDocuments {
        state: json!({
            "cluster_name": "search",
            "master_node": "m2",
            "nodes": {
                "d1": node("zeta", json!({"master": "false"})),
                "m1": node("alpha", json!({"data": "false"})),
                "m2": node("omega", json!({"data": "false"})),
                "c1": node("client", json!({"client": "true", "data": "false", "master": "false"})),
                "d2": node("Beta", json!({"master": "false"}))
            },
            "routing_table": {"indices": {
                "orders": {"shards": {
                    "0": [
                        {"primary": true, "shard": 0, "state": "STARTED", "node": "d1", "index": "orders"},
                        {"primary": false, "shard": 0, "state": "INITIALIZING", "node": "d2", "index": "orders"}
                    ]
                }},
                ".kibana": {"shards": {
                    "0": [{"primary": true, "shard": 0, "state": "STARTED", "node": "d2", "index": ".kibana"}]
                }}
            }},
            "blocks": {"indices": {"old-orders": {"4": {"description": "index closed"}}}}
        }),
        status: json!({
            "_shards": {"total": 4, "successful": 3, "failed": 1},
            "indices": {
                "orders": {
                    "docs": {"num_docs": 120, "max_doc": 130, "deleted_docs": 10},
                    "index": {"primary_size_in_bytes": 2048, "size_in_bytes": 4096}
                }
            }
        }),
        node_stats: json!({"nodes": {
            "d1": {"indices": {"docs": {"count": 100}, "store": {"size_in_bytes": 1048576}}},
            "d2": {"indices": {"docs": {"count": 20}, "store": {"size_in_bytes": 1048576}}}
        }}),
        settings: json!({
            "persistent": {"cluster.routing.allocation.enable": "all"},
            "transient": {"cluster.routing.allocation.enable": "none"}
        }),
        aliases: json!({
            "orders": {"aliases": {"a1": {}, "a2": {}, "a3": {}, "a4": {}, "a5": {}, "a6": {}}},
            ".kibana": {"aliases": {}}
        }),
    }
}

#[test]
fn test_node_order() {
    let cluster = Cluster::build(&documents()).unwrap();
    let names: Vec<&str> = cluster.nodes.iter().map(|n| n.name.as_str()).collect();
    // current master, master eligible, data, then client; names case-sensitive
    assert_eq!(names, vec!["omega", "alpha", "Beta", "zeta", "client"]);
    assert_eq!(cluster.master_node.as_deref(), Some("m2"));
    assert_eq!(cluster.nodes.iter().filter(|n| n.current_master).count(), 1);
}

#[test]
fn test_sorting_is_stable() {
    let cluster = Cluster::build(&documents()).unwrap();
    let mut nodes = cluster.nodes.clone();
    nodes.sort_by(|a, b| a.compare(b));
    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let original: Vec<&str> = cluster.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, original);
}

#[test]
fn test_roles() {
    let cluster = Cluster::build(&documents()).unwrap();
    let client = cluster.node("c1").unwrap();
    assert!(client.client && !client.master && !client.data);
    let data = cluster.node("d1").unwrap();
    assert!(data.data && !data.master && !data.client);
    let master = cluster.node("m1").unwrap();
    assert!(master.master && !master.data);
}

#[test]
fn test_indices() {
    let cluster = Cluster::build(&documents()).unwrap();
    let names: Vec<&str> = cluster.indices.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec![".kibana", "old-orders", "orders"]);
    assert_eq!(cluster.special_indices, 1);

    let orders = cluster.index("orders").unwrap();
    assert!(orders.unhealthy);
    assert_eq!(orders.num_docs, 120);
    assert_eq!(orders.deleted_docs, 10);
    assert_eq!(orders.size, "4.00KB");
    assert_eq!(orders.aliases.len(), 6);
    assert_eq!(orders.visible_aliases().len(), 5);
    assert_eq!(orders.shards_on("d1").len(), 1);

    let kibana = cluster.index(".kibana").unwrap();
    assert!(kibana.special);
    assert!(!kibana.unhealthy);
    assert!(kibana.aliases.is_empty());
    assert_eq!(kibana.num_docs, 0);

    assert!(cluster.index("old-orders").unwrap().is_closed());
}

#[test]
fn test_totals() {
    let cluster = Cluster::build(&documents()).unwrap();
    assert_eq!(cluster.num_docs, 120);
    assert_eq!(cluster.total_size_in_bytes, 2 * 1048576);
    assert_eq!(cluster.total_size, "2.00MB");
    assert_eq!(cluster.shards, 4);
    assert_eq!(cluster.failed_shards, 1);
    assert_eq!(cluster.successful_shards, 3);
    assert_eq!(cluster.number_of_nodes, 5);
}

#[test]
fn test_transient_allocation_wins() {
    let cluster = Cluster::build(&documents()).unwrap();
    assert!(!cluster.allocation_enabled);

    let mut docs = documents();
    docs.settings = json!({"persistent": {"cluster.routing.allocation.enable": "none"}, "transient": {}});
    assert!(!Cluster::build(&docs).unwrap().allocation_enabled);

    docs.settings = json!({"persistent": {}, "transient": {}});
    assert!(Cluster::build(&docs).unwrap().allocation_enabled);
}

#[test]
fn test_missing_nodes_is_error() {
    let mut docs = documents();
    docs.state.as_object_mut().unwrap().remove("nodes");
    assert!(matches!(
        Cluster::build(&docs),
        Err(ClusterError::InvalidDocument { .. })
    ));
}

#[test]
fn test_wrong_document_type_is_error() {
    let mut docs = documents();
    docs.status = json!([1, 2, 3]);
    assert!(matches!(
        Cluster::build(&docs),
        Err(ClusterError::MissingDocument(_))
    ));
}
