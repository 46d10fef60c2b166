//! Paging through filtered node and index listings

use clusterlens::filter::{AliasFilter, IndexFilter, IndexStateFilter, NodeFilter, NoOpFilter};
use clusterlens::model::{Index, IndexAliases, Alias, Node};
use clusterlens::paging::Paginator;
use serde_json::{json, Value};

fn indices() -> Vec<Index> {
    // twelve indices: logs-00..logs-08 open, three closed archives
    let mut indices: Vec<Index> = (0..9)
        .map(|i| {
            Index::new(&format!("logs-{:02}", i), &json!({"shards": {}}), None, None).unwrap()
        })
        .collect();
    for name in ["archive-1", "archive-2", "archive-3"] {
        indices.push(Index::closed(name));
    }
    indices.sort_by(|a, b| a.compare(b));
    indices
}

fn node(id: &str, attributes: Value) -> Node {
    Node::new(id, &json!({"name": id, "attributes": attributes}), &Value::Null).unwrap()
}

#[test]
fn test_first_page() {
    let mut paginator = Paginator::new(1, 5, indices(), IndexFilter::default());
    let page = paginator.get_page();
    assert_eq!(page.total, 12);
    assert_eq!((page.first, page.last), (1, 5));
    assert!(page.next);
    assert!(!page.previous);
    assert_eq!(page.items().count(), 5);
    assert_eq!(page.elements[0].as_ref().unwrap().name, "archive-1");
}

#[test]
fn test_last_page_is_padded() {
    let mut paginator = Paginator::new(3, 5, indices(), IndexFilter::default());
    let page = paginator.get_page();
    assert_eq!((page.first, page.last), (11, 12));
    assert!(!page.next);
    assert!(page.previous);
    assert_eq!(page.elements.len(), 5);
    assert_eq!(page.items().count(), 2);
    assert!(page.elements[2..].iter().all(Option::is_none));
}

#[test]
fn test_filter_shrinks_results() {
    let mut paginator = Paginator::new(3, 5, indices(), IndexFilter::default());
    paginator.get_page();
    paginator.set_filter(IndexFilter::new("", IndexStateFilter::Closed, false));

    let page = paginator.get_page();
    assert_eq!(paginator.current_page(), 1);
    assert_eq!(page.total, 3);
    assert_eq!((page.first, page.last), (1, 3));
    assert!(!page.previous);
    assert!(!page.next);
}

#[test]
fn test_filter_matches_nothing() {
    let mut paginator = Paginator::new(2, 5, indices(), IndexFilter::new("nothing-here", IndexStateFilter::Any, false));
    let page = paginator.get_page();
    assert_eq!(page.total, 0);
    assert_eq!(page.first, 0);
    assert_eq!(page.last, 0);
    assert_eq!(page.elements.len(), 5);
    assert_eq!(page.items().count(), 0);
    assert_eq!(paginator.current_page(), 1);
}

#[test]
fn test_invalid_regex_falls_back_to_substring() {
    let mut collection = indices();
    collection.push(Index::closed("logs-[broken"));
    let mut paginator = Paginator::new(1, 10, collection, IndexFilter::new("LOGS-[", IndexStateFilter::Any, false));
    let page = paginator.get_page();
    assert_eq!(page.total, 1);
    assert_eq!(page.elements[0].as_ref().unwrap().name, "logs-[broken");
}

#[test]
fn test_hide_special_indices() {
    let mut collection = indices();
    collection.push(Index::closed(".kibana"));
    let mut paginator = Paginator::new(1, 20, collection, IndexFilter::new("", IndexStateFilter::Any, true));
    assert_eq!(paginator.get_page().total, 12);
}

#[test]
fn test_node_role_filter() {
    let nodes = vec![
        node("data-1", json!({"master": "false"})),
        node("master-1", json!({"data": "false"})),
        node("client-1", json!({"client": "true"})),
        node("data-2", json!({"master": "false"})),
    ];
    let mut paginator = Paginator::new(1, 2, nodes, NodeFilter::new("", true, false, false));
    let page = paginator.get_page();
    assert_eq!(page.total, 2);
    assert!(page.items().all(|n| n.data));

    paginator.set_filter(NodeFilter::new("1", false, true, true));
    let page = paginator.get_page();
    let names: Vec<&str> = page.items().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["master-1", "client-1"]);
}

#[test]
fn test_alias_filter() {
    let collection = vec![
        IndexAliases::new("logs", vec![Alias::new("recent", "logs")]),
        IndexAliases::new("users", vec![Alias::new("people", "users")]),
    ];
    let mut paginator = Paginator::new(1, 10, collection, AliasFilter::new("", "peo"));
    let page = paginator.get_page();
    assert_eq!(page.total, 1);
    assert_eq!(page.elements[0].as_ref().unwrap().index, "users");
}

#[test]
fn test_navigation() {
    let mut paginator = Paginator::new(1, 4, (1..=10).collect::<Vec<u32>>(), NoOpFilter);
    paginator.next_page();
    paginator.next_page();
    let page = paginator.get_page();
    assert_eq!(page.items().copied().collect::<Vec<_>>(), vec![9, 10]);

    paginator.next_page();
    assert_eq!(paginator.get_page().first, 9);
    assert_eq!(paginator.current_page(), 3);

    paginator.previous_page();
    paginator.previous_page();
    paginator.previous_page();
    assert_eq!(paginator.current_page(), 1);
}
