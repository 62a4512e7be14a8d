use strata_graph::{EdgeKey, Graph, GraphError, GraphOptions};

fn compound() -> Graph<i32, i32, ()> {
    Graph::new(GraphOptions {
        compound: true,
        ..Default::default()
    })
}

#[test]
fn set_node_is_idempotent_and_updates_in_place() {
    let mut g: Graph<i32, (), ()> = Graph::new(GraphOptions::default());
    g.set_node("a", 1);
    g.set_node("b", 2);
    g.set_node("a", 3);

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.node("a"), Some(&3));
    assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn set_edge_creates_missing_endpoints_with_default_labels() {
    let mut g: Graph<i32, i32, ()> = Graph::new(GraphOptions::default());
    g.set_default_node_label(|| 7);
    g.set_edge("a", "b");

    assert_eq!(g.node("a"), Some(&7));
    assert_eq!(g.node("b"), Some(&7));
    assert!(g.has_edge("a", "b", None));
    assert!(!g.has_edge("b", "a", None));
}

#[test]
fn set_edge_with_label_replaces_existing_label() {
    let mut g: Graph<(), i32, ()> = Graph::new(GraphOptions::default());
    g.set_edge_with_label("a", "b", 1);
    g.set_edge_with_label("a", "b", 2);

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge("a", "b", None), Some(&2));
}

#[test]
fn named_edges_require_a_multigraph() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    let err = g.set_edge_named("a", "b", Some("x"), None).unwrap_err();
    assert!(matches!(err, GraphError::NamedEdgeOnSimpleGraph { .. }));
    assert_eq!(g.edge_count(), 0);

    let mut mg: Graph<(), (), ()> = Graph::new(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    mg.set_edge_named("a", "b", Some("x"), None).unwrap();
    mg.set_edge_named("a", "b", Some("y"), None).unwrap();
    mg.set_edge("a", "b");
    assert_eq!(mg.edge_count(), 3);
    assert_eq!(mg.out_edges("a", None).len(), 3);
    assert_eq!(mg.successors("a"), vec!["b"]);
}

#[test]
fn remove_edge_updates_adjacency() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    assert!(g.remove_edge("a", "b", None));
    assert!(!g.remove_edge("a", "b", None));

    assert!(g.successors("a").is_empty());
    assert!(g.predecessors("b").is_empty());
    assert_eq!(g.successors("b"), vec!["c"]);
}

#[test]
fn remove_node_drops_incident_edges() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "c");
    assert!(g.remove_node("b"));

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_keys(), vec![EdgeKey::simple("a", "c")]);
    assert_eq!(g.predecessors("c"), vec!["a"]);
}

#[test]
fn removed_node_can_be_added_back() {
    let mut g: Graph<i32, (), ()> = Graph::new(GraphOptions::default());
    g.set_node("a", 1);
    g.set_node("b", 2);
    g.remove_node("a");
    g.set_node("a", 3);

    assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(g.node("a"), Some(&3));
}

#[test]
fn in_and_out_edges_filter_by_endpoint() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("c", "b");

    assert_eq!(g.out_edges("a", Some("c")), vec![EdgeKey::simple("a", "c")]);
    assert_eq!(g.in_edges("b", Some("c")), vec![EdgeKey::simple("c", "b")]);
    assert_eq!(g.node_edges("c", None).len(), 2);
    assert_eq!(g.node_edges("a", Some("b")), vec![EdgeKey::simple("a", "b")]);
}

#[test]
fn sources_and_sinks() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    g.set_node("d", ());

    assert_eq!(g.sources(), vec!["a", "d"]);
    assert_eq!(g.sinks(), vec!["c", "d"]);
}

#[test]
fn set_parent_fails_on_non_compound_graphs() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    let err = g.set_parent("a", "p").unwrap_err();
    assert_eq!(
        err,
        GraphError::NotCompound {
            child: "a".to_string()
        }
    );
    assert_eq!(g.parent("a"), None);
}

#[test]
fn set_parent_rejects_cycles() {
    let mut g = compound();
    g.set_parent("b", "a").unwrap();
    g.set_parent("c", "b").unwrap();

    let err = g.set_parent("a", "c").unwrap_err();
    assert!(matches!(err, GraphError::ParentCycle { .. }));
    assert_eq!(g.parent("a"), None);

    assert!(g.set_parent("a", "a").is_err());
}

#[test]
fn set_parent_moves_between_parents() {
    let mut g = compound();
    g.set_parent("x", "p1").unwrap();
    g.set_parent("x", "p2").unwrap();

    assert_eq!(g.parent("x"), Some("p2"));
    assert!(g.children("p1").is_empty());
    assert_eq!(g.children("p2"), vec!["x"]);
    assert_eq!(g.children_root(), vec!["p1", "p2"]);

    g.clear_parent("x").unwrap();
    assert_eq!(g.parent("x"), None);
    assert!(g.children("p2").is_empty());
}

#[test]
fn removing_a_parent_reattaches_children_to_root() {
    let mut g = compound();
    g.set_parent("a", "p").unwrap();
    g.set_parent("p", "gp").unwrap();
    g.remove_node("p");

    assert_eq!(g.parent("a"), None);
    assert!(g.children("gp").is_empty());
    assert!(g.children_root().contains(&"a"));
}

#[test]
fn filter_nodes_keeps_induced_edges() {
    let mut g: Graph<i32, i32, ()> = Graph::new(GraphOptions::default());
    g.set_edge_with_label("a", "b", 1);
    g.set_edge_with_label("b", "c", 2);
    g.set_edge_with_label("a", "c", 3);

    let f = g.filter_nodes(|v, _| v != "b");
    assert_eq!(f.node_ids(), vec!["a".to_string(), "c".to_string()]);
    assert_eq!(f.edge_count(), 1);
    assert_eq!(f.edge("a", "c", None), Some(&3));
}

#[test]
fn filter_nodes_reattaches_to_nearest_surviving_ancestor() {
    let mut g = compound();
    g.set_parent("leaf", "inner").unwrap();
    g.set_parent("inner", "outer").unwrap();
    g.set_parent("other", "inner").unwrap();

    let f = g.filter_nodes(|v, _| v != "inner");
    assert_eq!(f.parent("leaf"), Some("outer"));
    assert_eq!(f.parent("other"), Some("outer"));

    let f = g.filter_nodes(|v, _| v != "inner" && v != "outer");
    assert_eq!(f.parent("leaf"), None);
}

#[test]
fn take_edge_returns_the_label() {
    let mut g: Graph<(), i32, ()> = Graph::new(GraphOptions::default());
    g.set_edge_with_label("a", "b", 9);
    assert_eq!(g.take_edge("a", "b", None), Some(9));
    assert_eq!(g.edge_count(), 0);
}
