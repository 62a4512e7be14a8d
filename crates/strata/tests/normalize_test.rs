use strata::graphlib::{EdgeKey, GraphOptions};
use strata::{Dummy, EdgeLabel, LayoutGraph, NodeLabel, Point, normalize};

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    })
}

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        ..Default::default()
    }
}

fn chain_head(g: &LayoutGraph) -> String {
    g.graph().dummy_chains[0].clone()
}

#[test]
fn run_leaves_a_one_rank_edge_alone() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_edge("a", "b");
    normalize::run(&mut g).unwrap();

    assert_eq!(g.node_count(), 2);
    assert!(g.has_edge("a", "b", None));
    assert!(g.graph().dummy_chains.is_empty());
}

#[test]
fn run_splits_a_two_rank_edge() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(2));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            weight: 3.0,
            ..Default::default()
        },
    );
    normalize::run(&mut g).unwrap();

    let dummy = chain_head(&g);
    assert_eq!(g.successors("a"), vec![dummy.as_str()]);
    assert_eq!(g.successors(&dummy), vec!["b"]);
    assert_eq!(g.node(&dummy).unwrap().rank, Some(1));
    assert_eq!(g.edge("a", &dummy, None).unwrap().weight, 3.0);
    assert_eq!(g.edge(&dummy, "b", None).unwrap().weight, 3.0);
    match &g.node(&dummy).unwrap().dummy {
        Some(Dummy::Edge { edge, original }) => {
            assert_eq!(edge, &EdgeKey::simple("a", "b"));
            assert!(original.is_some());
        }
        other => panic!("unexpected dummy {other:?}"),
    }
}

#[test]
fn run_keeps_only_the_first_dummy_as_chain_head() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(4));
    g.set_edge("a", "b");
    normalize::run(&mut g).unwrap();

    assert_eq!(g.node_count(), 5);
    assert_eq!(g.graph().dummy_chains.len(), 1);
    let head = chain_head(&g);
    let second = g.successors(&head)[0].to_string();
    match &g.node(&second).unwrap().dummy {
        Some(Dummy::Edge { original, .. }) => assert!(original.is_none()),
        other => panic!("unexpected dummy {other:?}"),
    }
}

#[test]
fn run_sizes_the_dummy_on_the_label_rank() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(2));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            width: 20.0,
            height: 10.0,
            label_rank: Some(1),
            ..Default::default()
        },
    );
    normalize::run(&mut g).unwrap();

    let dummy = g.node(&chain_head(&g)).unwrap();
    assert_eq!((dummy.width, dummy.height), (20.0, 10.0));
    assert!(dummy.labelpos().is_some());
}

#[test]
fn run_preserves_edge_names() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(2));
    g.set_edge_named("a", "b", Some("foo"), Some(EdgeLabel::default()))
        .unwrap();
    normalize::run(&mut g).unwrap();

    let dummy = chain_head(&g);
    assert!(g.has_edge("a", &dummy, Some("foo")));
    assert!(g.has_edge(&dummy, "b", Some("foo")));
}

#[test]
fn undo_restores_the_edge_with_points() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_named("a", "b", Some("foo"), Some(EdgeLabel::default()))
        .unwrap();
    normalize::run(&mut g).unwrap();

    let head = chain_head(&g);
    let second = g.successors(&head)[0].to_string();
    for (v, (x, y)) in [(&head, (5.0, 10.0)), (&second, (7.0, 20.0))] {
        let node = g.node_mut(v).unwrap();
        node.x = Some(x);
        node.y = Some(y);
    }
    normalize::undo(&mut g).unwrap();

    assert_eq!(g.node_count(), 2);
    let label = g.edge("a", "b", Some("foo")).unwrap();
    assert_eq!(
        label.points,
        vec![Point::new(5.0, 10.0), Point::new(7.0, 20.0)]
    );
    assert!(label.x.is_none());
    assert!(g.graph().dummy_chains.is_empty());
}

#[test]
fn undo_moves_the_label_dummy_position_onto_the_edge() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(2));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            width: 20.0,
            height: 10.0,
            label_rank: Some(1),
            ..Default::default()
        },
    );
    normalize::run(&mut g).unwrap();

    let head = chain_head(&g);
    let node = g.node_mut(&head).unwrap();
    node.x = Some(50.0);
    node.y = Some(60.0);
    node.width = 30.0;
    normalize::undo(&mut g).unwrap();

    let label = g.edge("a", "b", None).unwrap();
    assert_eq!((label.x, label.y), (Some(50.0), Some(60.0)));
    assert_eq!((label.width, label.height), (30.0, 10.0));
    assert_eq!(label.points, vec![Point::new(50.0, 60.0)]);
}
