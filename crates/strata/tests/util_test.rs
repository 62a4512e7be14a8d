use strata::graphlib::GraphOptions;
use strata::util::{
    Rect, add_dummy_node, as_non_compound_graph, build_layer_matrix, intersect_rect,
    normalize_ranks, remove_empty_ranks, simplify,
};
use strata::{EdgeLabel, Error, LayoutGraph, NodeLabel, Point};

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        ..Default::default()
    }
}

fn rank_of(g: &LayoutGraph, v: &str) -> i32 {
    g.node(v).and_then(|n| n.rank).unwrap()
}

fn rect() -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 20.0,
    }
}

#[test]
fn intersect_rect_hits_each_side() {
    let cases = [
        (Point::new(100.0, 0.0), Point::new(5.0, 0.0)),
        (Point::new(-100.0, 0.0), Point::new(-5.0, 0.0)),
        (Point::new(0.0, 100.0), Point::new(0.0, 10.0)),
        (Point::new(0.0, -100.0), Point::new(0.0, -10.0)),
        (Point::new(10.0, 10.0), Point::new(5.0, 5.0)),
        (Point::new(5.0, 40.0), Point::new(1.25, 10.0)),
    ];
    for (target, expected) in cases {
        assert_eq!(intersect_rect(rect(), target).unwrap(), expected, "towards {target:?}");
    }
}

#[test]
fn intersect_rect_rejects_the_center() {
    let err = intersect_rect(rect(), Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, Error::IntersectAtCenter { .. }));
}

#[test]
fn intersect_rect_stays_finite_for_a_degenerate_rect() {
    let flat = Rect {
        width: 0.0,
        height: 0.0,
        ..rect()
    };
    let p = intersect_rect(flat, Point::new(0.0, 50.0)).unwrap();
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn simplify_merges_parallel_edges() {
    let mut g = LayoutGraph::new(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    for (name, weight, minlen) in [("x", 2.0, 1), ("y", 3.0, 4)] {
        g.set_edge_named(
            "a",
            "b",
            Some(name),
            Some(EdgeLabel {
                weight,
                minlen,
                ..Default::default()
            }),
        )
        .unwrap();
    }
    let simplified = simplify(&g);
    assert!(!simplified.is_multigraph());
    assert_eq!(simplified.edge_count(), 1);
    let label = simplified.edge("a", "b", None).unwrap();
    assert_eq!((label.weight, label.minlen), (5.0, 4));
}

#[test]
fn as_non_compound_graph_drops_subgraph_nodes() {
    let mut g = LayoutGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    g.set_parent("a", "sg1").unwrap();
    g.set_edge("a", "b");
    let flat = as_non_compound_graph(&g).unwrap();

    assert!(!flat.is_compound());
    assert!(!flat.has_node("sg1"));
    assert!(flat.has_edge("a", "b", None));
}

#[test]
fn as_non_compound_graph_keeps_named_parallel_edges() {
    let mut g = LayoutGraph::new(GraphOptions {
        compound: true,
        multigraph: true,
        ..Default::default()
    });
    g.set_parent("a", "sg1").unwrap();
    for (name, weight) in [("x", 2.0), ("y", 3.0)] {
        let label = EdgeLabel {
            weight,
            ..Default::default()
        };
        g.set_edge_named("a", "b", Some(name), Some(label)).unwrap();
    }
    let flat = as_non_compound_graph(&g).unwrap();

    assert_eq!(flat.edge_count(), 2);
    assert_eq!(flat.edge("a", "b", Some("x")).unwrap().weight, 2.0);
    assert_eq!(flat.edge("a", "b", Some("y")).unwrap().weight, 3.0);
}

#[test]
fn add_dummy_node_picks_an_unused_id() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("_d1", NodeLabel::default());
    let v = add_dummy_node(&mut g, "_d", ranked(3));
    assert_ne!(v, "_d1");
    assert!(v.starts_with("_d"));
    assert_eq!(rank_of(&g, &v), 3);
}

#[test]
fn build_layer_matrix_groups_by_rank_and_order() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    for (v, rank, order) in [("a", 0, 1), ("b", 0, 0), ("c", 1, 0), ("d", 2, 0)] {
        g.set_node(
            v,
            NodeLabel {
                order: Some(order),
                ..ranked(rank)
            },
        );
    }
    assert_eq!(
        build_layer_matrix(&g),
        vec![vec!["b", "a"], vec!["c"], vec!["d"]]
    );
}

#[test]
fn normalize_ranks_shifts_the_minimum_to_zero() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("a", ranked(3));
    g.set_node("b", ranked(2));
    g.set_node("c", ranked(4));
    normalize_ranks(&mut g);
    assert_eq!(
        [rank_of(&g, "a"), rank_of(&g, "b"), rank_of(&g, "c")],
        [1, 0, 2]
    );
}

#[test]
fn remove_empty_ranks_drops_unused_border_ranks() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.graph_mut().node_rank_factor = Some(4);
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(4));
    remove_empty_ranks(&mut g);
    assert_eq!((rank_of(&g, "a"), rank_of(&g, "b")), (0, 1));
}

#[test]
fn remove_empty_ranks_keeps_ranks_on_the_factor() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.graph_mut().node_rank_factor = Some(4);
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(8));
    remove_empty_ranks(&mut g);
    assert_eq!((rank_of(&g, "a"), rank_of(&g, "b")), (0, 2));
}
