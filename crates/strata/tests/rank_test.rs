use strata::graphlib::{EdgeKey, GraphOptions};
use strata::rank::network_simplex::{calc_cut_value, init_low_lim_values, leave_edge};
use strata::rank::tree::{TreeEdgeLabel, TreeNodeLabel, new_tree};
use strata::rank::{feasible_tree, longest_path, rank, slack};
use strata::{EdgeLabel, LayoutGraph, NodeLabel, Ranker};

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        ..Default::default()
    }
}

fn with_minlen(minlen: usize) -> EdgeLabel {
    EdgeLabel {
        minlen,
        ..Default::default()
    }
}

fn rank_of(g: &LayoutGraph, v: &str) -> i32 {
    g.node(v).and_then(|n| n.rank).unwrap()
}

/// a -> b -> c -> d -> h, a -> e -> g -> h, a -> f -> g
fn gansner_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);
    g
}

const RANKERS: [Ranker; 3] = [Ranker::LongestPath, Ranker::TightTree, Ranker::NetworkSimplex];

#[test]
fn every_ranker_respects_minlen() {
    for ranker in RANKERS {
        let mut g = gansner_graph();
        g.set_edge_with_label("b", "g", with_minlen(3));
        g.graph_mut().ranker = ranker;
        rank(&mut g);

        for e in g.edge_keys() {
            let minlen = g.edge_by_key(&e).unwrap().minlen as i32;
            assert!(
                rank_of(&g, &e.w) - rank_of(&g, &e.v) >= minlen,
                "{ranker:?} violates {e}"
            );
        }
    }
}

#[test]
fn every_ranker_handles_a_single_node() {
    for ranker in RANKERS {
        let mut g = LayoutGraph::new(GraphOptions::default());
        g.set_node("a", NodeLabel::default());
        g.graph_mut().ranker = ranker;
        rank(&mut g);
        assert!(g.node("a").unwrap().rank.is_some());
    }
}

#[test]
fn longest_path_puts_sinks_on_rank_zero() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    g.set_edge_with_label("a", "d", with_minlen(2));
    longest_path(&mut g);

    assert_eq!(rank_of(&g, "c"), 0);
    assert_eq!(rank_of(&g, "d"), 0);
    assert_eq!(rank_of(&g, "b"), -1);
    assert_eq!(rank_of(&g, "a"), -2);
}

#[test]
fn slack_is_the_extra_length_over_minlen() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_with_label("a", "b", with_minlen(2));
    assert_eq!(slack(&g, &EdgeKey::simple("a", "b")), 1);
}

#[test]
fn feasible_tree_covers_a_trivial_graph() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_edge("a", "b");

    let t = feasible_tree(&mut g);
    assert_eq!(rank_of(&g, "b"), rank_of(&g, "a") + 1);
    assert!(t.has_edge("a", "b", None));
    assert_eq!(t.node_count(), 2);
}

#[test]
fn feasible_tree_pulls_a_slack_node_up() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_node("c", ranked(2));
    g.set_node("d", ranked(2));
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "d");

    let t = feasible_tree(&mut g);
    assert_eq!(rank_of(&g, "b"), rank_of(&g, "a") + 1);
    assert_eq!(rank_of(&g, "c"), rank_of(&g, "b") + 1);
    assert_eq!(rank_of(&g, "d"), rank_of(&g, "a") + 1);
    assert_eq!(t.edge_count(), 3);
    assert!(t.has_edge("a", "d", None));
}

#[test]
fn feasible_tree_spans_a_disconnected_graph() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_node("c", ranked(0));
    g.set_edge("a", "b");

    let t = feasible_tree(&mut g);
    assert_eq!(t.node_count(), 3);
}

#[test]
fn network_simplex_finds_the_minimum_total_edge_length() {
    let mut g = gansner_graph();
    g.graph_mut().ranker = Ranker::NetworkSimplex;
    rank(&mut g);

    let a = rank_of(&g, "a");
    let expected = [
        ("b", 1),
        ("c", 2),
        ("d", 3),
        ("h", 4),
        ("e", 1),
        ("f", 1),
        ("g", 2),
    ];
    for (v, offset) in expected {
        assert_eq!(rank_of(&g, v) - a, offset, "rank of {v}");
    }
}

#[test]
fn network_simplex_honours_weights() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    g.set_edge_with_label(
        "a",
        "c",
        EdgeLabel {
            weight: 5.0,
            ..Default::default()
        },
    );
    g.set_edge("c", "d");
    g.set_edge_with_label("x", "d", with_minlen(4));
    g.graph_mut().ranker = Ranker::NetworkSimplex;
    rank(&mut g);

    assert_eq!(rank_of(&g, "c") - rank_of(&g, "a"), 2);
    assert_eq!(rank_of(&g, "d") - rank_of(&g, "x"), 4);
}

#[test]
fn init_low_lim_values_numbers_the_tree_in_postorder() {
    let mut t = new_tree();
    for v in ["a", "b", "c", "d"] {
        t.set_node(v, TreeNodeLabel::default());
    }
    t.set_edge("a", "b");
    t.set_edge("a", "c");
    t.set_edge("c", "d");
    init_low_lim_values(&mut t, Some("a"));

    let a = t.node("a").unwrap();
    let b = t.node("b").unwrap();
    let c = t.node("c").unwrap();
    let d = t.node("d").unwrap();
    assert_eq!((a.low, a.lim, a.parent.as_deref()), (1, 4, None));
    assert_eq!((b.low, b.lim, b.parent.as_deref()), (1, 1, Some("a")));
    assert_eq!((c.low, c.lim, c.parent.as_deref()), (2, 3, Some("a")));
    assert_eq!((d.low, d.lim, d.parent.as_deref()), (2, 2, Some("c")));
}

#[test]
fn calc_cut_value_counts_edges_crossing_the_cut() {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "c");

    let mut t = new_tree();
    t.set_edge("a", "b");
    t.set_edge("b", "c");
    init_low_lim_values(&mut t, Some("a"));

    assert_eq!(calc_cut_value(&t, &g, "c"), 2.0);
    t.edge_mut("b", "c", None).unwrap().cutvalue = 2.0;
    assert_eq!(calc_cut_value(&t, &g, "b"), 2.0);
}

#[test]
fn leave_edge_returns_a_tree_edge_with_negative_cut_value() {
    let mut t = new_tree();
    t.set_edge_with_label("a", "b", TreeEdgeLabel { cutvalue: 1.0 });
    t.set_edge_with_label("b", "c", TreeEdgeLabel { cutvalue: 0.0 });
    assert_eq!(leave_edge(&t), None);

    t.set_edge_with_label("b", "c", TreeEdgeLabel { cutvalue: -2.0 });
    assert_eq!(leave_edge(&t), Some(EdgeKey::simple("b", "c")));
}
