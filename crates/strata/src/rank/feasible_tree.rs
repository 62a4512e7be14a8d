//! Tight spanning tree construction.
//!
//! Starting from a feasible ranking, grows an undirected tree of zero-slack edges. While the tree
//! does not span the graph, the boundary edge with the least slack is made tight by shifting the
//! whole tree towards it.

use super::tree::{Tree, TreeEdgeLabel, TreeNodeLabel, new_tree};
use super::util::slack;
use crate::graphlib::EdgeKey;
use crate::LayoutGraph;
use tracing::trace;

pub fn feasible_tree(g: &mut LayoutGraph) -> Tree {
    let mut t = new_tree();
    let Some(start) = g.nodes().next().map(str::to_string) else {
        return t;
    };
    let size = g.node_count();
    t.set_node(start, TreeNodeLabel::default());

    while tight_tree(&mut t, g) < size {
        match find_min_slack_edge(&t, g) {
            Some(e) => {
                let delta = if t.has_node(&e.v) {
                    slack(g, &e)
                } else {
                    -slack(g, &e)
                };
                trace!(edge = %e, delta, "tightening boundary edge");
                shift_ranks(&t, g, delta);
            }
            None => {
                // No edge leaves the tree: the graph is disconnected, so continue the forest
                // from the first node not covered yet.
                let Some(next) = g.nodes().find(|v| !t.has_node(v)).map(str::to_string) else {
                    break;
                };
                t.set_node(next, TreeNodeLabel::default());
            }
        }
    }
    t
}

/// Extends `t` with every node reachable through tight edges. Returns the tree size.
fn tight_tree(t: &mut Tree, g: &LayoutGraph) -> usize {
    struct Frame {
        v: String,
        edges: Vec<EdgeKey>,
        cursor: usize,
    }

    for root in t.node_ids() {
        let edges = g.node_edges(&root, None);
        let mut stack = vec![Frame {
            v: root,
            edges,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(e) = frame.edges.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let w = if frame.v == e.v { &e.w } else { &e.v };
            if t.has_node(w) || slack(g, e) != 0 {
                continue;
            }
            let w = w.clone();
            t.set_node(w.clone(), TreeNodeLabel::default());
            t.set_edge_with_label(frame.v.clone(), w.clone(), TreeEdgeLabel::default());
            let edges = g.node_edges(&w, None);
            stack.push(Frame {
                v: w,
                edges,
                cursor: 0,
            });
        }
    }
    t.node_count()
}

fn find_min_slack_edge(t: &Tree, g: &LayoutGraph) -> Option<EdgeKey> {
    let mut best: Option<(i32, &EdgeKey)> = None;
    for e in g.edges() {
        if t.has_node(&e.v) == t.has_node(&e.w) {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(best_slack, _)| s < best_slack) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e.clone())
}

fn shift_ranks(t: &Tree, g: &mut LayoutGraph, delta: i32) {
    for v in t.nodes() {
        if let Some(rank) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
            *rank += delta;
        }
    }
}
