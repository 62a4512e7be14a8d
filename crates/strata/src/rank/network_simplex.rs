//! Network simplex ranker.
//!
//! Minimizes the total weighted edge length `sum(weight * (rank(w) - rank(v)))` subject to
//! `rank(w) - rank(v) >= minlen`. Starting from a tight spanning tree, tree edges with a negative
//! cut value are swapped for the least-slack non-tree edge that reconnects the tree, until every
//! cut value is non-negative.

use super::feasible_tree::feasible_tree;
use super::tree::{Tree, TreeEdgeLabel};
use super::util::{longest_path, slack};
use crate::graphlib::{EdgeKey, alg};
use crate::LayoutGraph;
use crate::util::simplify;
use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, trace};

pub fn network_simplex(g: &mut LayoutGraph) {
    let mut simplified = simplify(g);
    run(&mut simplified);

    simplified.for_each_node(|v, label| {
        if let Some(node) = g.node_mut(v) {
            node.rank = label.rank;
        }
    });
}

/// Runs the simplex loop on a graph without parallel edges.
fn run(g: &mut LayoutGraph) {
    longest_path(g);
    let mut t = feasible_tree(g);
    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, g);

    let mut iterations = 0usize;
    while let Some(e) = leave_edge(&t) {
        let Some(f) = enter_edge(&t, g, &e) else {
            break;
        };
        trace!(leave = %e, enter = %f, "exchanging tree edges");
        exchange_edges(&mut t, g, &e, &f);
        iterations += 1;
    }
    debug!(iterations, nodes = g.node_count(), "network simplex converged");
}

/// Numbers the tree in postorder from `root` (the first tree node by default) and records each
/// node's tree parent. Nodes the root cannot reach start trees of their own.
pub fn init_low_lim_values(t: &mut Tree, root: Option<&str>) {
    struct Frame {
        v: String,
        parent: Option<String>,
        neighbors: Vec<String>,
        cursor: usize,
        low: i32,
    }

    let roots: Vec<String> = root
        .map(str::to_string)
        .into_iter()
        .chain(t.node_ids())
        .collect();
    let mut visited: HashSet<String> = HashSet::default();
    let mut next_lim: i32 = 1;

    for root in roots {
        if !visited.insert(root.clone()) {
            continue;
        }
        let neighbors = t.neighbors(&root).into_iter().map(str::to_string).collect();
        let mut stack = vec![Frame {
            v: root,
            parent: None,
            neighbors,
            cursor: 0,
            low: next_lim,
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(w) = frame.neighbors.get(frame.cursor).cloned() {
                frame.cursor += 1;
                if !visited.insert(w.clone()) {
                    continue;
                }
                let parent = Some(frame.v.clone());
                let neighbors = t.neighbors(&w).into_iter().map(str::to_string).collect();
                stack.push(Frame {
                    v: w,
                    parent,
                    neighbors,
                    cursor: 0,
                    low: next_lim,
                });
                continue;
            }

            let Some(frame) = stack.pop() else {
                break;
            };
            if let Some(label) = t.node_mut(&frame.v) {
                label.low = frame.low;
                label.lim = next_lim;
                label.parent = frame.parent;
            }
            next_lim += 1;
        }
    }
}

/// Computes the cut value of every tree edge, children before parents.
pub fn init_cut_values(t: &mut Tree, g: &LayoutGraph) {
    let roots: Vec<String> = t.node_ids();
    let roots: Vec<&str> = roots.iter().map(String::as_str).collect();
    let mut vs = alg::postorder(t, &roots);
    vs.pop();
    for v in vs {
        assign_cut_value(t, g, &v);
    }
}

fn assign_cut_value(t: &mut Tree, g: &LayoutGraph, child: &str) {
    let Some(parent) = t.node(child).and_then(|n| n.parent.clone()) else {
        return;
    };
    let cutvalue = calc_cut_value(t, g, child);
    if let Some(label) = t.edge_mut(child, &parent, None) {
        label.cutvalue = cutvalue;
    }
}

/// Cut value of the tree edge between `child` and its tree parent, derived from the edges
/// incident on `child` and the cut values already known for its own tree children.
pub fn calc_cut_value(t: &Tree, g: &LayoutGraph, child: &str) -> f64 {
    let Some(parent) = t.node(child).and_then(|n| n.parent.as_deref()) else {
        return 0.0;
    };

    let (child_is_tail, graph_edge) = match g.edge(child, parent, None) {
        Some(label) => (true, label),
        None => match g.edge(parent, child, None) {
            Some(label) => (false, label),
            None => return 0.0,
        },
    };

    let mut cut_value = graph_edge.weight;
    g.for_each_in_edge(child, None, |e, label| {
        cut_value += cut_contribution(t, child, parent, child_is_tail, e, label.weight);
    });
    g.for_each_out_edge(child, None, |e, label| {
        cut_value += cut_contribution(t, child, parent, child_is_tail, e, label.weight);
    });
    cut_value
}

fn cut_contribution(
    t: &Tree,
    child: &str,
    parent: &str,
    child_is_tail: bool,
    e: &EdgeKey,
    weight: f64,
) -> f64 {
    let is_out_edge = e.v == child;
    let other = if is_out_edge { &e.w } else { &e.v };
    if other == parent {
        return 0.0;
    }

    let points_to_head = is_out_edge == child_is_tail;
    let mut contribution = if points_to_head { weight } else { -weight };
    if let Some(tree_edge) = t.edge(child, other, None) {
        contribution += if points_to_head {
            -tree_edge.cutvalue
        } else {
            tree_edge.cutvalue
        };
    }
    contribution
}

/// First tree edge with a negative cut value.
pub fn leave_edge(t: &Tree) -> Option<EdgeKey> {
    t.edges()
        .find(|e| t.edge_by_key(e).is_some_and(|label| label.cutvalue < 0.0))
        .cloned()
}

/// Least-slack graph edge that crosses the cut created by removing the tree edge `edge`, in the
/// direction that keeps the ranking feasible.
pub fn enter_edge(t: &Tree, g: &LayoutGraph, edge: &EdgeKey) -> Option<EdgeKey> {
    let (v, w) = if g.has_edge(&edge.v, &edge.w, None) {
        (edge.v.as_str(), edge.w.as_str())
    } else {
        (edge.w.as_str(), edge.v.as_str())
    };

    let v_label = t.node(v)?;
    let w_label = t.node(w)?;
    let (tail_label, flip) = if v_label.lim > w_label.lim {
        (w_label, true)
    } else {
        (v_label, false)
    };
    let is_descendant = |x: &str| {
        t.node(x)
            .is_some_and(|n| tail_label.low <= n.lim && n.lim <= tail_label.lim)
    };

    let mut best: Option<(i32, &EdgeKey)> = None;
    for e in g.edges() {
        if flip != is_descendant(e.v.as_str()) || flip == is_descendant(e.w.as_str()) {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(best_slack, _)| s < best_slack) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e.clone())
}

pub fn exchange_edges(t: &mut Tree, g: &mut LayoutGraph, e: &EdgeKey, f: &EdgeKey) {
    t.remove_edge(&e.v, &e.w, None);
    t.set_edge_with_label(f.v.clone(), f.w.clone(), TreeEdgeLabel::default());
    init_low_lim_values(t, None);
    init_cut_values(t, g);
    update_ranks(t, g);
}

/// Re-derives ranks from the tree roots outwards so every tree edge is tight again.
fn update_ranks(t: &Tree, g: &mut LayoutGraph) {
    let roots: Vec<&str> = t
        .nodes()
        .filter(|v| t.node(v).is_some_and(|n| n.parent.is_none()))
        .collect();
    for v in alg::preorder(t, &roots) {
        let Some(parent) = t.node(&v).and_then(|n| n.parent.as_deref()) else {
            continue;
        };
        let delta = match g.edge(&v, parent, None) {
            Some(label) => -(label.minlen as i32),
            None => match g.edge(parent, &v, None) {
                Some(label) => label.minlen as i32,
                None => continue,
            },
        };
        let Some(parent_rank) = g.node(parent).and_then(|n| n.rank) else {
            continue;
        };
        if let Some(label) = g.node_mut(&v) {
            label.rank = Some(parent_rank + delta);
        }
    }
}
