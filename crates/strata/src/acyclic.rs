//! Break cycles by reversing a feedback arc set (FAS).
//!
//! Reversed edges get a fresh `rev*` name and remember their original name in
//! `EdgeLabel::forward_name`, so [`undo`] can restore them exactly.

use crate::graphlib::EdgeKey;
use crate::{Acyclicer, EdgeLabel, LayoutGraph, Result};
use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "acyclic")]
pub fn run(g: &mut LayoutGraph) -> Result<()> {
    let fas = match g.graph().acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |label: &EdgeLabel| {
            if label.weight.is_finite() {
                label.weight.round() as i64
            } else {
                0
            }
        }),
        Acyclicer::DepthFirstSearch => dfs_fas(g),
    };
    debug!(edges = fas.len(), "reversing feedback arc set");

    for e in fas.into_iter().filter(|e| !e.is_self_loop()) {
        let Some(mut label) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
            continue;
        };
        label.forward_name = e.name;
        label.reversed = true;

        let mut name = g.graph_mut().next_id("rev");
        while g.has_edge(&e.w, &e.v, Some(&name)) {
            name = g.graph_mut().next_id("rev");
        }
        g.set_edge_named(e.w, e.v, Some(name), Some(label))?;
    }
    Ok(())
}

/// Restores every edge reversed by [`run`] to its original direction and name.
pub fn undo(g: &mut LayoutGraph) -> Result<()> {
    let reversed: Vec<EdgeKey> = g
        .edges()
        .filter(|e| g.edge_by_key(e).is_some_and(|label| label.reversed))
        .cloned()
        .collect();

    for e in reversed {
        let Some(mut label) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        g.set_edge_named(e.w, e.v, forward_name, Some(label))?;
    }
    Ok(())
}

/// Back edges found by a depth-first walk started from every node in insertion order.
pub fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeKey> {
    struct Frame {
        v: String,
        out: Vec<EdgeKey>,
        cursor: usize,
    }

    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut visited: HashSet<String> = HashSet::default();
    let mut on_stack: HashSet<String> = HashSet::default();

    for root in g.nodes() {
        if !visited.insert(root.to_string()) {
            continue;
        }
        on_stack.insert(root.to_string());
        let mut stack = vec![Frame {
            v: root.to_string(),
            out: g.out_edges(root, None),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(e) = frame.out.get(frame.cursor).cloned() else {
                on_stack.remove(&frame.v);
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            if e.is_self_loop() {
                continue;
            }
            if on_stack.contains(&e.w) {
                fas.push(e);
            } else if visited.insert(e.w.clone()) {
                on_stack.insert(e.w.clone());
                let out = g.out_edges(&e.w, None);
                stack.push(Frame {
                    v: e.w,
                    out,
                    cursor: 0,
                });
            }
        }
    }
    fas
}
