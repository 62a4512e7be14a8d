//! Edge label bookkeeping around ranking and positioning.
//!
//! Labels get a rank of their own: every edge is stretched to twice its length with half the
//! rank separation, and the label later sits on the middle rank of its edge.

use crate::util::add_dummy_node;
use crate::{Dummy, Error, LabelPos, LayoutGraph, NodeLabel, Result};

pub(super) fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let graph = g.graph_mut();
    graph.ranksep /= 2.0;
    let horizontal = graph.rankdir.is_horizontal();

    g.for_each_edge_mut(|_, edge| {
        edge.minlen *= 2;
        if edge.labelpos != LabelPos::Center {
            if horizontal {
                edge.height += edge.labeloffset;
            } else {
                edge.width += edge.labeloffset;
            }
        }
    });
}

/// Marks the middle rank of every labelled edge with a proxy node, so removing empty ranks
/// cannot take the label's rank away.
pub(super) fn inject_edge_label_proxies(g: &mut LayoutGraph) {
    let mut proxies: Vec<NodeLabel> = Vec::new();
    g.for_each_edge(|e, edge| {
        if !edge.has_label() {
            return;
        }
        let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
        let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
        proxies.push(NodeLabel {
            rank: Some((w_rank - v_rank) / 2 + v_rank),
            dummy: Some(Dummy::EdgeProxy { edge: e.clone() }),
            ..Default::default()
        });
    });
    for proxy in proxies {
        add_dummy_node(g, "_ep", proxy);
    }
}

/// Moves each proxy's final rank onto its edge as `label_rank` and drops the proxy.
pub(super) fn remove_edge_label_proxies(g: &mut LayoutGraph) -> Result<()> {
    let proxies: Vec<String> = g
        .node_ids()
        .into_iter()
        .filter(|v| {
            g.node(v)
                .is_some_and(|n| matches!(n.dummy, Some(Dummy::EdgeProxy { .. })))
        })
        .collect();

    for v in proxies {
        let Some(node) = g.node(&v) else {
            continue;
        };
        let rank = node.rank;
        let Some(Dummy::EdgeProxy { edge }) = node.dummy.clone() else {
            continue;
        };
        let Some(label) = g.edge_mut_by_key(&edge) else {
            return Err(Error::MissingBackReference {
                node: v,
                expected: "proxied edge",
            });
        };
        label.label_rank = rank;
        g.remove_node(&v);
    }
    Ok(())
}

/// Moves side labels off their edge by the label offset and takes the offset back out of the
/// label width.
pub(super) fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    g.for_each_edge_mut(|_, edge| {
        let Some(x) = edge.x else {
            return;
        };
        match edge.labelpos {
            LabelPos::Left => {
                edge.width -= edge.labeloffset;
                edge.x = Some(x - edge.width / 2.0 - edge.labeloffset);
            }
            LabelPos::Right => {
                edge.width -= edge.labeloffset;
                edge.x = Some(x + edge.width / 2.0 + edge.labeloffset);
            }
            LabelPos::Center => {}
        }
    });
}
