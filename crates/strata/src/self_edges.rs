//! Self-loop handling.
//!
//! Self loops take no part in ranking or ordering. They are parked on their node, come back as a
//! dummy node placed right after it once the order is known, and are finally drawn as a small
//! loop between the node's right side and that dummy.

use crate::util::{add_dummy_node, build_layer_matrix};
use crate::{Dummy, LayoutGraph, NodeLabel, Point, Result, SelfEdge};

pub fn remove_self_edges(g: &mut LayoutGraph) {
    let loops: Vec<_> = g.edges().filter(|e| e.is_self_loop()).cloned().collect();
    for edge in loops {
        let Some(label) = g.take_edge(&edge.v, &edge.w, edge.name.as_deref()) else {
            continue;
        };
        if let Some(node) = g.node_mut(&edge.v) {
            node.self_edges.push(SelfEdge { edge, label });
        }
    }
}

/// Adds one dummy per parked self loop directly to the right of its node, shifting the order of
/// everything behind it.
pub fn insert_self_edges(g: &mut LayoutGraph) {
    for layer in build_layer_matrix(g) {
        let mut shift = 0usize;
        for (i, v) in layer.iter().enumerate() {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            node.order = Some(i + shift);
            let rank = node.rank;
            let loops = std::mem::take(&mut node.self_edges);

            for self_edge in loops {
                shift += 1;
                add_dummy_node(
                    g,
                    "_se",
                    NodeLabel {
                        width: self_edge.label.width,
                        height: self_edge.label.height,
                        rank,
                        order: Some(i + shift),
                        dummy: Some(Dummy::SelfEdge {
                            edge: self_edge.edge,
                            label: Box::new(self_edge.label),
                        }),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

/// Turns each self-loop dummy back into its edge, routed through five points around the dummy's
/// position. The dummy position becomes the label position.
pub fn position_self_edges(g: &mut LayoutGraph) -> Result<()> {
    let dummies: Vec<String> = g
        .node_ids()
        .into_iter()
        .filter(|v| {
            g.node(v)
                .is_some_and(|n| matches!(n.dummy, Some(Dummy::SelfEdge { .. })))
        })
        .collect();

    for v in dummies {
        let Some(node) = g.node_mut(&v) else {
            continue;
        };
        let (dummy_x, dummy_y) = (node.x.unwrap_or(0.0), node.y.unwrap_or(0.0));
        let Some(Dummy::SelfEdge { edge, label }) = node.dummy.take() else {
            continue;
        };
        let mut label = *label;

        if let Some(owner) = g.node(&edge.v) {
            let x = owner.x.unwrap_or(0.0) + owner.width / 2.0;
            let y = owner.y.unwrap_or(0.0);
            let dx = dummy_x - x;
            let dy = owner.height / 2.0;
            label.points = vec![
                Point::new(x + 2.0 * dx / 3.0, y - dy),
                Point::new(x + 5.0 * dx / 6.0, y - dy),
                Point::new(x + dx, y),
                Point::new(x + 5.0 * dx / 6.0, y + dy),
                Point::new(x + 2.0 * dx / 3.0, y + dy),
            ];
        }
        label.x = Some(dummy_x);
        label.y = Some(dummy_y);

        g.remove_node(&v);
        g.set_edge_key(edge, label)?;
    }
    Ok(())
}
