//! Splits long edges into chains of unit-length segments.
//!
//! After [`run`] every edge spans exactly one rank. Each intermediate rank gets a zero-sized dummy
//! node, except the edge's `label_rank`, whose dummy is sized to hold the label. The first dummy
//! of every chain keeps the original edge label and is recorded in `GraphLabel::dummy_chains`.
//! [`undo`] walks the chains back, turning dummy positions into edge points.

use crate::graphlib::EdgeKey;
use crate::util::add_dummy_node;
use crate::{Dummy, EdgeLabel, Error, LayoutGraph, NodeLabel, Point, Result};
use tracing::{debug, instrument};

#[instrument(skip_all, name = "normalize")]
pub fn run(g: &mut LayoutGraph) -> Result<()> {
    g.graph_mut().dummy_chains.clear();
    for e in g.edge_keys() {
        normalize_edge(g, e)?;
    }
    debug!(chains = g.graph().dummy_chains.len(), "long edges split");
    Ok(())
}

fn normalize_edge(g: &mut LayoutGraph, e: EdgeKey) -> Result<()> {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    if w_rank <= v_rank + 1 {
        return Ok(());
    }
    let Some(mut original) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
        return Ok(());
    };
    original.points.clear();
    let weight = original.weight;
    let label_rank = original.label_rank;
    let (label_width, label_height) = (original.width, original.height);
    let labelpos = original.labelpos;

    let mut original = Some(Box::new(original));
    let mut v = e.v.clone();
    for rank in v_rank + 1..w_rank {
        let head_label = original.take();
        let dummy = if label_rank == Some(rank) {
            NodeLabel {
                width: label_width,
                height: label_height,
                rank: Some(rank),
                dummy: Some(Dummy::EdgeLabel {
                    edge: e.clone(),
                    original: head_label,
                    labelpos,
                }),
                ..Default::default()
            }
        } else {
            NodeLabel {
                rank: Some(rank),
                dummy: Some(Dummy::Edge {
                    edge: e.clone(),
                    original: head_label,
                }),
                ..Default::default()
            }
        };
        let id = add_dummy_node(g, "_d", dummy);

        g.set_edge_named(
            v.clone(),
            id.clone(),
            e.name.clone(),
            Some(EdgeLabel {
                weight,
                ..Default::default()
            }),
        )?;
        if rank == v_rank + 1 {
            g.graph_mut().dummy_chains.push(id.clone());
        }
        v = id;
    }
    g.set_edge_named(
        v,
        e.w.clone(),
        e.name.clone(),
        Some(EdgeLabel {
            weight,
            ..Default::default()
        }),
    )?;
    Ok(())
}

/// Restores every split edge. Dummy coordinates become the edge's points; the label dummy also
/// hands over its position and size.
#[instrument(skip_all, name = "normalize_undo")]
pub fn undo(g: &mut LayoutGraph) -> Result<()> {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for head in chains {
        let Some(node) = g.node_mut(&head) else {
            continue;
        };
        let (edge, original) = match node.dummy.as_mut() {
            Some(Dummy::Edge { edge, original } | Dummy::EdgeLabel { edge, original, .. }) => {
                (edge.clone(), original.take())
            }
            _ => {
                return Err(Error::MissingBackReference {
                    node: head,
                    expected: "chain edge",
                });
            }
        };
        let Some(mut original) = original else {
            return Err(Error::MissingBackReference {
                node: head,
                expected: "original edge label",
            });
        };

        let mut v = head;
        loop {
            let Some(node) = g.node(&v) else {
                break;
            };
            if node.dummy.as_ref().and_then(Dummy::chain_edge).is_none() {
                break;
            }
            let x = node.x.unwrap_or(0.0);
            let y = node.y.unwrap_or(0.0);
            original.points.push(Point::new(x, y));
            if node.labelpos().is_some() {
                original.x = Some(x);
                original.y = Some(y);
                original.width = node.width;
                original.height = node.height;
            }
            let next = g.successors(&v).first().map(|w| w.to_string());
            g.remove_node(&v);
            match next {
                Some(w) => v = w,
                None => break,
            }
        }

        g.set_edge_key(edge, *original)?;
    }
    Ok(())
}
