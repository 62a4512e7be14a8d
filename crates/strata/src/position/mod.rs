//! Coordinate assignment for the ordered, normalized graph.
//!
//! Subgraph nodes are ignored here; they are sized from their border nodes afterwards.

pub mod bk;

use crate::util::{as_non_compound_graph, build_layer_matrix};
use crate::{LayoutGraph, Result};
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "position")]
pub fn position(g: &mut LayoutGraph) -> Result<()> {
    let view = as_non_compound_graph(g)?;
    let ys = position_y(&view);
    let xs = bk::position_x(&view);
    debug!(nodes = xs.len(), "coordinates assigned");

    for (v, y) in ys {
        if let Some(node) = g.node_mut(&v) {
            node.y = Some(y);
        }
    }
    for (v, x) in xs {
        if let Some(node) = g.node_mut(&v) {
            node.x = Some(x);
        }
    }
    Ok(())
}

/// Stacks the ranks `ranksep` apart. Nodes are centered vertically on their rank, whose height is
/// that of its tallest node.
pub fn position_y(g: &LayoutGraph) -> HashMap<String, f64> {
    let rank_sep = g.graph().ranksep;
    let mut ys: HashMap<String, f64> = HashMap::default();
    let mut prev_y = 0.0;
    for layer in build_layer_matrix(g) {
        let max_height = layer
            .iter()
            .filter_map(|v| g.node(v))
            .fold(0.0_f64, |acc, n| acc.max(n.height));
        for v in layer {
            ys.insert(v, prev_y + max_height / 2.0);
        }
        prev_y += max_height + rank_sep;
    }
    ys
}
