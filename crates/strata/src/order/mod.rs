//! Crossing minimization.
//!
//! Orders the nodes of every rank so that few edges cross. After a depth-first initial order,
//! the ranks are swept alternately downwards and upwards; each sweep re-sorts a rank by the
//! barycenters of its neighbours on the rank just fixed. Subgraphs move as blocks and keep their
//! left-to-right order consistent across ranks. The best ordering seen wins, and the search stops
//! after four sweeps without improvement.

mod barycenter;
mod constraints;
mod cross_count;
mod init_order;
mod layer_graph;
mod resolve_conflicts;
mod sort;
mod types;

pub use barycenter::{barycenter, merge_barycenters};
pub use constraints::add_subgraph_constraints;
pub use cross_count::cross_count;
pub use init_order::init_order;
pub use layer_graph::{build_layer_graph, nodes_by_rank, sync_orders};
pub use resolve_conflicts::resolve_conflicts;
pub use sort::{sort, sort_subgraph};
pub use types::{
    BarycenterEntry, ConstraintGraph, LayerGraph, LayerGraphLabel, LayerNode, Relationship,
    SortEntry, SortResult, WeightLabel,
};

use crate::graphlib::GraphOptions;
use crate::util::{build_layer_matrix, max_rank};
use crate::{LayoutGraph, Result};
use tracing::{debug, instrument, trace};

/// Sweeps that fail to beat the best crossing count before the search gives up.
const MAX_STALE_SWEEPS: usize = 4;

#[instrument(skip_all, name = "order")]
pub fn order(g: &mut LayoutGraph) -> Result<()> {
    let Some(max_rank) = max_rank(g) else {
        return Ok(());
    };
    let buckets = nodes_by_rank(g);
    let layer_graphs = |ranks: Vec<i32>, relationship: Relationship| -> Result<Vec<LayerGraph>> {
        ranks
            .into_iter()
            .map(|rank| {
                let nodes = usize::try_from(rank)
                    .ok()
                    .and_then(|r| buckets.get(r))
                    .map_or(&[][..], Vec::as_slice);
                build_layer_graph(g, rank, relationship, nodes)
            })
            .collect()
    };
    let mut down = layer_graphs((1..=max_rank).collect(), Relationship::InEdges)?;
    let mut up = layer_graphs((0..max_rank).rev().collect(), Relationship::OutEdges)?;

    let mut best = init_order(g);
    assign_order(g, &best);

    let mut best_cc = f64::INFINITY;
    let mut sweep = 0usize;
    let mut stale = 0usize;
    while stale < MAX_STALE_SWEEPS {
        let layer_graphs = if sweep % 2 == 0 { &mut down } else { &mut up };
        sweep_layer_graphs(g, layer_graphs, sweep % 4 >= 2);

        let layering = build_layer_matrix(g);
        let cc = cross_count(g, &layering);
        trace!(sweep, crossings = cc, "sweep done");
        if cc < best_cc {
            stale = 0;
            best = layering;
            best_cc = cc;
        }
        sweep += 1;
        stale += 1;
    }

    assign_order(g, &best);
    debug!(sweeps = sweep, crossings = best_cc, "order assigned");
    Ok(())
}

fn sweep_layer_graphs(g: &mut LayoutGraph, layer_graphs: &mut [LayerGraph], bias_right: bool) {
    let mut cg = ConstraintGraph::new(GraphOptions::default());
    for lg in layer_graphs.iter_mut() {
        sync_orders(lg, g);
        let root = lg.graph().root.clone();
        let sorted = sort_subgraph(lg, &root, &cg, bias_right);
        for (i, v) in sorted.vs.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
        add_subgraph_constraints(lg, &mut cg, &sorted.vs);
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}
