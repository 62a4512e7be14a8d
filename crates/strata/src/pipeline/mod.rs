//! The layout pipeline.
//!
//! [`layout`] copies the caller's graph into a working graph, runs every stage on the copy and
//! writes positions, ranks, subgraph sizes and edge routes back. Each stage's output is the next
//! stage's input; the order below is load-bearing.

mod compound;
mod edge_labels;
mod geometry;
mod working_copy;

use crate::rank::rank;
use crate::util::{as_non_compound_graph, normalize_ranks, remove_empty_ranks};
use crate::{
    LayoutGraph, Result, acyclic, border_segments, coordinate_system, nesting_graph, normalize,
    order, parent_dummy_chains, position, self_edges,
};
use tracing::{debug, instrument};

/// Lays out `g` in place.
///
/// Nodes receive `x`, `y` (their center) and `rank`; subgraph nodes also receive the `width` and
/// `height` enclosing their members. Edges receive their route in `points` and, when they carry
/// a label, the label's center. The graph label receives the overall width and height.
///
/// `g` is only written once every stage has succeeded; on error it is left untouched.
#[instrument(skip_all, name = "layout", fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn layout(g: &mut LayoutGraph) -> Result<()> {
    let mut layout_graph = working_copy::build_layout_graph(g)?;
    run_layout(&mut layout_graph)?;
    working_copy::update_input_graph(g, &layout_graph);
    debug!(
        width = g.graph().width,
        height = g.graph().height,
        "layout complete"
    );
    Ok(())
}

fn run_layout(g: &mut LayoutGraph) -> Result<()> {
    edge_labels::make_space_for_edge_labels(g);
    self_edges::remove_self_edges(g);
    acyclic::run(g)?;
    nesting_graph::run(g)?;
    rank_leaves(g)?;
    edge_labels::inject_edge_label_proxies(g);
    remove_empty_ranks(g);
    nesting_graph::cleanup(g);
    normalize_ranks(g);
    compound::assign_rank_min_max(g);
    edge_labels::remove_edge_label_proxies(g)?;
    normalize::run(g)?;
    parent_dummy_chains::run(g)?;
    border_segments::add_border_segments(g)?;
    order::order(g)?;
    self_edges::insert_self_edges(g);
    coordinate_system::adjust(g);
    position::position(g)?;
    self_edges::position_self_edges(g)?;
    compound::remove_border_nodes(g)?;
    normalize::undo(g)?;
    edge_labels::fixup_edge_label_coords(g);
    coordinate_system::undo(g);
    geometry::translate_graph(g);
    geometry::assign_node_intersects(g)?;
    geometry::reverse_points_for_reversed_edges(g);
    acyclic::undo(g)?;
    Ok(())
}

/// Ranks the leaves of `g`. Subgraph nodes take no part; their span is derived from their
/// border nodes later.
fn rank_leaves(g: &mut LayoutGraph) -> Result<()> {
    let mut leaves = as_non_compound_graph(g)?;
    rank(&mut leaves);
    leaves.for_each_node(|v, ranked| {
        if let Some(node) = g.node_mut(v) {
            node.rank = ranked.rank;
        }
    });
    Ok(())
}
