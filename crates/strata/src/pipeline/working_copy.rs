use crate::graphlib::GraphOptions;
use crate::{EdgeLabel, LayoutGraph, NodeLabel, Result};

/// Fresh multigraph copy of `input` holding only the attributes that influence layout.
pub(super) fn build_layout_graph(input: &LayoutGraph) -> Result<LayoutGraph> {
    let mut g = LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_graph(input.graph().settings());

    input.for_each_node(|v, node| {
        g.set_node(v, NodeLabel::new(node.width, node.height));
    });
    for v in input.nodes() {
        if let Some(parent) = input.parent(v) {
            g.set_parent(v, parent)?;
        }
    }

    for e in input.edges() {
        let Some(label) = input.edge_by_key(e) else {
            continue;
        };
        g.set_edge_key(
            e.clone(),
            EdgeLabel {
                width: label.width,
                height: label.height,
                labelpos: label.labelpos,
                labeloffset: label.labeloffset,
                minlen: label.minlen,
                weight: label.weight,
                ..Default::default()
            },
        )?;
    }
    Ok(g)
}

/// Copies the results of a finished run back onto the caller's graph.
pub(super) fn update_input_graph(input: &mut LayoutGraph, layout: &LayoutGraph) {
    input.for_each_node_mut(|v, node| {
        let Some(laid_out) = layout.node(v) else {
            return;
        };
        node.x = laid_out.x;
        node.y = laid_out.y;
        node.rank = laid_out.rank;
        if layout.has_children(v) {
            node.width = laid_out.width;
            node.height = laid_out.height;
        }
    });

    input.for_each_edge_mut(|e, edge| {
        let Some(laid_out) = layout.edge_by_key(e) else {
            return;
        };
        edge.points = laid_out.points.clone();
        if edge.has_label() && laid_out.x.is_some() {
            edge.x = laid_out.x;
            edge.y = laid_out.y;
            edge.width = laid_out.width;
            edge.height = laid_out.height;
        }
    });

    let graph = input.graph_mut();
    graph.width = layout.graph().width;
    graph.height = layout.graph().height;
}
