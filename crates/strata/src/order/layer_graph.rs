use super::types::{LayerGraph, LayerGraphLabel, LayerNode, Relationship, WeightLabel};
use crate::graphlib::GraphOptions;
use crate::{LayoutGraph, NodeLabel, Result};

/// Nodes that take part in each rank: leaves by `rank`, subgraphs on every rank of their span.
pub fn nodes_by_rank(g: &LayoutGraph) -> Vec<Vec<String>> {
    let mut buckets: Vec<Vec<String>> = Vec::new();
    let mut push = |rank: i32, v: &str| {
        let Ok(rank) = usize::try_from(rank) else {
            return;
        };
        if buckets.len() <= rank {
            buckets.resize_with(rank + 1, Vec::new);
        }
        buckets[rank].push(v.to_string());
    };
    g.for_each_node(|v, node| match (node.min_rank, node.max_rank) {
        (Some(min), Some(max)) => (min..=max).for_each(|r| push(r, v)),
        _ => {
            if let Some(rank) = node.rank {
                push(rank, v);
            }
        }
    });
    buckets
}

fn layer_node(node: &NodeLabel, rank: i32) -> LayerNode {
    if node.min_rank.is_some() {
        LayerNode {
            order: None,
            border_left: node.border_left_at(rank).map(str::to_string),
            border_right: node.border_right_at(rank).map(str::to_string),
        }
    } else {
        LayerNode {
            order: node.order,
            ..Default::default()
        }
    }
}

/// Builds the graph used to sort one rank.
///
/// It holds the rank's nodes with their subgraph hierarchy, parentless ones attached to a fresh
/// root recorded in the graph label. Neighbours on the adjacent rank picked by `relationship`
/// come along without hierarchy, and the edges to them always point into the rank. Parallel
/// edges collapse into one with the summed weight.
pub fn build_layer_graph(
    g: &LayoutGraph,
    rank: i32,
    relationship: Relationship,
    nodes: &[String],
) -> Result<LayerGraph> {
    let mut root = "_root".to_string();
    let mut suffix = 0usize;
    while g.has_node(&root) {
        suffix += 1;
        root = format!("_root{suffix}");
    }

    let mut lg = LayerGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    lg.set_graph(LayerGraphLabel { root: root.clone() });
    lg.set_node(root.clone(), LayerNode::default());

    for v in nodes {
        let Some(node) = g.node(v) else {
            continue;
        };
        lg.set_node(v.clone(), layer_node(node, rank));

        let parent = g.parent(v).unwrap_or(root.as_str());
        if !lg.has_node(parent) {
            let label = g.node(parent).map(|n| layer_node(n, rank)).unwrap_or_default();
            lg.set_node(parent, label);
        }
        lg.set_parent(v.clone(), parent)?;

        let edges = match relationship {
            Relationship::InEdges => g.in_edges(v, None),
            Relationship::OutEdges => g.out_edges(v, None),
        };
        for e in edges {
            let u = if e.v == *v { &e.w } else { &e.v };
            if !lg.has_node(u) {
                let label = g.node(u).map(|n| layer_node(n, rank)).unwrap_or_default();
                lg.set_node(u.clone(), label);
            }
            let weight = g.edge_by_key(&e).map_or(0.0, |l| l.weight)
                + lg.edge(u, v, None).map_or(0.0, |l| l.weight);
            lg.set_edge_with_label(u.clone(), v.clone(), WeightLabel { weight });
        }
    }
    Ok(lg)
}

/// Refreshes the orders of a layer graph's leaf nodes from `g`, which the sweeps update as
/// they go.
pub fn sync_orders(lg: &mut LayerGraph, g: &LayoutGraph) {
    lg.for_each_node_mut(|v, node| {
        if let Some(source) = g.node(v).filter(|n| n.min_rank.is_none()) {
            node.order = source.order;
        }
    });
}
