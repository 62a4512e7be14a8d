//! Helpers shared by several pipeline stages.

use crate::graphlib::{Graph, GraphOptions};
use crate::{EdgeLabel, Error, LayoutGraph, NodeLabel, Point, Result};
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn of(node: &NodeLabel) -> Self {
        Self {
            x: node.x.unwrap_or(0.0),
            y: node.y.unwrap_or(0.0),
            width: node.width,
            height: node.height,
        }
    }
}

/// Adds a synthetic node under a fresh id starting with `prefix`.
pub fn add_dummy_node(g: &mut LayoutGraph, prefix: &str, label: NodeLabel) -> String {
    let mut v = g.graph_mut().next_id(prefix);
    while g.has_node(&v) {
        v = g.graph_mut().next_id(prefix);
    }
    g.set_node(v.clone(), label);
    v
}

/// Collapses parallel edges into one edge per ordered node pair: weights add up and the
/// largest `minlen` wins.
pub fn simplify(g: &LayoutGraph) -> LayoutGraph {
    let mut simplified: LayoutGraph = Graph::new(GraphOptions::default());
    simplified.set_graph(g.graph().clone());
    for v in g.nodes() {
        if let Some(label) = g.node(v) {
            simplified.set_node(v, label.clone());
        }
    }

    g.for_each_edge(|e, label| {
        let (weight, minlen) = simplified
            .edge(&e.v, &e.w, None)
            .map(|prev| (prev.weight, prev.minlen))
            .unwrap_or((0.0, 1));
        simplified.set_edge_with_label(
            e.v.clone(),
            e.w.clone(),
            EdgeLabel {
                weight: weight + label.weight,
                minlen: minlen.max(label.minlen),
                ..Default::default()
            },
        );
    });

    simplified
}

/// Copy of `g` without subgraph nodes (nodes that have children).
pub fn as_non_compound_graph<N, E, G>(g: &Graph<N, E, G>) -> Result<Graph<N, E, G>>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default + Clone,
{
    let mut simplified: Graph<N, E, G> = Graph::new(GraphOptions {
        multigraph: g.is_multigraph(),
        compound: false,
        directed: g.is_directed(),
    });
    simplified.set_graph(g.graph().clone());

    for v in g.nodes() {
        if g.has_children(v) {
            continue;
        }
        if let Some(label) = g.node(v) {
            simplified.set_node(v, label.clone());
        }
    }

    for e in g.edges() {
        if let Some(label) = g.edge_by_key(e) {
            simplified.set_edge_key(e.clone(), label.clone())?;
        }
    }

    Ok(simplified)
}

/// Point where the segment from the center of `rect` towards `point` crosses its border.
pub fn intersect_rect(rect: Rect, point: Point) -> Result<Point> {
    let x = rect.x;
    let y = rect.y;

    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return Err(Error::IntersectAtCenter { x, y });
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        // Top or bottom side.
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        // Left or right side. With `dy != 0` this branch only sees `dx == 0` when the
        // rectangle has no width, in which case the crossing is on the center line.
        if dx < 0.0 {
            w = -w;
        }
        let sy = if dx == 0.0 { 0.0 } else { w * dy / dx };
        (w, sy)
    };

    Ok(Point::new(x + sx, y + sy))
}

/// Node ids grouped by rank, each rank sorted by `order`.
pub fn build_layer_matrix<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + RankedNode + 'static,
    E: Default + 'static,
    G: Default,
{
    let Some(max_rank) = max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<(usize, String)>> =
        vec![Vec::new(); usize::try_from(max_rank + 1).unwrap_or(0)];

    g.for_each_node(|v, node| {
        let Some(rank) = node.rank() else {
            return;
        };
        let Ok(rank) = usize::try_from(rank) else {
            return;
        };
        layers[rank].push((node.order().unwrap_or(0), v.to_string()));
    });

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, _)| *order);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}

pub fn max_rank<N, E, G>(g: &Graph<N, E, G>) -> Option<i32>
where
    N: Default + RankedNode + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut max: Option<i32> = None;
    g.for_each_node(|_, n| {
        if let Some(rank) = n.rank() {
            max = Some(max.map_or(rank, |m| m.max(rank)));
        }
    });
    max
}

/// Shifts ranks so the smallest one is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let mut min_rank: Option<i32> = None;
    g.for_each_node(|_, n| {
        if let Some(rank) = n.rank {
            min_rank = Some(min_rank.map_or(rank, |m| m.min(rank)));
        }
    });
    let Some(min_rank) = min_rank else {
        return;
    };
    g.for_each_node_mut(|_, n| {
        if let Some(rank) = n.rank.as_mut() {
            *rank -= min_rank;
        }
    });
}

/// Drops empty ranks that do not sit on a multiple of the nesting rank factor. Those ranks
/// were only reserved to keep subgraph borders apart.
pub fn remove_empty_ranks(g: &mut LayoutGraph) {
    let mut offset: Option<i32> = None;
    g.for_each_node(|_, n| {
        if let Some(rank) = n.rank {
            offset = Some(offset.map_or(rank, |m| m.min(rank)));
        }
    });
    let Some(offset) = offset else {
        return;
    };

    let mut layers: HashMap<i32, Vec<String>> = HashMap::default();
    let mut max_layer: i32 = 0;
    g.for_each_node(|v, n| {
        if let Some(rank) = n.rank {
            let layer = rank - offset;
            max_layer = max_layer.max(layer);
            layers.entry(layer).or_default().push(v.to_string());
        }
    });

    let factor = g.graph().node_rank_factor.unwrap_or(1).max(1);
    let mut delta: i32 = 0;
    for i in 0..=max_layer {
        match layers.get(&i) {
            None if i % factor != 0 => delta -= 1,
            Some(vs) if delta != 0 => {
                for v in vs {
                    if let Some(rank) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
                        *rank += delta;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Read access to rank and order, shared by the layout graph and the ordering layer graphs.
pub trait RankedNode {
    fn rank(&self) -> Option<i32>;
    fn order(&self) -> Option<usize>;
}

impl RankedNode for NodeLabel {
    fn rank(&self) -> Option<i32> {
        self.rank
    }

    fn order(&self) -> Option<usize> {
        self.order
    }
}
