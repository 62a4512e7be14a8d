use crate::util::{Rect, intersect_rect};
use crate::{LayoutGraph, Point, Result};

/// Moves the drawing so its top-left corner sits at the margins and records its size. Edge
/// labels count towards the bounding box; edge points do not.
pub(super) fn translate_graph(g: &mut LayoutGraph) {
    let mut min_x = f64::INFINITY;
    let mut max_x = 0.0_f64;
    let mut min_y = f64::INFINITY;
    let mut max_y = 0.0_f64;
    let mut grow = |x: f64, y: f64, width: f64, height: f64| {
        min_x = min_x.min(x - width / 2.0);
        max_x = max_x.max(x + width / 2.0);
        min_y = min_y.min(y - height / 2.0);
        max_y = max_y.max(y + height / 2.0);
    };

    g.for_each_node(|_, node| {
        grow(node.x.unwrap_or(0.0), node.y.unwrap_or(0.0), node.width, node.height);
    });
    g.for_each_edge(|_, edge| {
        if let (Some(x), Some(y)) = (edge.x, edge.y) {
            grow(x, y, edge.width, edge.height);
        }
    });
    if !min_x.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
    }

    let (margin_x, margin_y) = (g.graph().marginx, g.graph().marginy);
    min_x -= margin_x;
    min_y -= margin_y;

    g.for_each_node_mut(|_, node| {
        node.x = node.x.map(|x| x - min_x);
        node.y = node.y.map(|y| y - min_y);
    });
    g.for_each_edge_mut(|_, edge| {
        for p in &mut edge.points {
            p.x -= min_x;
            p.y -= min_y;
        }
        edge.x = edge.x.map(|x| x - min_x);
        edge.y = edge.y.map(|y| y - min_y);
    });

    let graph = g.graph_mut();
    graph.width = max_x - min_x + margin_x;
    graph.height = max_y - min_y + margin_y;
}

/// Clips every edge at the boundaries of its end nodes.
pub(super) fn assign_node_intersects(g: &mut LayoutGraph) -> Result<()> {
    for e in g.edge_keys() {
        let (Some(v), Some(w)) = (g.node(&e.v), g.node(&e.w)) else {
            continue;
        };
        let (v_rect, w_rect) = (Rect::of(v), Rect::of(w));
        let Some(edge) = g.edge_mut_by_key(&e) else {
            continue;
        };
        let (p1, p2) = match (edge.points.first(), edge.points.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (
                Point::new(w_rect.x, w_rect.y),
                Point::new(v_rect.x, v_rect.y),
            ),
        };
        edge.points.insert(0, intersect_rect(v_rect, p1)?);
        edge.points.push(intersect_rect(w_rect, p2)?);
    }
    Ok(())
}

pub(super) fn reverse_points_for_reversed_edges(g: &mut LayoutGraph) {
    g.for_each_edge_mut(|_, edge| {
        if edge.reversed {
            edge.points.reverse();
        }
    });
}
