use crate::{Error, LayoutGraph, Result};

/// Derives each subgraph's rank span from its top and bottom border nodes and records the
/// highest rank on the graph label.
pub(super) fn assign_rank_min_max(g: &mut LayoutGraph) {
    let mut spans: Vec<(String, Option<i32>, Option<i32>)> = Vec::new();
    g.for_each_node(|v, node| {
        let (Some(top), Some(bottom)) = (&node.border_top, &node.border_bottom) else {
            return;
        };
        let rank_of = |b: &str| g.node(b).and_then(|n| n.rank);
        spans.push((v.to_string(), rank_of(top), rank_of(bottom)));
    });

    let mut max_rank = 0;
    for (v, min_rank, max_rank_of_v) in spans {
        if let Some(node) = g.node_mut(&v) {
            node.min_rank = min_rank;
            node.max_rank = max_rank_of_v;
        }
        if let Some(rank) = max_rank_of_v {
            max_rank = max_rank.max(rank);
        }
    }
    g.graph_mut().max_rank = Some(max_rank);
}

/// Sizes every subgraph to the box spanned by its border nodes, then removes all border nodes.
pub(super) fn remove_border_nodes(g: &mut LayoutGraph) -> Result<()> {
    let mut boxes: Vec<(String, f64, f64, f64, f64)> = Vec::new();
    for v in g.nodes() {
        if !g.has_children(v) {
            continue;
        }
        let Some(node) = g.node(v) else {
            continue;
        };
        let border = |id: Option<&str>, side: &'static str| {
            id.and_then(|b| g.node(b)).ok_or_else(|| Error::MissingBorder {
                node: v.to_string(),
                side,
            })
        };
        let top = border(node.border_top.as_deref(), "top")?;
        let bottom = border(node.border_bottom.as_deref(), "bottom")?;
        let left = border(node.border_left.last().and_then(Option::as_deref), "left")?;
        let right = border(node.border_right.last().and_then(Option::as_deref), "right")?;

        let (l_x, r_x) = (left.x.unwrap_or(0.0), right.x.unwrap_or(0.0));
        let (t_y, b_y) = (top.y.unwrap_or(0.0), bottom.y.unwrap_or(0.0));
        let width = (r_x - l_x).abs();
        let height = (b_y - t_y).abs();
        boxes.push((v.to_string(), l_x + width / 2.0, t_y + height / 2.0, width, height));
    }

    for (v, x, y, width, height) in boxes {
        if let Some(node) = g.node_mut(&v) {
            node.x = Some(x);
            node.y = Some(y);
            node.width = width;
            node.height = height;
        }
    }

    let borders: Vec<String> = g
        .node_ids()
        .into_iter()
        .filter(|v| g.node(v).is_some_and(|n| n.is_border()))
        .collect();
    for v in borders {
        g.remove_node(&v);
    }
    Ok(())
}
