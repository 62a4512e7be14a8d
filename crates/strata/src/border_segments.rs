//! Left and right border nodes for every rank a subgraph spans.
//!
//! Consecutive border nodes on the same side are chained with unit-weight edges, which keeps the
//! subgraph's sides straight during positioning. Children are handled before their parents.

use crate::util::add_dummy_node;
use crate::{BorderSide, Dummy, EdgeLabel, LayoutGraph, NodeLabel, Result};
use tracing::instrument;

#[instrument(skip_all, name = "border_segments")]
pub fn add_border_segments(g: &mut LayoutGraph) -> Result<()> {
    for v in hierarchy_postorder(g) {
        let Some((min_rank, max_rank)) = g.node(&v).and_then(|n| n.min_rank.zip(n.max_rank))
        else {
            continue;
        };
        let len = usize::try_from(max_rank + 1).unwrap_or(0);
        if let Some(node) = g.node_mut(&v) {
            node.border_left = vec![None; len];
            node.border_right = vec![None; len];
        }
        for rank in min_rank..=max_rank {
            add_border_node(g, &v, BorderSide::Left, rank)?;
            add_border_node(g, &v, BorderSide::Right, rank)?;
        }
    }
    Ok(())
}

fn add_border_node(g: &mut LayoutGraph, sg: &str, side: BorderSide, rank: i32) -> Result<()> {
    let prefix = match side {
        BorderSide::Left => "_bl",
        _ => "_br",
    };
    let prev = g
        .node(sg)
        .and_then(|n| match side {
            BorderSide::Left => n.border_left_at(rank - 1),
            _ => n.border_right_at(rank - 1),
        })
        .map(str::to_string);

    let curr = add_dummy_node(
        g,
        prefix,
        NodeLabel {
            rank: Some(rank),
            dummy: Some(Dummy::Border { side }),
            ..Default::default()
        },
    );
    if let (Some(node), Ok(ix)) = (g.node_mut(sg), usize::try_from(rank)) {
        let slots = match side {
            BorderSide::Left => &mut node.border_left,
            _ => &mut node.border_right,
        };
        if let Some(slot) = slots.get_mut(ix) {
            *slot = Some(curr.clone());
        }
    }
    g.set_parent(curr.clone(), sg)?;
    if let Some(prev) = prev {
        g.set_edge_with_label(
            prev,
            curr,
            EdgeLabel {
                weight: 1.0,
                ..Default::default()
            },
        );
    }
    Ok(())
}

/// Every node of the hierarchy in postorder.
fn hierarchy_postorder(g: &LayoutGraph) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<(&str, bool)> = g
        .children_root()
        .into_iter()
        .rev()
        .map(|v| (v, false))
        .collect();
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            out.push(v.to_string());
            continue;
        }
        stack.push((v, true));
        for child in g.children(v).into_iter().rev() {
            stack.push((child, false));
        }
    }
    out
}
