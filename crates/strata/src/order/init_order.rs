use crate::LayoutGraph;
use rustc_hash::FxHashSet as HashSet;

/// Initial layering: a depth-first walk over successors, started from the leaf nodes in rank
/// order. Nodes join their rank's layer in the order they are first reached.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<String>> {
    let mut simple: Vec<(i32, &str)> = Vec::new();
    let mut max_rank: Option<i32> = None;
    for v in g.nodes() {
        if g.has_children(v) {
            continue;
        }
        let rank = g.node(v).and_then(|n| n.rank);
        if let Some(rank) = rank {
            max_rank = Some(max_rank.map_or(rank, |m| m.max(rank)));
        }
        simple.push((rank.unwrap_or(i32::MIN), v));
    }
    simple.sort_by_key(|(rank, _)| *rank);

    let len = max_rank.and_then(|m| usize::try_from(m + 1).ok()).unwrap_or(0);
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); len];
    let mut visited: HashSet<&str> = HashSet::default();

    for (_, start) in simple {
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            let layer = g
                .node(v)
                .and_then(|n| n.rank)
                .and_then(|r| usize::try_from(r).ok())
                .and_then(|r| layers.get_mut(r));
            if let Some(layer) = layer {
                layer.push(v.to_string());
            }
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    layers
}
