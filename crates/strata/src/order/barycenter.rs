use super::types::{BarycenterEntry, LayerGraph, SortResult};

pub fn barycenter(lg: &LayerGraph, movable: &[&str]) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|&v| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            let mut any = false;
            lg.for_each_in_edge(v, None, |e, label| {
                let order = lg.node(&e.v).and_then(|n| n.order).unwrap_or(0);
                sum += label.weight * order as f64;
                weight += label.weight;
                any = true;
            });
            BarycenterEntry {
                v: v.to_string(),
                barycenter: (any && weight != 0.0).then(|| sum / weight),
                weight,
            }
        })
        .collect()
}

/// Folds a sorted subgraph's barycenter into the entry that stands for it.
pub fn merge_barycenters(target: &mut BarycenterEntry, other: &SortResult) {
    let Some(other_bc) = other.barycenter else {
        return;
    };
    match target.barycenter {
        Some(bc) => {
            let weight = target.weight + other.weight;
            target.barycenter = Some((bc * target.weight + other_bc * other.weight) / weight);
            target.weight = weight;
        }
        None => {
            target.barycenter = Some(other_bc);
            target.weight = other.weight;
        }
    }
}
