use super::barycenter::{barycenter, merge_barycenters};
use super::resolve_conflicts::resolve_conflicts;
use super::types::{ConstraintGraph, LayerGraph, SortEntry, SortResult};
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Ordering;

/// Orders entries by barycenter. Entries without one keep their input position `i` and the
/// sorted ones flow around them. Ties go to the lower `i`, or the higher one with `bias_right`.
pub fn sort(entries: Vec<SortEntry>, bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<SortEntry>, Vec<SortEntry>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let by_bc = a
            .barycenter
            .partial_cmp(&b.barycenter)
            .unwrap_or(Ordering::Equal);
        by_bc.then_with(|| if bias_right { b.i.cmp(&a.i) } else { a.i.cmp(&b.i) })
    });

    let mut vs: Vec<String> = Vec::new();
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut vs_index = consume_unsortable(&mut vs, &mut unsortable, 0);

    for entry in sortable {
        vs_index += entry.vs.len();
        vs.extend(entry.vs);
        sum += entry.barycenter.unwrap_or(0.0) * entry.weight;
        weight += entry.weight;
        vs_index = consume_unsortable(&mut vs, &mut unsortable, vs_index);
    }
    for entry in unsortable.into_iter().rev() {
        vs.extend(entry.vs);
    }

    SortResult {
        vs,
        barycenter: (weight != 0.0).then(|| sum / weight),
        weight,
    }
}

fn consume_unsortable(
    vs: &mut Vec<String>,
    unsortable: &mut Vec<SortEntry>,
    mut index: usize,
) -> usize {
    while unsortable.last().is_some_and(|last| last.i <= index) {
        if let Some(last) = unsortable.pop() {
            vs.extend(last.vs);
            index += 1;
        }
    }
    index
}

/// Sorts the children of `v` in a layer graph, nested subgraphs first.
///
/// A subgraph is sorted as a block: its barycenter feeds into its parent's sort and its members
/// replace it in the result. Border nodes are pinned to both ends of their subgraph.
pub fn sort_subgraph(
    lg: &LayerGraph,
    v: &str,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> SortResult {
    let mut results: HashMap<String, SortResult> = HashMap::default();
    for sg in subgraph_postorder(lg, v) {
        let result = sort_children(lg, &sg, cg, bias_right, &mut results);
        results.insert(sg, result);
    }
    results.remove(v).unwrap_or_default()
}

fn sort_children(
    lg: &LayerGraph,
    v: &str,
    cg: &ConstraintGraph,
    bias_right: bool,
    results: &mut HashMap<String, SortResult>,
) -> SortResult {
    let node = lg.node(v);
    let bl = node.and_then(|n| n.border_left.as_deref());
    let br = node.and_then(|n| n.border_right.as_deref());
    let movable: Vec<&str> = lg
        .children(v)
        .into_iter()
        .filter(|&w| Some(w) != bl && Some(w) != br)
        .collect();

    let mut subgraphs: HashMap<String, SortResult> = HashMap::default();
    let mut barycenters = barycenter(lg, &movable);
    for entry in &mut barycenters {
        if let Some(sub) = results.remove(&entry.v) {
            merge_barycenters(entry, &sub);
            subgraphs.insert(entry.v.clone(), sub);
        }
    }

    let mut entries = resolve_conflicts(&barycenters, cg);
    for entry in &mut entries {
        entry.vs = std::mem::take(&mut entry.vs)
            .into_iter()
            .flat_map(|w| match subgraphs.remove(&w) {
                Some(sub) => sub.vs,
                None => vec![w],
            })
            .collect();
    }

    let mut result = sort(entries, bias_right);

    if let (Some(bl), Some(br)) = (bl, br) {
        result.vs.insert(0, bl.to_string());
        result.vs.push(br.to_string());
        let first_pred_order = |w: &str| {
            lg.predecessors(w)
                .first()
                .and_then(|u| lg.node(u))
                .and_then(|n| n.order)
        };
        if let Some(bl_order) = first_pred_order(bl) {
            let br_order = first_pred_order(br).unwrap_or(0);
            let bc = result.barycenter.unwrap_or(0.0);
            result.barycenter = Some(
                (bc * result.weight + bl_order as f64 + br_order as f64) / (result.weight + 2.0),
            );
            result.weight += 2.0;
        }
    }
    result
}

/// `v` and every subgraph below it, children before parents.
fn subgraph_postorder(lg: &LayerGraph, v: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<(&str, bool)> = vec![(v, false)];
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            out.push(v.to_string());
            continue;
        }
        stack.push((v, true));
        for child in lg.children(v).into_iter().rev() {
            if lg.has_children(child) {
                stack.push((child, false));
            }
        }
    }
    out
}
