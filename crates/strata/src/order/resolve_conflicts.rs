use super::types::{BarycenterEntry, ConstraintGraph, SortEntry};
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug)]
struct Conflict {
    vs: Vec<String>,
    i: usize,
    barycenter: Option<f64>,
    weight: f64,
    indegree: usize,
    incoming: Vec<usize>,
    outgoing: Vec<usize>,
    merged: bool,
}

/// Merges entries whose barycenter order contradicts the constraint graph.
///
/// Entries are visited in topological order of the constraints. When a predecessor `u` must stay
/// left of `v` but would sort after it (or either lacks a barycenter), `u` is merged into `v`:
/// the members are concatenated `u` first and the barycenter becomes the weighted average.
pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<SortEntry> {
    let mut arena: Vec<Conflict> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Conflict {
            vs: vec![entry.v.clone()],
            i,
            barycenter: entry.barycenter,
            weight: if entry.barycenter.is_some() { entry.weight } else { 0.0 },
            indegree: 0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            merged: false,
        })
        .collect();
    let index: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.v.as_str(), i))
        .collect();

    for e in cg.edges() {
        let (Some(&v), Some(&w)) = (index.get(e.v.as_str()), index.get(e.w.as_str())) else {
            continue;
        };
        arena[w].indegree += 1;
        arena[v].outgoing.push(w);
    }

    let mut sources: Vec<usize> = (0..arena.len()).filter(|&i| arena[i].indegree == 0).collect();
    while let Some(v) = sources.pop() {
        let incoming = std::mem::take(&mut arena[v].incoming);
        for &u in incoming.iter().rev() {
            if arena[u].merged {
                continue;
            }
            let conflict = match (arena[u].barycenter, arena[v].barycenter) {
                (Some(u_bc), Some(v_bc)) => u_bc >= v_bc,
                _ => true,
            };
            if conflict {
                merge_entries(&mut arena, v, u);
            }
        }
        for w in std::mem::take(&mut arena[v].outgoing) {
            arena[w].incoming.push(v);
            arena[w].indegree -= 1;
            if arena[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    arena
        .into_iter()
        .filter(|c| !c.merged)
        .map(|c| SortEntry {
            vs: c.vs,
            i: c.i,
            barycenter: c.barycenter,
            weight: c.weight,
        })
        .collect()
}

fn merge_entries(arena: &mut [Conflict], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for ix in [target, source] {
        let c = &arena[ix];
        if let Some(bc) = c.barycenter.filter(|_| c.weight != 0.0) {
            sum += bc * c.weight;
            weight += c.weight;
        }
    }

    let mut vs = std::mem::take(&mut arena[source].vs);
    vs.append(&mut arena[target].vs);
    let source_i = arena[source].i;
    arena[source].merged = true;

    let t = &mut arena[target];
    t.vs = vs;
    t.barycenter = (weight != 0.0).then(|| sum / weight);
    t.weight = weight;
    t.i = t.i.min(source_i);
}
