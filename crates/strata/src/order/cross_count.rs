use crate::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

/// Weighted number of edge crossings between each pair of adjacent layers. A crossing of edges
/// with weights `a` and `b` counts `a * b`.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<String>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Accumulator tree sweep (Barth, Jünger and Mutzel): edges are visited by north position,
/// then south position, and each one adds the weight of the edges already seen further right.
fn two_layer_cross_count(g: &LayoutGraph, north: &[String], south: &[String]) -> f64 {
    if south.is_empty() {
        return 0.0;
    }
    let south_pos: HashMap<&str, usize> = south
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut south_entries: Vec<(usize, f64)> = Vec::new();
    for v in north {
        let mut entries: Vec<(usize, f64)> = Vec::new();
        g.for_each_out_edge(v, None, |e, label| {
            if let Some(&pos) = south_pos.get(e.w.as_str()) {
                entries.push((pos, label.weight));
            }
        });
        entries.sort_by_key(|(pos, _)| *pos);
        south_entries.extend(entries);
    }

    let first_index = south.len().next_power_of_two() - 1;
    let mut tree = vec![0.0_f64; 2 * first_index + 1];

    let mut cc = 0.0;
    for (pos, weight) in south_entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }
    cc
}
