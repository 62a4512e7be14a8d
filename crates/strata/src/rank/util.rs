//! Rank helpers (longest path, slack).

use crate::graphlib::EdgeKey;
use crate::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

/// Assigns every node the highest rank its out-edges allow, walking from the sources. Sinks get
/// rank 0, so every other rank ends up negative until the ranks are normalized.
pub fn longest_path(g: &mut LayoutGraph) {
    struct Frame {
        v: String,
        out: Vec<EdgeKey>,
        cursor: usize,
        rank: Option<i32>,
    }

    // `None` marks a node that is still on the stack.
    let mut ranks: HashMap<String, Option<i32>> = HashMap::default();
    let sources: Vec<String> = g.sources().into_iter().map(str::to_string).collect();

    for source in sources {
        if ranks.contains_key(&source) {
            continue;
        }
        ranks.insert(source.clone(), None);
        let out = g.out_edges(&source, None);
        let mut stack = vec![Frame {
            v: source,
            out,
            cursor: 0,
            rank: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(e) = frame.out.get(frame.cursor) else {
                let rank = frame.rank.unwrap_or(0);
                if let Some(label) = g.node_mut(&frame.v) {
                    label.rank = Some(rank);
                }
                ranks.insert(frame.v.clone(), Some(rank));
                stack.pop();
                continue;
            };

            match ranks.get(&e.w) {
                Some(Some(w_rank)) => {
                    let minlen = g.edge_by_key(e).map_or(1, |label| label.minlen as i32);
                    let candidate = w_rank - minlen;
                    frame.rank = Some(frame.rank.map_or(candidate, |r| r.min(candidate)));
                    frame.cursor += 1;
                }
                // Back edge; only reachable on cyclic input.
                Some(None) => frame.cursor += 1,
                None => {
                    let w = e.w.clone();
                    ranks.insert(w.clone(), None);
                    let out = g.out_edges(&w, None);
                    stack.push(Frame {
                        v: w,
                        out,
                        cursor: 0,
                        rank: None,
                    });
                }
            }
        }
    }
}

/// How much longer the edge is than its `minlen` requires.
pub fn slack(g: &LayoutGraph, e: &EdgeKey) -> i32 {
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(e).map_or(1, |label| label.minlen as i32);
    w_rank - v_rank - minlen
}
