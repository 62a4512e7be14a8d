//! Greedy feedback arc set selection.
//!
//! Nodes are bucketed by `out - in` weight. Sinks and sources are peeled off for free; when
//! neither is left, the node with the largest surplus is removed and its remaining in-edges join
//! the FAS. Parallel edges are aggregated first and expanded back at the end.

use crate::graphlib::{EdgeKey, Graph};
use rustc_hash::FxHashMap as HashMap;

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    greedy_fas_with_weight(g, |_| 1)
}

pub fn greedy_fas_with_weight<N, E, G>(
    g: &Graph<N, E, G>,
    weight_fn: impl Fn(&E) -> i64,
) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let ids: Vec<&str> = g.nodes().collect();
    let ix_of: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, v)| (*v, i)).collect();

    // Aggregated edges keep the order in which each (v, w) pair first appears.
    let mut pair_ix: HashMap<(usize, usize), usize> = HashMap::default();
    let mut pairs: Vec<(usize, usize, i64)> = Vec::new();
    g.for_each_edge(|e, label| {
        if e.is_self_loop() {
            return;
        }
        let (Some(&v), Some(&w)) = (ix_of.get(e.v.as_str()), ix_of.get(e.w.as_str())) else {
            return;
        };
        let weight = weight_fn(label).max(0);
        match pair_ix.get(&(v, w)) {
            Some(&p) => pairs[p].2 += weight,
            None => {
                pair_ix.insert((v, w), pairs.len());
                pairs.push((v, w, weight));
            }
        }
    });

    let mut state = FasState::new(ids.len(), &pairs);
    let mut results: Vec<(usize, usize)> = Vec::new();

    while state.remaining > 0 {
        while let Some(v) = state.dequeue(0) {
            state.remove_node(v, None);
        }
        let last = state.buckets.len() - 1;
        while let Some(v) = state.dequeue(last) {
            state.remove_node(v, None);
        }
        if state.remaining == 0 {
            break;
        }

        let picked = (1..last).rev().find_map(|i| state.dequeue(i));
        match picked {
            Some(v) => state.remove_node(v, Some(&mut results)),
            // Every live node sits in some bucket, so this only guards against looping forever.
            None => break,
        }
    }

    let mut fas: Vec<EdgeKey> = Vec::new();
    for (v, w) in results {
        fas.extend(g.out_edges(ids[v], Some(ids[w])));
    }
    fas
}

struct FasState {
    in_weight: Vec<i64>,
    out_weight: Vec<i64>,
    in_edges: Vec<Vec<(usize, i64)>>,
    out_edges: Vec<Vec<(usize, i64)>>,
    alive: Vec<bool>,
    remaining: usize,
    buckets: Buckets,
    zero_idx: i64,
}

impl FasState {
    fn new(node_count: usize, pairs: &[(usize, usize, i64)]) -> Self {
        let mut in_weight = vec![0i64; node_count];
        let mut out_weight = vec![0i64; node_count];
        let mut in_edges = vec![Vec::new(); node_count];
        let mut out_edges = vec![Vec::new(); node_count];
        for &(v, w, weight) in pairs {
            out_weight[v] += weight;
            in_weight[w] += weight;
            out_edges[v].push((w, weight));
            in_edges[w].push((v, weight));
        }
        let max_in = in_weight.iter().copied().max().unwrap_or(0);
        let max_out = out_weight.iter().copied().max().unwrap_or(0);
        let bucket_count = usize::try_from(max_out + max_in + 3).unwrap_or(3);

        let mut state = Self {
            in_weight,
            out_weight,
            in_edges,
            out_edges,
            alive: vec![true; node_count],
            remaining: node_count,
            buckets: Buckets::new(bucket_count, node_count),
            zero_idx: max_in + 1,
        };
        for v in 0..node_count {
            state.assign_bucket(v);
        }
        state
    }

    fn dequeue(&mut self, bucket: usize) -> Option<usize> {
        self.buckets.dequeue(bucket)
    }

    fn assign_bucket(&mut self, v: usize) {
        let last = self.buckets.len() - 1;
        let idx = if self.out_weight[v] == 0 {
            0
        } else if self.in_weight[v] == 0 {
            last
        } else {
            let raw = self.out_weight[v] - self.in_weight[v] + self.zero_idx;
            usize::try_from(raw).unwrap_or(0).min(last)
        };
        self.buckets.enqueue(idx, v);
    }

    fn remove_node(&mut self, v: usize, mut collect: Option<&mut Vec<(usize, usize)>>) {
        if !self.alive[v] {
            return;
        }
        self.alive[v] = false;
        self.remaining -= 1;

        for i in 0..self.in_edges[v].len() {
            let (u, weight) = self.in_edges[v][i];
            if !self.alive[u] {
                continue;
            }
            if let Some(results) = collect.as_deref_mut() {
                results.push((u, v));
            }
            self.out_weight[u] -= weight;
            self.assign_bucket(u);
        }
        for i in 0..self.out_edges[v].len() {
            let (w, weight) = self.out_edges[v][i];
            if !self.alive[w] {
                continue;
            }
            self.in_weight[w] -= weight;
            self.assign_bucket(w);
        }
    }
}

/// FIFO buckets threaded through per-node links, so moving a node between buckets is O(1).
struct Buckets {
    head: Vec<Option<usize>>,
    tail: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    next: Vec<Option<usize>>,
    bucket_of: Vec<Option<usize>>,
}

impl Buckets {
    fn new(bucket_count: usize, node_count: usize) -> Self {
        Self {
            head: vec![None; bucket_count],
            tail: vec![None; bucket_count],
            prev: vec![None; node_count],
            next: vec![None; node_count],
            bucket_of: vec![None; node_count],
        }
    }

    fn len(&self) -> usize {
        self.head.len()
    }

    /// Appends `v` to `bucket`, unlinking it from wherever it was queued before.
    fn enqueue(&mut self, bucket: usize, v: usize) {
        self.detach(v);
        self.prev[v] = self.tail[bucket];
        match self.tail[bucket] {
            Some(t) => self.next[t] = Some(v),
            None => self.head[bucket] = Some(v),
        }
        self.tail[bucket] = Some(v);
        self.bucket_of[v] = Some(bucket);
    }

    fn dequeue(&mut self, bucket: usize) -> Option<usize> {
        let v = self.head[bucket]?;
        self.detach(v);
        Some(v)
    }

    fn detach(&mut self, v: usize) {
        let Some(bucket) = self.bucket_of[v].take() else {
            return;
        };
        let (prev, next) = (self.prev[v].take(), self.next[v].take());
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head[bucket] = next,
        }
        match next {
            Some(n) => self.prev[n] = prev,
            None => self.tail[bucket] = prev,
        }
    }
}
