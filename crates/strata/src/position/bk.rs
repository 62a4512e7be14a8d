//! Brandes-Köpf horizontal coordinate assignment.
//!
//! Four extreme layouts are computed, one per [`Align`]: nodes are first grouped into vertical
//! blocks along median neighbours (upwards or downwards, preferring the left or the right
//! median), then the blocks are packed as tightly as the separation rules allow. The layouts are
//! aligned to the narrowest one and either one is picked (`GraphLabel::align`) or they are
//! balanced by taking the mean of the two median candidates for each node.
//!
//! Compaction deviates from the paper: blocks form a constraint graph that is swept twice, once
//! pushing blocks right of their left neighbours and once pulling them back towards their right
//! neighbours.

use crate::graphlib::{Graph, GraphOptions};
use crate::util::build_layer_matrix;
use crate::{Align, BorderSide, LabelPos, LayoutGraph};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tracing::trace;

/// Pairs of nodes whose edge must not be used for alignment, keyed by the smaller id.
pub type Conflicts = HashMap<String, HashSet<String>>;

pub type Coordinates = HashMap<String, f64>;

pub fn add_conflict(conflicts: &mut Conflicts, v: &str, w: &str) {
    let (v, w) = if v <= w { (v, w) } else { (w, v) };
    conflicts.entry(v.to_string()).or_default().insert(w.to_string());
}

pub fn has_conflict(conflicts: &Conflicts, v: &str, w: &str) -> bool {
    let (v, w) = if v <= w { (v, w) } else { (w, v) };
    conflicts.get(v).is_some_and(|ws| ws.contains(w))
}

fn is_dummy(g: &LayoutGraph, v: &str) -> bool {
    g.node(v).is_some_and(|n| n.is_dummy())
}

fn order_of(g: &LayoutGraph, v: &str) -> usize {
    g.node(v).and_then(|n| n.order).unwrap_or(0)
}

/// Type-1 conflicts: an edge between two real nodes, or a real and a dummy node, that crosses
/// an inner segment (an edge between two dummies). Inner segments always win, keeping long
/// edges straight.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<String>]) -> Conflicts {
    let mut conflicts = Conflicts::default();

    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0usize;
        let mut scan_pos = 0usize;
        let last = layer.len().saturating_sub(1);

        for (i, v) in layer.iter().enumerate() {
            let w = other_inner_segment_node(g, v);
            let k1 = w.map_or(prev_layer.len(), |w| order_of(g, w));
            if w.is_none() && i != last {
                continue;
            }
            for scan_node in &layer[scan_pos..=i] {
                let scan_dummy = is_dummy(g, scan_node);
                for u in g.predecessors(scan_node) {
                    let u_pos = order_of(g, u);
                    if (u_pos < k0 || k1 < u_pos) && !(is_dummy(g, u) && scan_dummy) {
                        add_conflict(&mut conflicts, u, scan_node);
                    }
                }
            }
            scan_pos = i + 1;
            k0 = k1;
        }
    }
    conflicts
}

fn other_inner_segment_node<'g>(g: &'g LayoutGraph, v: &str) -> Option<&'g str> {
    if !is_dummy(g, v) {
        return None;
    }
    g.predecessors(v).into_iter().find(|u| is_dummy(g, u))
}

/// Type-2 conflicts: two inner segments crossing, one of which runs along a subgraph border.
/// The border segment wins.
pub fn find_type2_conflicts(g: &LayoutGraph, layering: &[Vec<String>]) -> Conflicts {
    let mut conflicts = Conflicts::default();

    for pair in layering.windows(2) {
        let (north, south) = (&pair[0], &pair[1]);
        let mut prev_north_pos: Option<usize> = None;
        let mut next_north_pos: Option<usize> = None;
        let mut south_pos = 0usize;

        for (lookahead, v) in south.iter().enumerate() {
            if g.node(v).is_some_and(|n| n.is_border()) {
                if let Some(u) = g.first_predecessor(v) {
                    next_north_pos = Some(order_of(g, u));
                    let span = NorthSpan {
                        prev: prev_north_pos,
                        next: next_north_pos,
                    };
                    scan_inner_segments(g, &mut conflicts, &south[south_pos..lookahead], span);
                    south_pos = lookahead;
                    prev_north_pos = next_north_pos;
                }
            }
            let span = NorthSpan {
                prev: next_north_pos,
                next: Some(north.len()),
            };
            scan_inner_segments(g, &mut conflicts, &south[south_pos..], span);
        }
    }
    conflicts
}

/// North positions an inner segment may start from without crossing a border segment. An unset
/// bound admits everything on its side.
#[derive(Debug, Clone, Copy)]
struct NorthSpan {
    prev: Option<usize>,
    next: Option<usize>,
}

impl NorthSpan {
    fn excludes(self, pos: usize) -> bool {
        self.prev.is_some_and(|p| pos < p) || self.next.is_some_and(|n| pos > n)
    }
}

fn scan_inner_segments(
    g: &LayoutGraph,
    conflicts: &mut Conflicts,
    south: &[String],
    span: NorthSpan,
) {
    for v in south {
        if !is_dummy(g, v) {
            continue;
        }
        for u in g.predecessors(v) {
            if is_dummy(g, u) && span.excludes(order_of(g, u)) {
                add_conflict(conflicts, u, v);
            }
        }
    }
}

/// Nodes grouped into blocks. `root` maps every node to the top of its block; `align` links
/// each node to the next one down the block, the last one linking back to the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockAlignment {
    pub root: HashMap<String, String>,
    pub align: HashMap<String, String>,
}

/// Aligns each node with one of its median `neighbors` on the previous layer, skipping
/// conflicting edges and medians left of one already taken on this layer.
pub fn vertical_alignment<'g, F>(
    layering: &[Vec<String>],
    conflicts: &Conflicts,
    neighbors: F,
) -> BlockAlignment
where
    F: Fn(&str) -> Vec<&'g str>,
{
    let mut result = BlockAlignment::default();
    // Positions come from the layering, which may be mirrored relative to the graph's orders.
    let mut pos: HashMap<&str, usize> = HashMap::default();
    for layer in layering {
        for (order, v) in layer.iter().enumerate() {
            result.root.insert(v.clone(), v.clone());
            result.align.insert(v.clone(), v.clone());
            pos.insert(v, order);
        }
    }
    let pos_of = |v: &str| pos.get(v).copied().unwrap_or(0);

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for v in layer {
            let mut ws = neighbors(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|w| pos_of(*w));
            let lo = (ws.len() - 1) / 2;
            let hi = ws.len() / 2;
            for &w in &ws[lo..=hi] {
                let unaligned = result.align.get(v.as_str()) == Some(v);
                let w_pos = pos_of(w);
                if unaligned
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = result.root.get(w).cloned().unwrap_or_else(|| w.to_string());
                    result.align.insert(w.to_string(), v.clone());
                    result.align.insert(v.clone(), w_root.clone());
                    result.root.insert(v.clone(), w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }
    result
}

/// Minimum distance between the centers of two neighbouring nodes.
#[derive(Debug, Clone, Copy)]
struct Separation {
    nodesep: f64,
    edgesep: f64,
    reverse: bool,
}

impl Separation {
    fn between(self, g: &LayoutGraph, v: &str, w: &str) -> f64 {
        let (Some(v_label), Some(w_label)) = (g.node(v), g.node(w)) else {
            return 0.0;
        };
        let gap = |dummy: bool| (if dummy { self.edgesep } else { self.nodesep }) / 2.0;
        // Side labels sit off-center on their dummy, shifting its effective extent.
        let shift = |labelpos: Option<LabelPos>, width: f64, sign: f64| {
            let delta = match labelpos {
                Some(LabelPos::Left) => -sign * width / 2.0,
                Some(LabelPos::Right) => sign * width / 2.0,
                _ => 0.0,
            };
            if self.reverse { delta } else { -delta }
        };

        v_label.width / 2.0
            + shift(v_label.labelpos(), v_label.width, 1.0)
            + gap(v_label.is_dummy())
            + gap(w_label.is_dummy())
            + w_label.width / 2.0
            + shift(w_label.labelpos(), w_label.width, -1.0)
    }
}

type BlockGraph = Graph<(), f64, ()>;

fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Vec<String>],
    root: &HashMap<String, String>,
    sep: Separation,
) -> BlockGraph {
    let mut block_g = BlockGraph::new(GraphOptions::default());
    let root_of = |v: &str| root.get(v).map_or(v, String::as_str).to_string();
    for layer in layering {
        let mut prev: Option<&str> = None;
        for v in layer {
            let v_root = root_of(v);
            block_g.ensure_node(v_root.clone());
            if let Some(u) = prev {
                let u_root = root_of(u);
                let prev_max = block_g.edge(&u_root, &v_root, None).copied().unwrap_or(0.0);
                let min_gap = sep.between(g, v, u).max(prev_max);
                block_g.set_edge_with_label(u_root, v_root, min_gap);
            }
            prev = Some(v);
        }
    }
    block_g
}

/// Post-order walk over the block graph following `next`, calling `visit` once a node's
/// `next` nodes have been visited.
fn sweep_blocks<'b, N, F>(block_g: &'b BlockGraph, next: N, mut visit: F)
where
    N: Fn(&'b str) -> Vec<&'b str>,
    F: FnMut(&str),
{
    let mut stack: Vec<&str> = block_g.nodes().collect();
    let mut visited: HashSet<&str> = HashSet::default();
    while let Some(v) = stack.pop() {
        if visited.contains(v) {
            visit(v);
            continue;
        }
        visited.insert(v);
        stack.push(v);
        stack.extend(next(v));
    }
}

/// Packs the blocks of one alignment. With `reverse_sep` the layering is mirrored and label
/// offsets and pinned borders flip sides accordingly.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<String>],
    alignment: &BlockAlignment,
    reverse_sep: bool,
) -> Coordinates {
    let sep = Separation {
        nodesep: g.graph().nodesep,
        edgesep: g.graph().edgesep,
        reverse: reverse_sep,
    };
    let block_g = build_block_graph(g, layering, &alignment.root, sep);
    let pinned_side = if reverse_sep {
        BorderSide::Left
    } else {
        BorderSide::Right
    };

    let mut xs: Coordinates = HashMap::default();
    sweep_blocks(&block_g, |v| block_g.predecessors(v), |v| {
        let mut x = 0.0_f64;
        block_g.for_each_in_edge(v, None, |e, gap| {
            x = x.max(xs.get(&e.v).copied().unwrap_or(0.0) + gap);
        });
        xs.insert(v.to_string(), x);
    });
    sweep_blocks(&block_g, |v| block_g.successors(v), |v| {
        let mut min = f64::INFINITY;
        block_g.for_each_out_edge(v, None, |e, gap| {
            min = min.min(xs.get(&e.w).copied().unwrap_or(0.0) - gap);
        });
        let pinned = g.node(v).and_then(|n| n.border_side()) == Some(pinned_side);
        if min.is_finite() && !pinned {
            let x = xs.entry(v.to_string()).or_insert(0.0);
            *x = x.max(min);
        }
    });

    alignment
        .root
        .iter()
        .map(|(v, root)| (v.clone(), xs.get(root).copied().unwrap_or(0.0)))
        .collect()
}

fn extent(g: &LayoutGraph, xs: &Coordinates) -> (f64, f64) {
    xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (v, &x)| {
        let half = g.node(v).map_or(0.0, |n| n.width / 2.0);
        (min.min(x - half), max.max(x + half))
    })
}

/// Index into [`Align::ALL`] of the narrowest layout. Ties go to the earlier alignment.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &[Coordinates; 4]) -> usize {
    let mut best = 0;
    let mut best_width = f64::INFINITY;
    for (i, xs) in xss.iter().enumerate() {
        let (min, max) = extent(g, xs);
        if max - min < best_width {
            best_width = max - min;
            best = i;
        }
    }
    best
}

/// Shifts every layout so left-biased ones share the minimum coordinate of `xss[align_to]` and
/// right-biased ones share its maximum.
pub fn align_coordinates(xss: &mut [Coordinates; 4], align_to: usize) {
    let bounds = |xs: &Coordinates| {
        xs.values().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
    };
    let (target_min, target_max) = bounds(&xss[align_to]);

    for (i, align) in Align::ALL.into_iter().enumerate() {
        if i == align_to {
            continue;
        }
        let (min, max) = bounds(&xss[i]);
        let delta = if align.is_left() {
            target_min - min
        } else {
            target_max - max
        };
        if delta != 0.0 {
            xss[i].values_mut().for_each(|x| *x += delta);
        }
    }
}

pub fn balance(xss: &[Coordinates; 4], align: Option<Align>) -> Coordinates {
    if let Some(align) = align {
        let ix = Align::ALL.iter().position(|&a| a == align).unwrap_or(0);
        return xss[ix].clone();
    }
    xss[0]
        .keys()
        .map(|v| {
            let mut candidates: Vec<f64> = xss
                .iter()
                .map(|xs| xs.get(v).copied().unwrap_or(0.0))
                .collect();
            candidates.sort_by(f64::total_cmp);
            (v.clone(), (candidates[1] + candidates[2]) / 2.0)
        })
        .collect()
}

/// Horizontal coordinates for every ranked node of a non-compound graph.
pub fn position_x(g: &LayoutGraph) -> Coordinates {
    let layering = build_layer_matrix(g);
    let mut conflicts = find_type1_conflicts(g, &layering);
    for (v, ws) in find_type2_conflicts(g, &layering) {
        conflicts.entry(v).or_default().extend(ws);
    }

    let mut xss: [Coordinates; 4] = Default::default();
    for (i, align) in Align::ALL.into_iter().enumerate() {
        let mut adjusted: Vec<Vec<String>> = if align.is_up() {
            layering.clone()
        } else {
            layering.iter().rev().cloned().collect()
        };
        if !align.is_left() {
            adjusted.iter_mut().for_each(|layer| layer.reverse());
        }

        let alignment = if align.is_up() {
            vertical_alignment(&adjusted, &conflicts, |v| g.predecessors(v))
        } else {
            vertical_alignment(&adjusted, &conflicts, |v| g.successors(v))
        };
        let mut xs = horizontal_compaction(g, &adjusted, &alignment, !align.is_left());
        if !align.is_left() {
            xs.values_mut().for_each(|x| *x = -*x);
        }
        trace!(?align, nodes = xs.len(), "alignment compacted");
        xss[i] = xs;
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, smallest);
    balance(&xss, g.graph().align)
}
