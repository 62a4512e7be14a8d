//! Labels of the spanning tree built by the tight-tree and network simplex rankers.

use crate::graphlib::{Graph, GraphOptions};

/// `low`/`lim` are postorder numbers: `u` is in the subtree of `v` iff
/// `v.low <= u.lim <= v.lim`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNodeLabel {
    pub low: i32,
    pub lim: i32,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeEdgeLabel {
    pub cutvalue: f64,
}

pub type Tree = Graph<TreeNodeLabel, TreeEdgeLabel, ()>;

pub fn new_tree() -> Tree {
    Graph::new(GraphOptions {
        directed: false,
        ..Default::default()
    })
}
