//! Arena slots for [`Graph`](super::Graph).
//!
//! Slots are never reused: removing a node or edge leaves a tombstone so that indices held by
//! adjacency lists of other entries stay valid.

use super::EdgeKey;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<N> {
    pub(in crate::graph) id: String,
    pub(in crate::graph) label: N,
    pub(in crate::graph) in_edges: Vec<usize>,
    pub(in crate::graph) out_edges: Vec<usize>,
    pub(in crate::graph) parent: Option<usize>,
    pub(in crate::graph) children: Vec<usize>,
}

impl<N> NodeEntry<N> {
    pub(in crate::graph) fn new(id: String, label: N) -> Self {
        Self {
            id,
            label,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) v_ix: usize,
    pub(in crate::graph) w_ix: usize,
    pub(in crate::graph) label: E,
}
