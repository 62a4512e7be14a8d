//! Labels of the rank-local graphs the ordering sweeps sort.

use crate::graphlib::Graph;

/// Which neighbours a layer graph pulls in: the rank above (`InEdges`, downward sweeps) or the
/// rank below (`OutEdges`, upward sweeps). Either way the neighbours end up as predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGraphLabel {
    pub root: String,
}

/// A node of a layer graph. Subgraph nodes carry their border nodes on the graph's rank
/// instead of an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNode {
    pub order: Option<usize>,
    pub border_left: Option<String>,
    pub border_right: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightLabel {
    pub weight: f64,
}

pub type LayerGraph = Graph<LayerNode, WeightLabel, LayerGraphLabel>;

/// Precedence constraints between sibling subgraphs: an edge `a -> b` keeps `a` left of `b`.
pub type ConstraintGraph = Graph<(), (), ()>;

/// Barycenter of a movable node over its neighbours on the fixed rank. Nodes without such
/// neighbours have none.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// A run of nodes that is sorted as one unit. `i` is the smallest input position among them.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub vs: Vec<String>,
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortResult {
    pub vs: Vec<String>,
    pub barycenter: Option<f64>,
    pub weight: f64,
}
