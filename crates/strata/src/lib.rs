//! Layered directed graph layout.
//!
//! [`layout`] assigns coordinates to the nodes of a [`LayoutGraph`] and via-points to its edges.
//! Subgraphs (nodes with children in a compound graph) are kept contiguous and sized to enclose
//! their members.

pub use strata_graph as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod model;

pub mod acyclic;
pub mod border_segments;
pub mod coordinate_system;
pub mod greedy_fas;
pub mod nesting_graph;
pub mod normalize;
pub mod order;
pub mod parent_dummy_chains;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

mod pipeline;

pub use error::{Error, Result};
pub use model::{
    Acyclicer, Align, BorderSide, Dummy, EdgeLabel, GraphLabel, LabelPos, LayoutGraph, NodeLabel,
    Point, RankDir, Ranker, SelfEdge,
};
pub use pipeline::layout;
