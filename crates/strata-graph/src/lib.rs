//! Compound multigraph container used by `strata`.
//!
//! The container keeps nodes and edges in insertion order, maintains in/out adjacency
//! incrementally, and optionally tracks a parent/child forest for compound graphs.

mod graph;

pub use graph::{EdgeKey, Graph, GraphError, GraphOptions, Result, alg};
