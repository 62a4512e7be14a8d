//! Rank assignment.
//!
//! Every ranker produces integer ranks with `rank(w) - rank(v) >= minlen` for each edge `v -> w`.
//! The input must be acyclic and non-compound.

pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::{LayoutGraph, Ranker};
use tracing::instrument;

pub use feasible_tree::feasible_tree;
pub use network_simplex::network_simplex;
pub use util::{longest_path, slack};

#[instrument(skip_all, name = "rank")]
pub fn rank(g: &mut LayoutGraph) {
    match g.graph().ranker {
        Ranker::NetworkSimplex => network_simplex(g),
        Ranker::TightTree => {
            longest_path(g);
            feasible_tree(g);
        }
        Ranker::LongestPath => longest_path(g),
    }
}
