//! Precondition failures reported by the graph container.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("cannot set named edge {v} -> {w} ({name}) when multigraph = false")]
    NamedEdgeOnSimpleGraph { v: String, w: String, name: String },
    #[error("cannot set parent of {child} in a non-compound graph")]
    NotCompound { child: String },
    #[error("setting {parent} as parent of {child} would create a cycle")]
    ParentCycle { child: String, parent: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
