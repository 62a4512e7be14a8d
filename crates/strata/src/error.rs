use crate::graphlib::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("no low/lim numbers recorded for {node}")]
    MissingLowLim { node: String },
    #[error("cannot intersect the rectangle centered at ({x}, {y}) from its own center")]
    IntersectAtCenter { x: f64, y: f64 },
    #[error("dummy node {node} is missing its {expected} back-reference")]
    MissingBackReference { node: String, expected: &'static str },
    #[error("subgraph {node} has no {side} border node")]
    MissingBorder { node: String, side: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
