use thiserror::Error;

/// Errors raised while building a [`crate::Graph`] from an edge list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge ({u}, {v}) references non-positive vertex {vertex}")]
    NonPositiveVertex { u: i64, v: i64, vertex: i64 },
    #[error("vertex {vertex} exceeds the graph size {size}")]
    VertexOutOfRange { vertex: usize, size: usize },
}

/// Errors raised by the input reader
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed input: {0}")]
    Syntax(String),
    #[error("expected {expected} {section} edges, found {found}")]
    MissingEdges {
        section: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Errors raised by the breadth-first transform search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("state limit of {limit} exceeded before the target was reached")]
    StateLimitExceeded { limit: usize },
    #[error("permutation size mismatch: expected {expected}, got {found}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Umbrella error for a full solve
#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
