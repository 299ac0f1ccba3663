use core::fmt;

/// Errors occurring while canonicalising a set of directed edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// A degenerate edge has a different number of outgoing and incoming
    /// copies, which the sibling-pair policy cannot reconcile.
    InconsistentDegenerateEdges,
    /// Undirected degenerate edges must come in pairs.
    OddUndirectedDegenerate,
    /// The sibling-pair policy requires every edge to have its reverse, and
    /// one is missing.
    MissingSibling,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InconsistentDegenerateEdges => {
                write!(f, "inconsistent number of degenerate edge copies")
            }
            Self::OddUndirectedDegenerate => {
                write!(f, "odd number of undirected degenerate edges")
            }
            Self::MissingSibling => write!(f, "expected a sibling edge pair"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
