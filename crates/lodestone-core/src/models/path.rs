use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{GRAPH_STORE, VECTOR_STORE};

/// One of the two independent retrieval backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Vector,
    Graph,
}

impl PathKind {
    pub const BOTH: [PathKind; 2] = [PathKind::Vector, PathKind::Graph];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Graph => "graph",
        }
    }

    /// Breaker guarding this path's backend.
    pub fn dependency(self) -> &'static str {
        match self {
            Self::Vector => VECTOR_STORE,
            Self::Graph => GRAPH_STORE,
        }
    }

    pub fn other(self) -> PathKind {
        match self {
            Self::Vector => Self::Graph,
            Self::Graph => Self::Vector,
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
