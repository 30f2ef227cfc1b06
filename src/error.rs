//! Error types shared by the index, the message stream and the build driver.

use crate::index::types::{ArtifactId, Location, NodeId};
use thiserror::Error;

/// Conditions raised by the index itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Location queried for a node that was never recorded
    #[error("no location recorded for node {node_id}")]
    NotFound { node_id: NodeId },

    /// An artifact references a node that is not in the location table yet
    #[error("artifact {artifact_id} references unknown node {node_id}")]
    DanglingReference {
        artifact_id: ArtifactId,
        node_id: NodeId,
    },

    /// The same node recorded twice with different locations
    #[error("node {node_id} already recorded at {existing}, refusing {attempted}")]
    ConflictingRecord {
        node_id: NodeId,
        existing: Location,
        attempted: Location,
    },
}

impl IndexError {
    /// Whether the error leaves the index unusable
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IndexError::NotFound { .. })
    }
}

/// Failures while decoding the update stream
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message #{message}: {source}")]
    Malformed {
        message: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("message #{message} is {len} bytes, limit is {limit}")]
    TooLarge {
        message: usize,
        len: usize,
        limit: usize,
    },
}

/// Failures while applying a whole stream to an index
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("update #{message} rejected: {source}")]
    Update {
        message: usize,
        #[source]
        source: IndexError,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
