use crate::error::Result;
use crate::index::types::{ArtifactId, IndexStats, Location};
use crate::index::writer::SourceIndex;

/// Read-only queries over a built [`SourceIndex`].
///
/// Every lookup is a hash probe returning a borrowed slice. Unknown ids, uris
/// and lines yield an empty slice; only [`QueryExecutor::location`] treats
/// absence as an error.
#[derive(Debug, Clone, Copy)]
pub struct QueryExecutor<'a> {
    index: &'a SourceIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a SourceIndex) -> Self {
        Self { index }
    }

    /// Source position of a node
    pub fn location(&self, node_id: &str) -> Result<Location> {
        self.index.locations().lookup(node_id)
    }

    /// Every artifact compiled from a document, once each, in arrival order
    pub fn artifact_ids(&self, uri: &str) -> &'a [ArtifactId] {
        self.index.artifacts().artifacts_for_uri(uri)
    }

    /// Artifacts whose effective location is on `line`
    pub fn artifact_ids_at_line(&self, uri: &str, line: u32) -> &'a [ArtifactId] {
        self.index.artifacts().artifacts_at_line(uri, line)
    }

    /// Artifacts that reference `node_id` at any specificity
    pub fn artifact_ids_from_node(&self, node_id: &str) -> &'a [ArtifactId] {
        self.index.artifacts().artifacts_for_node(node_id)
    }

    /// Artifact steps whose effective location is on `line`
    pub fn artifact_step_ids_at_line(&self, uri: &str, line: u32) -> &'a [ArtifactId] {
        self.index.artifacts().steps_at_line(uri, line)
    }

    /// Artifact steps that reference `node_id`
    pub fn artifact_step_ids_from_node(&self, node_id: &str) -> &'a [ArtifactId] {
        self.index.artifacts().steps_for_node(node_id)
    }

    pub fn uris(&self) -> &'a [String] {
        self.index.uris()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
