use crate::error::Result;
use crate::index::artifacts::ArtifactIndex;
use crate::index::document::index_document;
use crate::index::locations::LocationTable;
use crate::index::types::*;
use tracing::debug;

/// In-memory index over documents and the artifacts compiled from them.
///
/// Built by feeding [`Update`]s in stream order: a document always precedes
/// the artifacts compiled from it. The first error leaves the index in an
/// undefined state and the stream should be abandoned.
#[derive(Debug, Default)]
pub struct SourceIndex {
    locations: LocationTable,
    artifacts: ArtifactIndex,
    /// Document uris in arrival order
    uris: Vec<String>,
}

impl SourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update from the stream
    pub fn update(&mut self, update: &Update) -> Result<()> {
        match update {
            Update::Document(document) => self.add_document(document),
            Update::Artifact(artifact) => self.add_artifact(artifact),
        }
    }

    pub fn add_document(&mut self, document: &SourceDocument) -> Result<()> {
        let recorded = index_document(&mut self.locations, document)?;
        if !self.uris.contains(&document.uri) {
            self.uris.push(document.uri.clone());
        }
        debug!(uri = %document.uri, nodes = recorded, "indexed document");
        Ok(())
    }

    pub fn add_artifact(&mut self, artifact: &Artifact) -> Result<()> {
        self.artifacts.index_artifact(&self.locations, artifact)?;
        Ok(())
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn artifacts(&self) -> &ArtifactIndex {
        &self.artifacts
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.uris.len(),
            nodes: self.locations.len(),
            artifacts: self.artifacts.artifact_count(),
            artifact_steps: self.artifacts.step_count(),
        }
    }
}
