//! Multi-maps from source nodes and source lines to compiled artifacts.

use crate::error::{IndexError, Result};
use crate::index::locations::LocationTable;
use crate::index::types::{Artifact, ArtifactId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// uri -> line -> ids, in arrival order
type LineMap = FxHashMap<String, FxHashMap<u32, Vec<ArtifactId>>>;

/// Append-only indexes over every artifact seen so far
#[derive(Debug, Default)]
pub struct ArtifactIndex {
    artifacts_by_node: FxHashMap<NodeId, Vec<ArtifactId>>,
    artifacts_by_location: LineMap,
    artifact_order_per_uri: FxHashMap<String, Vec<ArtifactId>>,
    step_artifacts_by_node: FxHashMap<NodeId, Vec<ArtifactId>>,
    step_artifacts_by_location: LineMap,
    seen: FxHashSet<ArtifactId>,
    step_count: usize,
}

/// Effective line of an artifact or step, resolved before anything is written
struct Resolved<'a> {
    id: &'a str,
    node_ids: &'a [NodeId],
    line: Option<u32>,
}

impl ArtifactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one artifact and its steps.
    ///
    /// Every referenced node must already be in `locations`. References are
    /// checked up front, so a rejected artifact leaves the maps untouched.
    /// Returns `false` when the artifact had already been indexed.
    pub fn index_artifact(
        &mut self,
        locations: &LocationTable,
        artifact: &Artifact,
    ) -> Result<bool> {
        if self.seen.contains(&artifact.id) {
            warn!(artifact = %artifact.id, "artifact already indexed, skipping");
            return Ok(false);
        }

        let case = resolve(locations, &artifact.id, &artifact.id, &artifact.source_node_ids)?;
        let steps = artifact
            .steps
            .iter()
            .map(|step| resolve(locations, &artifact.id, &step.id, &step.source_node_ids))
            .collect::<Result<Vec<_>>>()?;

        let uri = artifact.uri.as_str();

        append_by_node(&mut self.artifacts_by_node, &case);
        append_by_line(&mut self.artifacts_by_location, uri, &case);
        // `seen` keeps each artifact id out of here after its first arrival
        self.artifact_order_per_uri
            .entry(uri.to_string())
            .or_default()
            .push(case.id.to_string());

        for step in &steps {
            append_by_node(&mut self.step_artifacts_by_node, step);
            append_by_line(&mut self.step_artifacts_by_location, uri, step);
        }

        self.seen.insert(artifact.id.clone());
        self.step_count += steps.len();

        debug!(
            artifact = %artifact.id,
            uri,
            line = ?case.line,
            steps = steps.len(),
            "indexed artifact"
        );
        Ok(true)
    }

    pub fn artifacts_for_uri(&self, uri: &str) -> &[ArtifactId] {
        self.artifact_order_per_uri
            .get(uri)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn artifacts_at_line(&self, uri: &str, line: u32) -> &[ArtifactId] {
        lookup_line(&self.artifacts_by_location, uri, line)
    }

    pub fn artifacts_for_node(&self, node_id: &str) -> &[ArtifactId] {
        self.artifacts_by_node
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn steps_at_line(&self, uri: &str, line: u32) -> &[ArtifactId] {
        lookup_line(&self.step_artifacts_by_location, uri, line)
    }

    pub fn steps_for_node(&self, node_id: &str) -> &[ArtifactId] {
        self.step_artifacts_by_node
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn artifact_count(&self) -> usize {
        self.seen.len()
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

fn resolve<'a>(
    locations: &LocationTable,
    artifact_id: &str,
    id: &'a str,
    node_ids: &'a [NodeId],
) -> Result<Resolved<'a>> {
    for node_id in node_ids {
        if !locations.contains(node_id) {
            return Err(IndexError::DanglingReference {
                artifact_id: artifact_id.to_string(),
                node_id: node_id.clone(),
            });
        }
    }

    let line = node_ids
        .last()
        .and_then(|last| locations.get(last))
        .map(|location| location.line);

    Ok(Resolved { id, node_ids, line })
}

fn append_by_node(map: &mut FxHashMap<NodeId, Vec<ArtifactId>>, entry: &Resolved<'_>) {
    for node_id in entry.node_ids {
        let ids = map.entry(node_id.clone()).or_default();
        // Arrivals are ordered, so a repeat can only be the tail
        if ids.last().map(String::as_str) != Some(entry.id) {
            ids.push(entry.id.to_string());
        }
    }
}

fn append_by_line(map: &mut LineMap, uri: &str, entry: &Resolved<'_>) {
    let Some(line) = entry.line else {
        return;
    };
    map.entry(uri.to_string())
        .or_default()
        .entry(line)
        .or_default()
        .push(entry.id.to_string());
}

fn lookup_line<'m>(map: &'m LineMap, uri: &str, line: u32) -> &'m [ArtifactId] {
    map.get(uri)
        .and_then(|lines| lines.get(&line))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
