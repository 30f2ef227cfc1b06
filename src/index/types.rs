use crate::stream::protocol::{Framing, DEFAULT_MAX_MESSAGE_BYTES};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a source node (scenario, step, example row, ...)
pub type NodeId = String;

/// Opaque identifier of a compiled artifact or artifact step
pub type ArtifactId = String;

/// 1-based position of a node in its source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    #[serde(default = "default_column")]
    pub column: u32,
}

fn default_column() -> u32 {
    1
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed source unit, as emitted by the document producer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<FeatureChild>,
}

/// Child of a feature, externally tagged on the wire (`{"scenario": {...}}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureChild {
    Rule(Rule),
    Background(Background),
    Scenario(Scenario),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<RuleChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleChild {
    Background(Background),
    Scenario(Scenario),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A scenario, or a scenario outline when `examples` is non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub examples: Vec<Examples>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Examples {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_header: Option<TableRow>,
    #[serde(default)]
    pub table_body: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: NodeId,
    pub location: Location,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub value: String,
}

/// Compiled executable case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: ArtifactId,
    pub uri: String,
    #[serde(default)]
    pub name: String,
    /// Contributing nodes, least specific first. The last one is the effective location.
    #[serde(default, alias = "astNodeIds")]
    pub source_node_ids: Vec<NodeId>,
    #[serde(default)]
    pub steps: Vec<ArtifactStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactStep {
    pub id: ArtifactId,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "astNodeIds")]
    pub source_node_ids: Vec<NodeId>,
}

/// One unit of the update stream
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Document(SourceDocument),
    Artifact(Artifact),
}

impl From<SourceDocument> for Update {
    fn from(document: SourceDocument) -> Self {
        Update::Document(document)
    }
}

impl From<Artifact> for Update {
    fn from(artifact: Artifact) -> Self {
        Update::Artifact(artifact)
    }
}

/// Counters describing the contents of an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub nodes: usize,
    pub artifacts: usize,
    pub artifact_steps: usize,
}

/// How an update stream is decoded into an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub framing: Framing,
    /// Largest single message accepted, in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

fn default_max_message_bytes() -> usize {
    DEFAULT_MAX_MESSAGE_BYTES
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}
