//! Document walk that fills the location table.
//!
//! Every structural node is viewed through [`NodeRef`], a closed enum over the
//! node kinds of a parsed document. Adding a kind forces every match below to
//! handle it.

use crate::error::Result;
use crate::index::locations::LocationTable;
use crate::index::types::*;
use tracing::trace;

/// Borrowed view of one node of a document tree
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Feature(&'a Feature),
    Rule(&'a Rule),
    Background(&'a Background),
    Scenario(&'a Scenario),
    Step(&'a Step),
    Examples(&'a Examples),
    TableRow(&'a TableRow),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> Option<&'a str> {
        match *self {
            NodeRef::Feature(f) => f.id.as_deref(),
            NodeRef::Rule(r) => Some(&r.id),
            NodeRef::Background(b) => Some(&b.id),
            NodeRef::Scenario(s) => Some(&s.id),
            NodeRef::Step(s) => Some(&s.id),
            NodeRef::Examples(e) => Some(&e.id),
            NodeRef::TableRow(r) => Some(&r.id),
        }
    }

    pub fn location(&self) -> Option<Location> {
        match *self {
            NodeRef::Feature(f) => f.location,
            NodeRef::Rule(r) => Some(r.location),
            NodeRef::Background(b) => Some(b.location),
            NodeRef::Scenario(s) => Some(s.location),
            NodeRef::Step(s) => Some(s.location),
            NodeRef::Examples(e) => Some(e.location),
            NodeRef::TableRow(r) => Some(r.location),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Feature(_) => "feature",
            NodeRef::Rule(_) => "rule",
            NodeRef::Background(_) => "background",
            NodeRef::Scenario(_) => "scenario",
            NodeRef::Step(_) => "step",
            NodeRef::Examples(_) => "examples",
            NodeRef::TableRow(_) => "table_row",
        }
    }

    /// Direct children in document order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Feature(f) => f
                .children
                .iter()
                .map(|child| match child {
                    FeatureChild::Rule(r) => NodeRef::Rule(r),
                    FeatureChild::Background(b) => NodeRef::Background(b),
                    FeatureChild::Scenario(s) => NodeRef::Scenario(s),
                })
                .collect(),
            NodeRef::Rule(r) => r
                .children
                .iter()
                .map(|child| match child {
                    RuleChild::Background(b) => NodeRef::Background(b),
                    RuleChild::Scenario(s) => NodeRef::Scenario(s),
                })
                .collect(),
            NodeRef::Background(b) => b.steps.iter().map(NodeRef::Step).collect(),
            NodeRef::Scenario(s) => s
                .steps
                .iter()
                .map(NodeRef::Step)
                .chain(s.examples.iter().map(NodeRef::Examples))
                .collect(),
            NodeRef::Examples(e) => e
                .table_header
                .iter()
                .chain(e.table_body.iter())
                .map(NodeRef::TableRow)
                .collect(),
            NodeRef::Step(_) | NodeRef::TableRow(_) => Vec::new(),
        }
    }
}

/// Visit every node of the document depth-first, parents before children
pub fn walk<'a>(document: &'a SourceDocument, mut visit: impl FnMut(NodeRef<'a>)) {
    let Some(feature) = document.feature.as_ref() else {
        return;
    };

    let mut stack = vec![NodeRef::Feature(feature)];
    while let Some(node) = stack.pop() {
        visit(node);
        // Reverse so the first child is visited next
        stack.extend(node.children().into_iter().rev());
    }
}

/// Record the location of every identified, located node of a document.
///
/// Returns the number of nodes visited that carried both an id and a location.
pub fn index_document(table: &mut LocationTable, document: &SourceDocument) -> Result<usize> {
    let mut nodes = Vec::new();
    walk(document, |node| nodes.push(node));

    let mut recorded = 0;
    for node in nodes {
        let (Some(id), Some(location)) = (node.id(), node.location()) else {
            continue;
        };
        trace!(uri = %document.uri, kind = node.kind(), id, %location, "recording node");
        table.record(id, location)?;
        recorded += 1;
    }

    Ok(recorded)
}
