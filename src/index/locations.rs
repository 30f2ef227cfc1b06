use crate::error::{IndexError, Result};
use crate::index::types::{Location, NodeId};
use rustc_hash::FxHashMap;

/// Node id -> source position
#[derive(Debug, Default)]
pub struct LocationTable {
    locations: FxHashMap<NodeId, Location>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a node lives. Re-recording the same location is a no-op.
    pub fn record(&mut self, node_id: &str, location: Location) -> Result<()> {
        match self.locations.get(node_id) {
            Some(&existing) if existing == location => Ok(()),
            Some(&existing) => Err(IndexError::ConflictingRecord {
                node_id: node_id.to_string(),
                existing,
                attempted: location,
            }),
            None => {
                self.locations.insert(node_id.to_string(), location);
                Ok(())
            }
        }
    }

    /// Location of a recorded node, `NotFound` otherwise
    pub fn lookup(&self, node_id: &str) -> Result<Location> {
        self.get(node_id).ok_or_else(|| IndexError::NotFound {
            node_id: node_id.to_string(),
        })
    }

    #[inline]
    pub fn get(&self, node_id: &str) -> Option<Location> {
        self.locations.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.locations.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
