use crate::error::BuildError;
use crate::index::types::{IndexConfig, Update};
use crate::index::writer::SourceIndex;
use crate::stream::MessageReader;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Build an index from an encoded update stream.
///
/// Stops at the first decoding or indexing error; the partially built index is
/// dropped.
pub fn build_index<R: BufRead>(reader: R, config: &IndexConfig) -> Result<SourceIndex, BuildError> {
    let start = Instant::now();
    let mut messages =
        MessageReader::new(reader, config.framing).with_max_message_bytes(config.max_message_bytes);
    let mut index = SourceIndex::new();

    while let Some(update) = messages.next() {
        let update = update?;
        if let Err(source) = index.update(&update) {
            let message = messages.messages_read();
            error!(message_number = message, %source, "update rejected, abandoning stream");
            return Err(BuildError::Update { message, source });
        }
    }

    let stats = index.stats();
    info!(
        messages = messages.messages_read(),
        documents = stats.documents,
        nodes = stats.nodes,
        artifacts = stats.artifacts,
        artifact_steps = stats.artifact_steps,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index built"
    );
    Ok(index)
}

/// Apply already decoded updates in order, failing fast
pub fn apply_updates<I>(index: &mut SourceIndex, updates: I) -> Result<(), BuildError>
where
    I: IntoIterator<Item = Update>,
{
    for (i, update) in updates.into_iter().enumerate() {
        index
            .update(&update)
            .map_err(|source| BuildError::Update {
                message: i + 1,
                source,
            })?;
    }
    Ok(())
}

/// Build an index from a file, or from stdin when `path` is `-`
pub fn build_index_from_path(path: &Path, config: &IndexConfig) -> Result<SourceIndex> {
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        return build_index(stdin.lock(), config).context("Failed to index stdin");
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    build_index(BufReader::new(file), config)
        .with_context(|| format!("Failed to index {}", path.display()))
}
