//! Wire format for the update stream
//!
//! Two framings are understood:
//! - `ndjson`: one JSON envelope per line, blank lines ignored
//! - `length-prefixed`: 4 bytes (little-endian u32) message length, then N bytes of JSON

use crate::index::types::{Artifact, SourceDocument, Update};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::warn;

/// Default cap on a single message
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 100 * 1024 * 1024;

/// How messages are delimited on the byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    #[default]
    Ndjson,
    LengthPrefixed,
}

impl std::str::FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ndjson" | "jsonl" => Ok(Framing::Ndjson),
            "length-prefixed" | "lp" => Ok(Framing::LengthPrefixed),
            other => Err(format!(
                "unknown framing '{}', expected 'ndjson' or 'length-prefixed'",
                other
            )),
        }
    }
}

/// One message of the stream.
///
/// Producers emit many kinds of envelope; only documents and artifacts matter
/// to the index; everything else deserializes to an empty envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default, alias = "gherkinDocument", skip_serializing_if = "Option::is_none")]
    pub document: Option<SourceDocument>,
    #[serde(default, alias = "pickle", skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
}

impl Envelope {
    /// The update carried by this envelope. A document wins over an artifact.
    pub fn into_update(self) -> Option<Update> {
        match (self.document, self.artifact) {
            (Some(document), Some(artifact)) => {
                warn!(
                    uri = %document.uri,
                    artifact = %artifact.id,
                    "envelope carries both a document and an artifact, dropping the artifact"
                );
                Some(Update::Document(document))
            }
            (Some(document), None) => Some(Update::Document(document)),
            (None, Some(artifact)) => Some(Update::Artifact(artifact)),
            (None, None) => None,
        }
    }
}

impl From<Update> for Envelope {
    fn from(update: Update) -> Self {
        match update {
            Update::Document(document) => Envelope {
                document: Some(document),
                artifact: None,
            },
            Update::Artifact(artifact) => Envelope {
                document: None,
                artifact: Some(artifact),
            },
        }
    }
}

/// Write a message to a stream with length prefix
pub fn write_message<W: Write>(writer: &mut W, msg: &impl Serialize) -> std::io::Result<()> {
    let json = serde_json::to_vec(msg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let len = json.len() as u32;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()?;

    Ok(())
}

/// Write a message as a single NDJSON line
pub fn write_line<W: Write>(writer: &mut W, msg: &impl Serialize) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, msg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Read the length prefix of the next frame.
///
/// Returns `Ok(None)` on a clean end of stream (no bytes of a new frame read).
pub fn read_frame_len<R: Read>(reader: &mut R) -> std::io::Result<Option<usize>> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "truncated length prefix",
                ));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(u32::from_le_bytes(len_buf) as usize))
}

/// Read the raw body of a length-prefixed frame, `Ok(None)` at end of stream
pub fn read_frame<R: Read>(reader: &mut R, max_len: usize) -> std::io::Result<Option<Vec<u8>>> {
    let Some(len) = read_frame_len(reader)? else {
        return Ok(None);
    };

    if len > max_len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("message of {} bytes exceeds limit of {}", len, max_len),
        ));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(Some(buf))
}

/// Read a message from a stream with length prefix
pub fn read_message<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> std::io::Result<T> {
    let buf = read_frame(reader, DEFAULT_MAX_MESSAGE_BYTES)?.ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "end of stream")
    })?;

    serde_json::from_slice(&buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
