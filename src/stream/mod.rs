//! Decoding of the update stream.
//!
//! Documents and compiled artifacts reach the index as JSON envelopes on a
//! byte stream. This module only turns bytes into [`Update`]s; applying them
//! is the job of [`crate::index::build`].
//!
//! [`Update`]: crate::index::types::Update

pub mod protocol;
pub mod reader;

pub use protocol::{
    read_frame, read_message, write_line, write_message, Envelope, Framing,
    DEFAULT_MAX_MESSAGE_BYTES,
};
pub use reader::MessageReader;
