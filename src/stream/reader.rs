use crate::error::StreamError;
use crate::index::types::Update;
use crate::stream::protocol::{read_frame_len, Envelope, Framing, DEFAULT_MAX_MESSAGE_BYTES};
use std::io::{BufRead, Read};
use std::ops::Range;
use tracing::trace;

/// Iterator over the index updates carried by a byte stream.
///
/// Envelopes that carry neither a document nor an artifact are skipped. The
/// iterator stops after the first error.
pub struct MessageReader<R> {
    reader: R,
    framing: Framing,
    max_message_bytes: usize,
    buf: Vec<u8>,
    /// Messages read so far, including skipped ones
    messages: usize,
    done: bool,
}

impl<R: BufRead> MessageReader<R> {
    pub fn new(reader: R, framing: Framing) -> Self {
        Self {
            reader,
            framing,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            buf: Vec::new(),
            messages: 0,
            done: false,
        }
    }

    pub fn with_max_message_bytes(mut self, limit: usize) -> Self {
        self.max_message_bytes = limit;
        self
    }

    /// 1-based number of the last message read
    pub fn messages_read(&self) -> usize {
        self.messages
    }

    /// Read the next envelope, `Ok(None)` at end of stream
    pub fn next_envelope(&mut self) -> Result<Option<Envelope>, StreamError> {
        let body = match self.framing {
            Framing::Ndjson => self.next_line()?,
            Framing::LengthPrefixed => self.next_frame()?,
        };
        let Some(body) = body else {
            return Ok(None);
        };

        let envelope =
            serde_json::from_slice(&self.buf[body]).map_err(|source| StreamError::Malformed {
                message: self.messages,
                source,
            })?;
        Ok(Some(envelope))
    }

    /// Fill `buf` with the next non-blank line, returning the trimmed range
    fn next_line(&mut self) -> Result<Option<Range<usize>>, StreamError> {
        let limit = self.max_message_bytes;
        loop {
            self.buf.clear();
            let read = self
                .reader
                .by_ref()
                .take((limit as u64).saturating_add(1))
                .read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }

            let terminated = self.buf.last() == Some(&b'\n');
            if !terminated && self.buf.len() > limit {
                self.messages += 1;
                return Err(StreamError::TooLarge {
                    message: self.messages,
                    len: self.buf.len(),
                    limit,
                });
            }

            let start = self.buf.iter().position(|b| !b.is_ascii_whitespace());
            let end = self.buf.iter().rposition(|b| !b.is_ascii_whitespace());
            if let (Some(start), Some(end)) = (start, end) {
                self.messages += 1;
                return Ok(Some(start..end + 1));
            }
        }
    }

    /// Fill `buf` with the next frame body
    fn next_frame(&mut self) -> Result<Option<Range<usize>>, StreamError> {
        let Some(len) = read_frame_len(&mut self.reader)? else {
            return Ok(None);
        };
        self.messages += 1;

        if len > self.max_message_bytes {
            return Err(StreamError::TooLarge {
                message: self.messages,
                len,
                limit: self.max_message_bytes,
            });
        }

        self.buf.resize(len, 0);
        self.reader.read_exact(&mut self.buf)?;
        Ok(Some(0..len))
    }
}

impl<R: BufRead> Iterator for MessageReader<R> {
    type Item = Result<Update, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.next_envelope() {
                Ok(Some(envelope)) => match envelope.into_update() {
                    Some(update) => return Some(Ok(update)),
                    None => trace!(message_number = self.messages, "skipping envelope"),
                },
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
