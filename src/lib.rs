//! # scenario-index - source-to-test-case index
//!
//! Indexes parsed scenario documents together with the executable cases
//! compiled from them, and answers in O(1):
//!
//! - where in source a node is,
//! - which cases came from a source line or node,
//! - which case steps came from a source line or step node.
//!
//! A scenario outline with N example rows compiles to N cases; a background
//! step is shared by every case of its feature. The index keeps those
//! one-to-many links in deterministic arrival order without duplicates.
//!
//! ## Architecture
//!
//! - [`index`] - Location table, document walk, artifact multi-maps, build driver
//! - [`query`] - Read-only query facade
//! - [`stream`] - Decoding of the update stream (NDJSON or length-prefixed JSON)
//! - [`output`] - Result formatting for the CLI
//! - [`logging`] - `tracing-subscriber` setup
//! - [`utils`] - Configuration file handling
//!
//! ## Quick Start
//!
//! ```ignore
//! use scenario_index::index::{IndexConfig, build::build_index};
//! use scenario_index::query::QueryExecutor;
//! use std::io::BufReader;
//!
//! let file = std::fs::File::open("messages.ndjson")?;
//! let index = build_index(BufReader::new(file), &IndexConfig::default())?;
//!
//! let query = QueryExecutor::new(&index);
//! for id in query.artifact_ids_at_line("features/hello.feature", 2) {
//!     println!("{}", id);
//! }
//! ```
//!
//! Updates must arrive in stream order: a document before the artifacts
//! compiled from it. Violations surface as [`IndexError::DanglingReference`].

pub mod error;
pub mod index;
pub mod logging;
pub mod output;
pub mod query;
pub mod stream;
pub mod utils;

pub use error::{BuildError, IndexError, StreamError};
pub use index::{SourceIndex, Update};
pub use query::QueryExecutor;
