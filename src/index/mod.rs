pub mod artifacts;
pub mod build;
pub mod document;
pub mod locations;
pub mod stats;
pub mod types;
pub mod writer;

pub use artifacts::ArtifactIndex;
pub use locations::LocationTable;
pub use types::*;
pub use writer::SourceIndex;
