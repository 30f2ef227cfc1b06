//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading (XDG-compliant)

pub mod app_data;

pub use app_data::*;
