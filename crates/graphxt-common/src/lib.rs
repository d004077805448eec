//! # graphxt-common
//!
//! Foundation layer for GraphXT: identifiers, errors, and utilities.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Identifier types ([`VertexId`], [`EdgeId`])
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{EdgeId, VertexId};
pub use utils::error::{Error, Result};
