//! # graphxt-adapters
//!
//! Algorithm layer for GraphXT: the resumable step-algorithm contract, the
//! algorithms themselves, and the plugin registry that names them.
//!
//! ## Modules
//!
//! - [`plugins`] - Plugin registry and step algorithms

pub mod plugins;
