//! Plugin system for GraphXT.
//!
//! This module provides the algorithm registry and the algorithms it
//! exposes.
//!
//! ## Modules
//!
//! - [`algorithms`] - Step algorithms (BFS, DFS, Dijkstra, MST, flow, topological sort)

pub mod algorithms;
mod registry;

pub use registry::{Factory, PluginEntry, PluginRegistry};
