//! # graphxt-core
//!
//! Core layer for GraphXT: the graph model, the display surface contract,
//! and index structures used by the step algorithms.
//!
//! This crate depends only on `graphxt-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Vertex / Edge / Graph with payload-based vertex identity
//! - [`display`] - Annotations emitted by algorithms and the in-memory surface
//! - [`index`] - Index structures (indexed min-heap with decrease-key)

pub mod display;
pub mod graph;
pub mod index;

// Re-export commonly used types
pub use display::{Annotation, DisplayState, Element, Surface};
pub use graph::{Edge, Graph, GraphConfig, Payload, Vertex, Weight};
pub use index::IndexedMinHeap;
