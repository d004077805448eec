//! Core type definitions for GraphXT.
//!
//! Vertices and edges live in arenas and are addressed by opaque ids
//! ([`VertexId`], [`EdgeId`]). Payload identity is handled one layer up,
//! in the graph model.

mod id;

pub use id::{EdgeId, VertexId};
