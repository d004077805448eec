//! Vertex type.

use graphxt_common::types::VertexId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A vertex holding a payload.
///
/// Equality and hashing look at the payload only: two vertices carrying
/// equal payloads are the same vertex, whatever their ids.
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    /// Arena id inside the owning graph.
    pub id: VertexId,
    /// The payload, which is also the vertex identity.
    pub payload: T,
}

impl<T> Vertex<T> {
    /// Creates a new vertex.
    #[must_use]
    pub fn new(id: VertexId, payload: T) -> Self {
        Self { id, payload }
    }
}

impl<T: PartialEq> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl<T: Eq> Eq for Vertex<T> {}

impl<T: Hash> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.payload.hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.payload.fmt(f)
    }
}
