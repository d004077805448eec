//! Edge type.

use graphxt_common::types::{EdgeId, VertexId};

/// Structural identity of an edge.
///
/// Two edges with the same endpoints, payload, and direction flag are the
/// same edge; the graph keeps one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey<W> {
    /// Start vertex.
    pub start: VertexId,
    /// End vertex.
    pub end: VertexId,
    /// Whether the edge only runs start → end.
    pub directed: bool,
    /// Edge payload.
    pub payload: W,
}

/// An edge between two vertices of a graph.
///
/// Endpoints are stored as vertex ids. Inside one graph, ids and payloads
/// are in one-to-one correspondence, so comparing ids compares payloads.
#[derive(Debug, Clone)]
pub struct Edge<W> {
    /// Arena id inside the owning graph.
    pub id: EdgeId,
    /// Start vertex.
    pub start: VertexId,
    /// End vertex.
    pub end: VertexId,
    /// Whether the edge only runs start → end.
    pub directed: bool,
    /// Edge payload (typically a weight).
    pub payload: W,
}

impl<W> Edge<W> {
    /// Creates a new edge.
    #[must_use]
    pub fn new(id: EdgeId, start: VertexId, end: VertexId, directed: bool, payload: W) -> Self {
        Self {
            id,
            start,
            end,
            directed,
            payload,
        }
    }

    /// Returns true if `v` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        self.start == v || self.end == v
    }

    /// Returns the endpoint opposite to `v`.
    ///
    /// For a vertex that is not an endpoint this returns the start vertex.
    #[inline]
    #[must_use]
    pub fn opposite(&self, v: VertexId) -> VertexId {
        if self.start == v { self.end } else { self.start }
    }

    /// Returns true if the edge can be walked away from `v`.
    #[inline]
    #[must_use]
    pub fn leaves(&self, v: VertexId) -> bool {
        if self.directed {
            self.start == v
        } else {
            self.contains(v)
        }
    }

    /// Returns true if the edge can be walked into `v`.
    #[inline]
    #[must_use]
    pub fn enters(&self, v: VertexId) -> bool {
        if self.directed {
            self.end == v
        } else {
            self.contains(v)
        }
    }

    /// Returns true if both endpoints are the same vertex.
    #[inline]
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}

impl<W: Clone> Edge<W> {
    /// Returns the structural key of this edge.
    #[must_use]
    pub fn key(&self) -> EdgeKey<W> {
        EdgeKey {
            start: self.start,
            end: self.end,
            directed: self.directed,
            payload: self.payload.clone(),
        }
    }
}

impl<W: PartialEq> PartialEq for Edge<W> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.directed == other.directed
            && self.payload == other.payload
    }
}

impl<W: Eq> Eq for Edge<W> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u64) -> VertexId {
        VertexId::new(n)
    }

    #[test]
    fn test_opposite_and_contains() {
        let e = Edge::new(EdgeId::new(0), v(1), v(2), false, 5);
        assert!(e.contains(v(1)));
        assert!(e.contains(v(2)));
        assert!(!e.contains(v(3)));
        assert_eq!(e.opposite(v(1)), v(2));
        assert_eq!(e.opposite(v(2)), v(1));
    }

    #[test]
    fn test_direction() {
        let directed = Edge::new(EdgeId::new(0), v(1), v(2), true, 1);
        assert!(directed.leaves(v(1)));
        assert!(!directed.leaves(v(2)));
        assert!(directed.enters(v(2)));
        assert!(!directed.enters(v(1)));

        let undirected = Edge::new(EdgeId::new(1), v(1), v(2), false, 1);
        assert!(undirected.leaves(v(2)));
        assert!(undirected.enters(v(1)));
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = Edge::new(EdgeId::new(0), v(1), v(2), true, 3);
        let b = Edge::new(EdgeId::new(8), v(1), v(2), true, 3);
        let c = Edge::new(EdgeId::new(9), v(1), v(2), false, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.key(), b.key());
    }
}
