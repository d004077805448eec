//! Identifier types for graph elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vertex inside one graph.
///
/// Ids are handed out in insertion order and never reused, so ordering two
/// ids also orders the vertices by when they were created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u64);

impl VertexId {
    /// Sentinel for "no vertex".
    pub const INVALID: Self = Self(u64::MAX);

    /// Creates a new vertex id.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is not the invalid sentinel.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Identifier of an edge inside one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Sentinel for "no edge".
    pub const INVALID: Self = Self(u64::MAX);

    /// Creates a new edge id.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is not the invalid sentinel.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_ordering() {
        let a = VertexId::new(1);
        let b = VertexId::new(2);
        assert!(a < b);
        assert!(a.is_valid());
        assert!(!VertexId::INVALID.is_valid());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&EdgeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: VertexId = serde_json::from_str("3").unwrap();
        assert_eq!(back, VertexId::new(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(VertexId::new(4).to_string(), "v4");
        assert_eq!(EdgeId::new(9).to_string(), "e9");
    }
}
