//! Graph model.
//!
//! A [`Graph`] is an incidence index: every vertex maps to the set of edges
//! touching it, whatever their direction. Directed edges are stored in both
//! endpoint sets as well; direction is only consulted by the traversal
//! helpers ([`Graph::neighbours`], [`Graph::incident_edges`],
//! [`Graph::outgoing_edges`]).
//!
//! Vertices are identified by their payload. Internally they live in an
//! arena keyed by [`VertexId`](graphxt_common::VertexId), with a separate
//! payload index, so equal payloads always resolve to the same vertex.

mod edge;
mod store;
mod vertex;

pub use edge::{Edge, EdgeKey};
pub use store::{Graph, GraphConfig};
pub use vertex::Vertex;

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Bound for vertex payloads.
///
/// Payloads are the identity of a vertex, so they must be hashable and
/// comparable. `Display` is used for annotation labels and log messages.
pub trait Payload: Clone + Eq + Hash + Debug + Display {}

impl<T: Clone + Eq + Hash + Debug + Display> Payload for T {}

/// Edge payloads that carry a numeric weight.
///
/// Weighted algorithms (Dijkstra, Kruskal, Prim, Ford–Fulkerson) read edge
/// payloads through this trait.
pub trait Weight: Copy + Eq + Hash + Debug + Display {
    /// Returns the weight as a signed 64-bit integer.
    ///
    /// Values above `i64::MAX` saturate to `i64::MAX`.
    fn to_i64(self) -> i64;
}

macro_rules! impl_weight {
    ($($ty:ty),*) => {
        $(
            impl Weight for $ty {
                #[inline]
                fn to_i64(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

macro_rules! impl_saturating_weight {
    ($($ty:ty),*) => {
        $(
            impl Weight for $ty {
                #[inline]
                fn to_i64(self) -> i64 {
                    i64::try_from(self).unwrap_or(i64::MAX)
                }
            }
        )*
    };
}

impl_weight!(i8, i16, i32, i64, u8, u16, u32);
impl_saturating_weight!(u64, usize, isize);
