//! Step algorithms for GraphXT.
//!
//! Every algorithm here is a resumable state machine: [`StepAlgorithm::step`]
//! performs one unit of work and returns, and the algorithm's progress is
//! published as display annotations rather than computed in one call.
//!
//! ## Algorithm Categories
//!
//! - [`traversal`] - BFS and DFS, sharing one implementation
//! - [`shortest_path`] - Dijkstra
//! - [`mst`] - Kruskal and Prim/Jarník (both delete non-tree edges)
//! - [`flow`] - Ford–Fulkerson with DFS or BFS augmenting search
//! - [`topological`] - Kahn-style topological order
//!
//! ## Usage
//!
//! ```
//! use graphxt_adapters::plugins::algorithms::{Dijkstra, Start, StepAlgorithm};
//! use graphxt_core::{DisplayState, Graph};
//!
//! let mut graph: Graph<&str, i64> = Graph::new();
//! graph.insert_edge("A", "B", true, 2);
//! let a = graph.vertex_by_payload(&"A").unwrap();
//! let b = graph.vertex_by_payload(&"B").unwrap();
//!
//! let mut surface = DisplayState::new();
//! let mut dijkstra = Dijkstra::new();
//! dijkstra.initialize(&graph, &mut surface, Start::Vertex(a));
//! while dijkstra.is_live() {
//!     dijkstra.step(&mut graph, &mut surface);
//! }
//! assert_eq!(dijkstra.distance(b), Some(2));
//! ```

pub mod flow;
pub mod mst;
pub mod shortest_path;
pub mod topological;
pub mod traversal;
mod traits;

// Core traits
pub use traits::{Control, MinScored, Outcome, Start, StartKind, StepAlgorithm};

pub use flow::{Augmentation, FordFulkerson, SearchOrder};
pub use mst::{Kruskal, Prim};
pub use shortest_path::{Dijkstra, INFINITY};
pub use topological::TopologicalSort;
pub use traversal::{FrontierPolicy, Traversal};

use graphxt_common::types::{EdgeId, VertexId};
use graphxt_core::graph::{Graph, Payload};
use std::hash::Hash;

/// Display name of a vertex: its payload, or its id if it has vanished.
pub(crate) fn vertex_name<T: Payload, W: Clone + Eq + Hash>(
    graph: &Graph<T, W>,
    id: VertexId,
) -> String {
    graph
        .payload(id)
        .map_or_else(|| id.to_string(), |payload| payload.to_string())
}

/// Display name of an edge, e.g. `A -> B (3)` or `A - B (3)`.
pub(crate) fn edge_name<T, W>(graph: &Graph<T, W>, id: EdgeId) -> String
where
    T: Payload,
    W: Clone + Eq + Hash + std::fmt::Display,
{
    match graph.edge(id) {
        Some(edge) => format!(
            "{} {} {} ({})",
            vertex_name(graph, edge.start),
            if edge.directed { "->" } else { "-" },
            vertex_name(graph, edge.end),
            edge.payload
        ),
        None => id.to_string(),
    }
}

/// Unwraps a single-vertex start, failing fast on a misuse.
pub(crate) fn start_vertex<T: Payload, W: Clone + Eq + Hash>(
    algorithm: &str,
    graph: &Graph<T, W>,
    start: Start,
) -> VertexId {
    match start {
        Start::Vertex(v) => {
            assert!(
                graph.contains_vertex(v),
                "{algorithm}: start vertex {v} is not in the graph"
            );
            v
        }
        other => panic!("{algorithm} requires a start vertex, got {other:?}"),
    }
}
