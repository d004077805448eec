//! Core traits for step algorithms.

use graphxt_common::types::{EdgeId, VertexId};
use graphxt_core::display::Surface;
use graphxt_core::graph::Graph;
use serde::Serialize;
use std::cmp::Ordering;

/// Where an algorithm starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// The algorithm works on the whole graph.
    None,
    /// A single start vertex (traversals, Dijkstra, Prim).
    Vertex(VertexId),
    /// A source/sink pair (maximum flow).
    Pair {
        /// Flow source.
        source: VertexId,
        /// Flow sink.
        sink: VertexId,
    },
}

/// The kind of [`Start`] an algorithm expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartKind {
    /// No start.
    None,
    /// One vertex.
    Vertex,
    /// A source/sink pair.
    Pair,
}

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The algorithm made progress and is still live.
    Continue,
    /// The algorithm has terminated; further steps are no-ops.
    Finished,
}

/// Derived result of an algorithm, readable at any point of its run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Vertices in the order a traversal visited them.
    Traversal {
        /// Visit order.
        order: Vec<VertexId>,
    },
    /// Distance table; `None` means unreached.
    ShortestPaths {
        /// Source vertex.
        source: VertexId,
        /// Distance per vertex.
        distances: Vec<(VertexId, Option<i64>)>,
    },
    /// Edges selected for the spanning tree (or forest).
    SpanningTree {
        /// Selected edges in selection order.
        edges: Vec<EdgeId>,
        /// Sum of the selected weights.
        total_weight: i64,
        /// Edges deleted from the graph by the algorithm.
        removed: Vec<EdgeId>,
        /// False when the tree could not reach every vertex.
        spanning: bool,
    },
    /// Maximum flow between a source and a sink.
    MaxFlow {
        /// Net flow out of the source.
        value: i64,
        /// Number of augmenting paths applied.
        augmentations: usize,
    },
    /// Order numbers assigned by a topological sort, starting at 1.
    TopologicalOrder {
        /// Order number per finished vertex.
        order: Vec<(VertexId, usize)>,
        /// False when a cycle kept some vertices from being ordered.
        complete: bool,
    },
}

/// A graph algorithm that advances one unit of work per tick.
///
/// The graph and the display surface are passed in on every call rather
/// than held, so the driver keeps ownership of both and can hand the graph
/// to an editor between runs. An algorithm must be used with the same graph
/// from `initialize` through its last `step`.
pub trait StepAlgorithm<T, W> {
    /// Registry name of this algorithm.
    fn name(&self) -> &'static str;

    /// The kind of start this algorithm needs.
    fn requires(&self) -> StartKind;

    /// Builds fresh run state and clears stale annotations.
    ///
    /// Does not mutate the graph. Panics if `start` does not match
    /// [`requires`](Self::requires) or names a vertex outside the graph.
    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, start: Start);

    /// Performs one unit of work.
    ///
    /// Once the algorithm has terminated this is a no-op that returns
    /// [`Control::Finished`].
    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control;

    /// Returns true until termination has been detected.
    fn is_live(&self) -> bool;

    /// Returns the algorithm's derived result so far.
    fn outcome(&self) -> Outcome;
}

/// `MinScored<K, T>` holds a score `K` and a scored object `T` in a pair for
/// use with a `BinaryHeap`.
///
/// Ordering is reversed so the smallest score pops first; equal scores fall
/// back to the reversed order of `T`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MinScored<K, T>(pub K, pub T);

impl<K: Ord, T: Ord> PartialOrd for MinScored<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T: Ord> Ord for MinScored<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}
