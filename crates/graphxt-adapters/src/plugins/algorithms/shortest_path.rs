//! Dijkstra's single-source shortest paths, one vertex per step.
//!
//! The priority queue always mirrors the distance table: whenever a distance
//! drops, the vertex is taken out of the heap and put back with the new
//! value. Edge weights must be non-negative.

use super::traits::{Control, Outcome, Start, StartKind, StepAlgorithm};
use super::{edge_name, start_vertex, vertex_name};
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::{FxBuildHasher, FxHashMap};
use graphxt_core::display::{Annotation, Element, Surface};
use graphxt_core::graph::{Graph, Payload, Weight};
use graphxt_core::index::IndexedMinHeap;
use indexmap::IndexMap;

/// Distance of an unreached vertex.
pub const INFINITY: i64 = i64::MAX;

/// Step-wise Dijkstra from a start vertex.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    source: VertexId,
    distances: IndexMap<VertexId, i64, FxBuildHasher>,
    predecessors: FxHashMap<VertexId, VertexId>,
    heap: IndexedMinHeap<VertexId, i64>,
    settled: Vec<VertexId>,
    live: bool,
}

impl Dijkstra {
    /// Creates an uninitialized Dijkstra run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: VertexId::INVALID,
            distances: IndexMap::default(),
            predecessors: FxHashMap::default(),
            heap: IndexedMinHeap::new(),
            settled: Vec::new(),
            live: false,
        }
    }

    /// The start vertex.
    #[must_use]
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Current distance to `v`, or `None` if unreached.
    #[must_use]
    pub fn distance(&self, v: VertexId) -> Option<i64> {
        self.distances.get(&v).copied().filter(|&d| d != INFINITY)
    }

    /// The distance table in vertex order.
    pub fn distances(&self) -> impl Iterator<Item = (VertexId, Option<i64>)> + '_ {
        self.distances
            .iter()
            .map(|(&v, &d)| (v, (d != INFINITY).then_some(d)))
    }

    /// The vertex `v` was last relaxed from.
    #[must_use]
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessors.get(&v).copied()
    }

    /// Vertices in the order they were extracted from the queue.
    #[must_use]
    pub fn settled(&self) -> &[VertexId] {
        &self.settled
    }

    /// Walks predecessors back from `target` to the source.
    ///
    /// Returns `None` if `target` is unreached.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Returns true until the queue has been drained.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The distance table so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::ShortestPaths {
            source: self.source,
            distances: self.distances().collect(),
        }
    }
}

impl<T: Payload, W: Weight> StepAlgorithm<T, W> for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn requires(&self) -> StartKind {
        StartKind::Vertex
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, start: Start) {
        let source = start_vertex("Dijkstra", graph, start);

        self.source = source;
        self.distances.clear();
        self.predecessors.clear();
        self.heap = IndexedMinHeap::with_capacity(graph.vertex_count());
        self.settled.clear();

        for v in graph.vertex_ids() {
            let distance = if v == source { 0 } else { INFINITY };
            self.distances.insert(v, distance);
            self.heap.push(v, distance);
            surface.apply(Annotation::ClearLabel(Element::Vertex(v)));
        }
        surface.set_label(Element::Vertex(source), "0".to_string());

        self.live = true;
        surface.deselect_all();
        surface.message("Dijkstra initialized.".to_string());
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        let Some((current, current_distance)) = self.heap.pop() else {
            self.live = false;
            surface.message("Dijkstra finished.".to_string());
            return Control::Finished;
        };

        self.settled.push(current);
        surface.select_vertex(current);
        surface.message(format!("Current: {}.", vertex_name(graph, current)));
        tracing::trace!(vertex = %current, distance = current_distance, "settle");

        let relaxations: Vec<(EdgeId, VertexId, i64)> = graph
            .outgoing_edges(current)
            .map(|e| (e.id, e.opposite(current), e.payload.to_i64()))
            .collect();

        for (edge, next, weight) in relaxations {
            let candidate = current_distance.saturating_add(weight);
            let known = self.distances.get(&next).copied().unwrap_or(INFINITY);
            if candidate >= known {
                continue;
            }

            self.distances.insert(next, candidate);
            self.predecessors.insert(next, current);
            self.heap.push(next, candidate);

            surface.select_edge(edge);
            surface.set_label(
                Element::Vertex(next),
                format!("{}/{}", vertex_name(graph, current), candidate),
            );
            surface.message(format!(
                "- Found better path to {}",
                vertex_name(graph, next)
            ));
            surface.message(format!("- Relaxing {}", edge_name(graph, edge)));
        }

        Control::Continue
    }

    fn is_live(&self) -> bool {
        Dijkstra::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        Dijkstra::outcome(self)
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}
