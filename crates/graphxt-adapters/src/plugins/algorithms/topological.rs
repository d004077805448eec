//! Kahn-style topological ordering.
//!
//! An edge is "used" once its start vertex has been queued. A vertex becomes
//! ready when every edge entering it is used. Vertices on a cycle never
//! become ready, so cyclic input ends with an incomplete order rather than
//! an error.

use super::traits::{Control, Outcome, Start, StartKind, StepAlgorithm};
use super::vertex_name;
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::{FxBuildHasher, FxHashSet};
use graphxt_core::display::{Annotation, Element, Surface};
use graphxt_core::graph::{Graph, Payload};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::fmt::Display;
use std::hash::Hash;

/// Step-wise topological sort, one vertex ordered per step.
#[derive(Debug, Clone, Default)]
pub struct TopologicalSort {
    queue: VecDeque<VertexId>,
    queued: FxHashSet<VertexId>,
    used_edges: FxHashSet<EdgeId>,
    finished: IndexMap<VertexId, usize, FxBuildHasher>,
    counter: usize,
    vertex_total: usize,
    live: bool,
}

impl TopologicalSort {
    /// Creates an uninitialized sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Order number of `v`, starting at 1.
    #[must_use]
    pub fn order_of(&self, v: VertexId) -> Option<usize> {
        self.finished.get(&v).copied()
    }

    /// Ordered vertices with their order numbers.
    pub fn order(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.finished.iter().map(|(&v, &k)| (v, k))
    }

    /// Number of vertices ordered so far.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }

    /// True if every vertex present at initialization has been ordered.
    ///
    /// Meaningful once the sort has terminated; a cycle leaves this false.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished.len() == self.vertex_total
    }

    /// Returns true until the ready queue has been drained.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The order so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::TopologicalOrder {
            order: self.order().collect(),
            complete: self.is_complete(),
        }
    }

    fn enqueue<T, W>(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, v: VertexId)
    where
        T: Payload,
        W: Clone + Eq + Hash,
    {
        surface.message(format!("Putting {} on the queue.", vertex_name(graph, v)));
        self.queue.push_back(v);
        self.queued.insert(v);
        self.used_edges
            .extend(graph.outgoing_edges(v).map(|e| e.id));
    }

    fn is_ready<T, W>(&self, graph: &Graph<T, W>, v: VertexId) -> bool
    where
        T: Payload,
        W: Clone + Eq + Hash,
    {
        graph
            .incident_edges(v)
            .all(|e| self.used_edges.contains(&e.id))
    }
}

impl<T, W> StepAlgorithm<T, W> for TopologicalSort
where
    T: Payload,
    W: Clone + Eq + Hash + Display,
{
    fn name(&self) -> &'static str {
        "topological-sort"
    }

    fn requires(&self) -> StartKind {
        StartKind::None
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, _start: Start) {
        self.queue.clear();
        self.queued.clear();
        self.used_edges.clear();
        self.finished.clear();
        self.counter = 0;
        self.vertex_total = graph.vertex_count();

        surface.message("Topological Sort initialized.".to_string());

        for v in graph.vertex_ids() {
            if graph.incident_edges(v).next().is_none() {
                self.enqueue(graph, surface, v);
            }
            surface.apply(Annotation::ClearLabel(Element::Vertex(v)));
        }

        self.live = true;
        surface.deselect_all();
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        let Some(current) = self.queue.pop_front() else {
            self.live = false;
            if self.is_complete() {
                surface.message("Topological Sort finished.".to_string());
            } else {
                surface.message(format!(
                    "Topological Sort finished: the graph has a cycle, {} of {} vertices ordered.",
                    self.finished.len(),
                    self.vertex_total
                ));
            }
            return Control::Finished;
        };
        self.queued.remove(&current);

        for edge in graph.incident_edges(current) {
            surface.select_edge(edge.id);
        }
        surface.message(format!("Current: {}.", vertex_name(graph, current)));

        self.counter += 1;
        self.finished.insert(current, self.counter);
        surface.select_vertex(current);
        surface.set_label(Element::Vertex(current), self.counter.to_string());
        tracing::trace!(vertex = %current, order = self.counter, "order");

        for v in graph.vertex_ids() {
            if self.finished.contains_key(&v) || self.queued.contains(&v) {
                continue;
            }
            // Later vertices see edges used by earlier enqueues of this scan
            if self.is_ready(graph, v) {
                self.enqueue(graph, surface, v);
            }
        }

        Control::Continue
    }

    fn is_live(&self) -> bool {
        TopologicalSort::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        TopologicalSort::outcome(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphxt_core::display::DisplayState;

    fn run(graph: &mut Graph<&'static str, i64>) -> (TopologicalSort, DisplayState) {
        let mut surface = DisplayState::new();
        let mut sort = TopologicalSort::new();
        sort.initialize(graph, &mut surface, Start::None);
        while sort.is_live() {
            sort.step(graph, &mut surface);
        }
        (sort, surface)
    }

    fn names(sort: &TopologicalSort, graph: &Graph<&'static str, i64>) -> Vec<&'static str> {
        sort.order().map(|(v, _)| *graph.payload(v).unwrap()).collect()
    }

    #[test]
    fn test_dag_order_respects_edges() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("shirt", "tie", true, 1);
        graph.insert_edge("tie", "jacket", true, 1);
        graph.insert_edge("trousers", "shoes", true, 1);
        graph.insert_edge("trousers", "belt", true, 1);
        graph.insert_edge("belt", "jacket", true, 1);
        graph.insert_vertex("watch");

        let (sort, _) = run(&mut graph);

        assert!(sort.is_complete());
        assert_eq!(sort.finished_count(), 7);
        for edge in graph.edges() {
            assert!(sort.order_of(edge.start).unwrap() < sort.order_of(edge.end).unwrap());
        }
    }

    #[test]
    fn test_initialize_clears_stale_selection() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        let edge = graph.insert_edge("A", "B", true, 1);
        let b = graph.vertex_by_payload(&"B").unwrap();
        let mut surface = DisplayState::new();
        surface.select_vertex(b);
        surface.select_edge(edge);

        let mut sort = TopologicalSort::new();
        sort.initialize(&graph, &mut surface, Start::None);

        assert!(!surface.is_selected(Element::Vertex(b)));
        assert!(!surface.is_selected(Element::Edge(edge)));
    }

    #[test]
    fn test_chain_numbers_start_at_one() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "B", true, 1);
        graph.insert_edge("B", "C", true, 1);

        let (sort, surface) = run(&mut graph);
        let c = graph.vertex_by_payload(&"C").unwrap();

        assert_eq!(names(&sort, &graph), vec!["A", "B", "C"]);
        assert_eq!(sort.order_of(c), Some(3));
        assert_eq!(surface.label(Element::Vertex(c)), Some("3"));
        assert_eq!(surface.messages().last().unwrap(), "Topological Sort finished.");
    }

    #[test]
    fn test_cycle_is_incomplete() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("S", "A", true, 1);
        graph.insert_edge("A", "B", true, 1);
        graph.insert_edge("B", "C", true, 1);
        graph.insert_edge("C", "A", true, 1);

        let (sort, surface) = run(&mut graph);

        assert_eq!(names(&sort, &graph), vec!["S"]);
        assert!(!sort.is_complete());
        let Outcome::TopologicalOrder { complete, order } = sort.outcome() else {
            panic!("unexpected outcome");
        };
        assert!(!complete);
        assert_eq!(order.len(), 1);
        assert!(surface.messages().last().unwrap().contains("cycle"));
    }

    #[test]
    fn test_one_vertex_per_step() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "C", true, 1);
        graph.insert_edge("B", "C", true, 1);
        let mut surface = DisplayState::new();
        let mut sort = TopologicalSort::new();

        sort.initialize(&graph, &mut surface, Start::None);
        assert_eq!(sort.step(&mut graph, &mut surface), Control::Continue);
        assert_eq!(sort.finished_count(), 1);
        assert_eq!(sort.step(&mut graph, &mut surface), Control::Continue);
        assert_eq!(sort.step(&mut graph, &mut surface), Control::Continue);
        assert_eq!(sort.finished_count(), 3);
        assert_eq!(sort.step(&mut graph, &mut surface), Control::Finished);
        assert!(sort.is_complete());
    }

    #[test]
    fn test_empty_graph_is_complete() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        let (sort, _) = run(&mut graph);

        assert!(sort.is_complete());
        assert_eq!(sort.finished_count(), 0);
    }
}
