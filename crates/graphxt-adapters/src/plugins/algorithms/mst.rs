//! Minimum spanning tree algorithms.
//!
//! Both algorithms here transform the graph they run on. Kruskal deletes
//! every edge that would close a cycle as soon as it is examined; Prim
//! deletes every edge it never selected once the tree spans the graph. After
//! a complete run only the spanning tree is left. Edge direction is ignored.

use super::traits::{Control, MinScored, Outcome, Start, StartKind, StepAlgorithm};
use super::{edge_name, start_vertex, vertex_name};
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::FxBuildHasher;
use graphxt_core::display::{Annotation, Element, Surface};
use graphxt_core::graph::{Graph, Payload, Weight};
use indexmap::{IndexMap, IndexSet};
use std::collections::BinaryHeap;

/// Step-wise Kruskal: one edge examined per step.
///
/// Partitions are kept as a vertex → partition id map; a union relabels
/// every vertex of the absorbed partition.
#[derive(Debug, Clone, Default)]
pub struct Kruskal {
    partitions: IndexMap<VertexId, usize, FxBuildHasher>,
    next_partition: usize,
    queue: BinaryHeap<MinScored<i64, EdgeId>>,
    selected: Vec<EdgeId>,
    removed: Vec<EdgeId>,
    total_weight: i64,
    live: bool,
}

impl Kruskal {
    /// Creates an uninitialized Kruskal run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges added to the forest, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[EdgeId] {
        &self.selected
    }

    /// Edges deleted from the graph for closing a cycle.
    #[must_use]
    pub fn removed(&self) -> &[EdgeId] {
        &self.removed
    }

    /// Sum of the selected weights.
    #[must_use]
    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }

    /// Partition id of `v`.
    #[must_use]
    pub fn partition(&self, v: VertexId) -> Option<usize> {
        self.partitions.get(&v).copied()
    }

    /// Number of edges still waiting to be examined.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true until the edge queue has been drained.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The forest selected so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::SpanningTree {
            edges: self.selected.clone(),
            total_weight: self.total_weight,
            removed: self.removed.clone(),
            spanning: self.partitions.values().collect::<IndexSet<_>>().len() <= 1,
        }
    }

    fn partition_of(&mut self, v: VertexId) -> usize {
        if let Some(&p) = self.partitions.get(&v) {
            return p;
        }
        let p = self.next_partition;
        self.next_partition += 1;
        self.partitions.insert(v, p);
        p
    }
}

impl<T: Payload, W: Weight> StepAlgorithm<T, W> for Kruskal {
    fn name(&self) -> &'static str {
        "kruskal"
    }

    fn requires(&self) -> StartKind {
        StartKind::None
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, _start: Start) {
        self.partitions.clear();
        self.selected.clear();
        self.removed.clear();
        self.total_weight = 0;

        for (i, v) in graph.vertex_ids().enumerate() {
            self.partitions.insert(v, i);
        }
        self.next_partition = self.partitions.len();

        self.queue = graph
            .edges()
            .map(|e| MinScored(e.payload.to_i64(), e.id))
            .collect();

        self.live = true;
        surface.deselect_all();
        surface.message("Kruskal initialized.".to_string());
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        let Some(MinScored(weight, edge)) = self.queue.pop() else {
            self.live = false;
            surface.message("Kruskal finished.".to_string());
            return Control::Finished;
        };

        let Some((start, end)) = graph.edge(edge).map(|e| (e.start, e.end)) else {
            // Deleted by someone else since initialization
            return Control::Continue;
        };

        surface.message(format!("Analyzing {}", edge_name(graph, edge)));
        tracing::trace!(edge = %edge, weight, "examine");

        let keep = self.partition_of(start);
        let absorb = self.partition_of(end);

        if keep == absorb {
            surface.message("- Discarded: closes a cycle.".to_string());
            graph.remove_edge(edge);
            surface.apply(Annotation::Remove(Element::Edge(edge)));
            self.removed.push(edge);
            return Control::Continue;
        }

        for partition in self.partitions.values_mut() {
            if *partition == absorb {
                *partition = keep;
            }
        }

        self.selected.push(edge);
        self.total_weight = self.total_weight.saturating_add(weight);

        surface.select_edge(edge);
        surface.select_vertex(start);
        surface.select_vertex(end);
        surface.message(format!(
            "- Connecting {} and {}",
            vertex_name(graph, start),
            vertex_name(graph, end)
        ));

        Control::Continue
    }

    fn is_live(&self) -> bool {
        Kruskal::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        Kruskal::outcome(self)
    }
}

/// Step-wise Prim/Jarník: one tree edge attached per step.
#[derive(Debug, Clone, Default)]
pub struct Prim {
    attached: IndexSet<VertexId, FxBuildHasher>,
    selected: IndexSet<EdgeId, FxBuildHasher>,
    removed: Vec<EdgeId>,
    total_weight: i64,
    spanning: bool,
    live: bool,
}

impl Prim {
    /// Creates an uninitialized Prim run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices attached to the tree, in attachment order.
    pub fn attached(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.attached.iter().copied()
    }

    /// Tree edges in selection order.
    pub fn selected(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.selected.iter().copied()
    }

    /// Edges deleted by the final cleanup.
    #[must_use]
    pub fn removed(&self) -> &[EdgeId] {
        &self.removed
    }

    /// Sum of the selected weights.
    #[must_use]
    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }

    /// True once the tree has reached every vertex.
    #[must_use]
    pub fn is_spanning(&self) -> bool {
        self.spanning
    }

    /// Returns true until the tree spans the graph or cannot grow.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The tree selected so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::SpanningTree {
            edges: self.selected.iter().copied().collect(),
            total_weight: self.total_weight,
            removed: self.removed.clone(),
            spanning: self.spanning,
        }
    }

    fn finish<T: Payload, W: Weight>(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) {
        surface.message("Removing unused edges.".to_string());

        let unused: Vec<EdgeId> = graph
            .edge_ids()
            .filter(|e| !self.selected.contains(e))
            .collect();
        for edge in unused {
            graph.remove_edge(edge);
            surface.apply(Annotation::Remove(Element::Edge(edge)));
            self.removed.push(edge);
        }

        self.spanning = true;
        self.live = false;
        surface.message("Prim-Jarnik finished.".to_string());
    }
}

impl<T: Payload, W: Weight> StepAlgorithm<T, W> for Prim {
    fn name(&self) -> &'static str {
        "prim"
    }

    fn requires(&self) -> StartKind {
        StartKind::Vertex
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, start: Start) {
        let start = start_vertex("Prim", graph, start);

        self.attached.clear();
        self.selected.clear();
        self.removed.clear();
        self.total_weight = 0;
        self.spanning = false;

        self.attached.insert(start);
        self.live = true;

        surface.deselect_all();
        surface.select_vertex(start);
        surface.message("Prim-Jarnik initialized.".to_string());
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        if graph.vertex_ids().all(|v| self.attached.contains(&v)) {
            self.finish(graph, surface);
            return Control::Finished;
        }

        let crossing = graph
            .edges()
            .filter(|e| self.attached.contains(&e.start) != self.attached.contains(&e.end))
            .min_by_key(|e| e.payload.to_i64())
            .map(|e| (e.id, e.start, e.end, e.payload.to_i64()));

        let Some((edge, start, end, weight)) = crossing else {
            self.live = false;
            surface.message(format!(
                "Prim-Jarnik stopped: {} of {} vertices reachable.",
                self.attached.len(),
                graph.vertex_count()
            ));
            return Control::Finished;
        };

        surface.message(format!("Analyzing {}", edge_name(graph, edge)));
        tracing::trace!(edge = %edge, weight, "attach");

        self.attached.insert(start);
        self.attached.insert(end);
        self.selected.insert(edge);
        self.total_weight = self.total_weight.saturating_add(weight);

        surface.select_vertex(start);
        surface.select_vertex(end);
        surface.select_edge(edge);

        Control::Continue
    }

    fn is_live(&self) -> bool {
        Prim::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        Prim::outcome(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphxt_core::display::DisplayState;

    /// Undirected 4-cycle A-B(1), B-C(2), C-D(3), D-A(4)
    fn square() -> Graph<&'static str, i64> {
        let mut graph = Graph::new();
        graph.insert_edge("A", "B", false, 1);
        graph.insert_edge("B", "C", false, 2);
        graph.insert_edge("C", "D", false, 3);
        graph.insert_edge("D", "A", false, 4);
        graph
    }

    fn weights(graph: &Graph<&'static str, i64>, edges: &[EdgeId]) -> Vec<i64> {
        edges.iter().map(|&e| graph.edge(e).unwrap().payload).collect()
    }

    #[test]
    fn test_kruskal_square_deletes_heaviest_edge() {
        let mut graph = square();
        let heavy = graph.edge_ids().last().unwrap();
        let mut surface = DisplayState::new();
        let mut kruskal = Kruskal::new();

        kruskal.initialize(&graph, &mut surface, Start::None);
        while kruskal.is_live() {
            kruskal.step(&mut graph, &mut surface);
        }

        assert_eq!(weights(&graph, kruskal.selected()), vec![1, 2, 3]);
        assert_eq!(kruskal.removed(), &[heavy]);
        assert_eq!(kruskal.total_weight(), 6);
        assert!(!graph.contains_edge(heavy));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(surface.removed(), &[Element::Edge(heavy)]);

        for &edge in kruskal.selected() {
            assert!(surface.is_selected(Element::Edge(edge)));
            let e = graph.edge(edge).unwrap();
            assert!(surface.is_selected(Element::Vertex(e.start)));
            assert!(surface.is_selected(Element::Vertex(e.end)));
        }
        assert!(!surface.is_selected(Element::Edge(heavy)));
    }

    #[test]
    fn test_kruskal_initialize_clears_stale_selection() {
        let graph = square();
        let a = graph.vertex_by_payload(&"A").unwrap();
        let first = graph.edge_ids().next().unwrap();
        let mut surface = DisplayState::new();
        surface.select_vertex(a);
        surface.select_edge(first);

        let mut kruskal = Kruskal::new();
        kruskal.initialize(&graph, &mut surface, Start::None);

        assert_eq!(surface.selected_vertices().count(), 0);
        assert_eq!(surface.selected_edges().count(), 0);
    }

    #[test]
    fn test_kruskal_total_weight_saturates() {
        let heavy = i64::MAX / 2 + 1;
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "B", false, heavy);
        graph.insert_edge("B", "C", false, heavy);
        let mut surface = DisplayState::new();
        let mut kruskal = Kruskal::new();

        kruskal.initialize(&graph, &mut surface, Start::None);
        while kruskal.is_live() {
            kruskal.step(&mut graph, &mut surface);
        }

        assert_eq!(kruskal.selected().len(), 2);
        assert_eq!(kruskal.total_weight(), i64::MAX);
    }

    #[test]
    fn test_kruskal_merges_partitions() {
        let mut graph = square();
        let mut surface = DisplayState::new();
        let mut kruskal = Kruskal::new();
        let a = graph.vertex_by_payload(&"A").unwrap();
        let b = graph.vertex_by_payload(&"B").unwrap();
        let c = graph.vertex_by_payload(&"C").unwrap();

        kruskal.initialize(&graph, &mut surface, Start::None);
        assert_ne!(kruskal.partition(a), kruskal.partition(b));

        kruskal.step(&mut graph, &mut surface);
        assert_eq!(kruskal.partition(a), kruskal.partition(b));
        assert_ne!(kruskal.partition(a), kruskal.partition(c));
        assert_eq!(kruskal.pending(), 3);
    }

    #[test]
    fn test_kruskal_forest_on_disconnected_graph() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "B", false, 1);
        graph.insert_edge("C", "D", false, 1);
        let mut surface = DisplayState::new();
        let mut kruskal = Kruskal::new();

        kruskal.initialize(&graph, &mut surface, Start::None);
        while kruskal.is_live() {
            kruskal.step(&mut graph, &mut surface);
        }

        let Outcome::SpanningTree { edges, spanning, .. } = kruskal.outcome() else {
            panic!("unexpected outcome");
        };
        assert_eq!(edges.len(), 2);
        assert!(!spanning);
    }

    #[test]
    fn test_kruskal_deletes_self_loops() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        let looped = graph.insert_edge("A", "A", false, 0);
        graph.insert_edge("A", "B", false, 5);
        let mut surface = DisplayState::new();
        let mut kruskal = Kruskal::new();

        kruskal.initialize(&graph, &mut surface, Start::None);
        while kruskal.is_live() {
            kruskal.step(&mut graph, &mut surface);
        }

        assert_eq!(kruskal.removed(), &[looped]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_prim_square() {
        let mut graph = square();
        let heavy = graph.edge_ids().last().unwrap();
        let a = graph.vertex_by_payload(&"A").unwrap();
        let mut surface = DisplayState::new();
        let mut prim = Prim::new();

        prim.initialize(&graph, &mut surface, Start::Vertex(a));
        let mut steps = 0;
        while prim.step(&mut graph, &mut surface) == Control::Continue {
            steps += 1;
        }

        // Three attachments, then the cleanup step
        assert_eq!(steps, 3);
        assert!(prim.is_spanning());
        assert_eq!(prim.total_weight(), 6);
        assert_eq!(prim.removed(), &[heavy]);
        assert_eq!(graph.edge_count(), 3);
        let selected: Vec<_> = prim.selected().collect();
        assert_eq!(weights(&graph, &selected), vec![1, 2, 3]);
    }

    #[test]
    fn test_prim_total_weight_saturates() {
        let heavy = i64::MAX / 2 + 1;
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "B", false, heavy);
        graph.insert_edge("B", "C", false, heavy);
        let a = graph.vertex_by_payload(&"A").unwrap();
        let mut surface = DisplayState::new();
        let mut prim = Prim::new();

        prim.initialize(&graph, &mut surface, Start::Vertex(a));
        while prim.is_live() {
            prim.step(&mut graph, &mut surface);
        }

        assert!(prim.is_spanning());
        assert_eq!(prim.total_weight(), i64::MAX);
    }

    #[test]
    fn test_prim_keeps_graph_until_spanning() {
        let mut graph = square();
        let c = graph.vertex_by_payload(&"C").unwrap();
        let mut surface = DisplayState::new();
        let mut prim = Prim::new();

        prim.initialize(&graph, &mut surface, Start::Vertex(c));
        prim.step(&mut graph, &mut surface);
        prim.step(&mut graph, &mut surface);
        prim.step(&mut graph, &mut surface);
        assert_eq!(graph.edge_count(), 4);
        assert!(prim.is_live());

        prim.step(&mut graph, &mut surface);
        assert!(!prim.is_live());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_prim_stops_on_disconnected_graph() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("A", "B", false, 1);
        graph.insert_edge("C", "D", false, 1);
        let a = graph.vertex_by_payload(&"A").unwrap();
        let mut surface = DisplayState::new();
        let mut prim = Prim::new();

        prim.initialize(&graph, &mut surface, Start::Vertex(a));
        while prim.is_live() {
            prim.step(&mut graph, &mut surface);
        }

        assert!(!prim.is_spanning());
        assert_eq!(prim.attached().count(), 2);
        // No cleanup without a spanning tree
        assert_eq!(graph.edge_count(), 2);
        assert!(prim.removed().is_empty());
    }
}
