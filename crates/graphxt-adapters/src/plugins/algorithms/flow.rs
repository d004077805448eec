//! Ford–Fulkerson maximum flow, one augmenting path per step.
//!
//! Capacities and flows live in dense `n × n` tables indexed by vertex
//! position. Flow is kept skew-symmetric (`flow[v][u] == -flow[u][v]`), so
//! the residual graph is simply every pair with `flow < capacity` and
//! cancelling flow needs no special case.

use super::traits::{Control, Outcome, Start, StartKind, StepAlgorithm};
use super::vertex_name;
use graphxt_common::types::VertexId;
use graphxt_common::utils::hash::FxBuildHasher;
use graphxt_core::display::{Element, Surface};
use graphxt_core::graph::{Graph, Payload, Weight};
use indexmap::IndexSet;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// How the augmenting path is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Stack-based search.
    DepthFirst,
    /// Queue-based search (Edmonds–Karp).
    BreadthFirst,
}

/// One applied augmenting path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Augmentation {
    /// Vertices from source to sink.
    pub path: Vec<VertexId>,
    /// Flow pushed along the path.
    pub amount: i64,
}

/// Step-wise Ford–Fulkerson between a source and a sink.
#[derive(Debug, Clone)]
pub struct FordFulkerson {
    order: SearchOrder,
    source: usize,
    sink: usize,
    index: IndexSet<VertexId, FxBuildHasher>,
    capacity: Vec<Vec<i64>>,
    flow: Vec<Vec<i64>>,
    augmentations: Vec<Augmentation>,
    live: bool,
}

impl FordFulkerson {
    /// Creates an uninitialized run with the given search order.
    #[must_use]
    pub fn new(order: SearchOrder) -> Self {
        Self {
            order,
            source: 0,
            sink: 0,
            index: IndexSet::default(),
            capacity: Vec::new(),
            flow: Vec::new(),
            augmentations: Vec::new(),
            live: false,
        }
    }

    /// Ford–Fulkerson with depth-first path search.
    #[must_use]
    pub fn depth_first() -> Self {
        Self::new(SearchOrder::DepthFirst)
    }

    /// Ford–Fulkerson with breadth-first path search.
    #[must_use]
    pub fn breadth_first() -> Self {
        Self::new(SearchOrder::BreadthFirst)
    }

    /// The search order.
    #[must_use]
    pub fn order(&self) -> SearchOrder {
        self.order
    }

    /// Net flow out of the source.
    #[must_use]
    pub fn flow_value(&self) -> i64 {
        self.flow
            .get(self.source)
            .map_or(0, |row| row.iter().fold(0, |total, &f| total.saturating_add(f)))
    }

    /// Current flow from `u` to `v`; negative when flow runs `v → u`.
    #[must_use]
    pub fn flow(&self, u: VertexId, v: VertexId) -> i64 {
        self.cell(&self.flow, u, v)
    }

    /// Capacity from `u` to `v`.
    #[must_use]
    pub fn capacity(&self, u: VertexId, v: VertexId) -> i64 {
        self.cell(&self.capacity, u, v)
    }

    /// Augmenting paths applied so far.
    #[must_use]
    pub fn augmentations(&self) -> &[Augmentation] {
        &self.augmentations
    }

    /// Returns true until no augmenting path remains.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The flow value so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::MaxFlow {
            value: self.flow_value(),
            augmentations: self.augmentations.len(),
        }
    }

    fn cell(&self, table: &[Vec<i64>], u: VertexId, v: VertexId) -> i64 {
        match (self.index.get_index_of(&u), self.index.get_index_of(&v)) {
            (Some(u), Some(v)) => table[u][v],
            _ => 0,
        }
    }

    fn vertex_at(&self, i: usize) -> VertexId {
        self.index.get_index(i).copied().unwrap_or(VertexId::INVALID)
    }

    /// Finds an augmenting path in the residual graph.
    ///
    /// Returns the path as dense indices from source to sink.
    fn search(&self) -> Option<SmallVec<[usize; 8]>> {
        let n = self.index.len();
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut pending = VecDeque::new();

        visited[self.source] = true;
        pending.push_back(self.source);

        let mut found = false;
        'search: while let Some(u) = match self.order {
            SearchOrder::BreadthFirst => pending.pop_front(),
            SearchOrder::DepthFirst => pending.pop_back(),
        } {
            for v in 0..n {
                if visited[v] || self.flow[u][v] >= self.capacity[u][v] {
                    continue;
                }
                visited[v] = true;
                parent[v] = Some(u);
                pending.push_back(v);

                if v == self.sink {
                    found = true;
                    break 'search;
                }
            }
        }

        if !found {
            return None;
        }

        let mut path: SmallVec<[usize; 8]> = SmallVec::new();
        let mut current = self.sink;
        path.push(current);
        while let Some(previous) = parent[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }

    fn label_edges<T: Payload, W: Weight>(&self, graph: &Graph<T, W>, surface: &mut dyn Surface) {
        for edge in graph.edges() {
            let f = self.flow(edge.start, edge.end);
            let c = self.capacity(edge.start, edge.end);
            let shown = if edge.directed { f.max(0) } else { f.abs() };
            surface.set_label(Element::Edge(edge.id), format!("{shown}/{c}"));
        }
    }
}

impl<T: Payload, W: Weight> StepAlgorithm<T, W> for FordFulkerson {
    fn name(&self) -> &'static str {
        match self.order {
            SearchOrder::DepthFirst => "ford-fulkerson",
            SearchOrder::BreadthFirst => "ford-fulkerson-bfs",
        }
    }

    fn requires(&self) -> StartKind {
        StartKind::Pair
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, start: Start) {
        let Start::Pair { source, sink } = start else {
            panic!("Ford-Fulkerson requires a source and a sink, got {start:?}");
        };

        self.index = graph.vertex_ids().collect();
        let (Some(s), Some(t)) = (
            self.index.get_index_of(&source),
            self.index.get_index_of(&sink),
        ) else {
            panic!("Ford-Fulkerson: {source} or {sink} is not in the graph");
        };
        self.source = s;
        self.sink = t;

        let n = self.index.len();
        self.capacity = vec![vec![0; n]; n];
        self.flow = vec![vec![0; n]; n];
        self.augmentations.clear();

        for edge in graph.edges().filter(|e| !e.is_loop()) {
            let (Some(a), Some(b)) = (
                self.index.get_index_of(&edge.start),
                self.index.get_index_of(&edge.end),
            ) else {
                continue;
            };
            let weight = edge.payload.to_i64();
            self.capacity[a][b] = self.capacity[a][b].saturating_add(weight);
            if !edge.directed {
                self.capacity[b][a] = self.capacity[b][a].saturating_add(weight);
            }
        }

        self.live = true;
        surface.deselect_all();
        surface.message(format!(
            "Ford-Fulkerson initialized from {} to {}.",
            vertex_name(graph, source),
            vertex_name(graph, sink)
        ));
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        surface.deselect_all();

        let Some(path) = self.search() else {
            self.live = false;
            surface.message(format!(
                "Ford-Fulkerson finished. Maximum flow: {}.",
                self.flow_value()
            ));
            return Control::Finished;
        };

        let bottleneck = path
            .windows(2)
            .map(|pair| {
                let (u, v) = (pair[0], pair[1]);
                self.capacity[u][v].saturating_sub(self.flow[u][v])
            })
            .min()
            .unwrap_or(0);

        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            self.flow[u][v] = self.flow[u][v].saturating_add(bottleneck);
            self.flow[v][u] = -self.flow[u][v];

            let (a, b) = (self.vertex_at(u), self.vertex_at(v));
            surface.select_vertex(a);
            surface.select_vertex(b);
            if let Some(edge) = graph.edge_between(a, b) {
                surface.select_edge(edge);
            }
        }

        let vertices: Vec<VertexId> = path.iter().map(|&i| self.vertex_at(i)).collect();
        tracing::trace!(amount = bottleneck, hops = vertices.len() - 1, "augment");
        surface.message(format!(
            "Augmenting flow of {} along {}",
            bottleneck,
            vertices
                .iter()
                .map(|&v| vertex_name(graph, v))
                .collect::<Vec<_>>()
                .join(" -> ")
        ));
        self.augmentations.push(Augmentation {
            path: vertices,
            amount: bottleneck,
        });

        self.label_edges(graph, surface);
        Control::Continue
    }

    fn is_live(&self) -> bool {
        FordFulkerson::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        FordFulkerson::outcome(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphxt_core::display::DisplayState;

    /// Classic textbook network, max flow 23.
    fn network() -> Graph<&'static str, i64> {
        let mut graph = Graph::new();
        graph.insert_edge("s", "a", true, 16);
        graph.insert_edge("s", "c", true, 13);
        graph.insert_edge("a", "b", true, 12);
        graph.insert_edge("c", "a", true, 4);
        graph.insert_edge("b", "c", true, 9);
        graph.insert_edge("c", "d", true, 14);
        graph.insert_edge("d", "b", true, 7);
        graph.insert_edge("b", "t", true, 20);
        graph.insert_edge("d", "t", true, 4);
        graph
    }

    fn id(graph: &Graph<&'static str, i64>, name: &'static str) -> VertexId {
        graph.vertex_by_payload(&name).unwrap()
    }

    fn run(
        mut ff: FordFulkerson,
        graph: &mut Graph<&'static str, i64>,
        surface: &mut DisplayState,
    ) -> FordFulkerson {
        let start = Start::Pair {
            source: id(graph, "s"),
            sink: id(graph, "t"),
        };
        ff.initialize(graph, surface, start);
        while ff.is_live() {
            ff.step(graph, surface);
        }
        ff
    }

    fn assert_feasible(ff: &FordFulkerson, graph: &Graph<&'static str, i64>) {
        let s = id(graph, "s");
        let t = id(graph, "t");
        for u in graph.vertex_ids() {
            let mut net = 0;
            for v in graph.vertex_ids() {
                assert!(ff.flow(u, v) <= ff.capacity(u, v));
                assert_eq!(ff.flow(u, v), -ff.flow(v, u));
                net += ff.flow(u, v);
            }
            if u != s && u != t {
                assert_eq!(net, 0, "flow not conserved at {u}");
            }
        }
    }

    #[test]
    fn test_depth_first_max_flow() {
        let mut graph = network();
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::depth_first(), &mut graph, &mut surface);

        assert_eq!(ff.flow_value(), 23);
        assert_feasible(&ff, &graph);
        assert_eq!(
            ff.augmentations().iter().map(|a| a.amount).sum::<i64>(),
            23
        );
    }

    #[test]
    fn test_breadth_first_max_flow() {
        let mut graph = network();
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::breadth_first(), &mut graph, &mut surface);

        assert_eq!(ff.flow_value(), 23);
        assert_feasible(&ff, &graph);
        // Shortest augmenting paths first
        let lengths: Vec<_> = ff.augmentations().iter().map(|a| a.path.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_edges_are_labelled_flow_over_capacity() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        let sa = graph.insert_edge("s", "a", true, 3);
        let at = graph.insert_edge("a", "t", true, 2);
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::breadth_first(), &mut graph, &mut surface);

        assert_eq!(ff.flow_value(), 2);
        assert_eq!(surface.label(Element::Edge(sa)), Some("2/3"));
        assert_eq!(surface.label(Element::Edge(at)), Some("2/2"));
    }

    #[test]
    fn test_undirected_edges_carry_flow_both_ways() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("s", "a", false, 5);
        let ta = graph.insert_edge("t", "a", false, 4);
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::depth_first(), &mut graph, &mut surface);

        assert_eq!(ff.flow_value(), 4);
        assert_eq!(ff.capacity(id(&graph, "a"), id(&graph, "t")), 4);
        assert_eq!(surface.label(Element::Edge(ta)), Some("4/4"));
    }

    #[test]
    fn test_parallel_capacities_are_summed() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("s", "t", true, 2);
        graph.insert_edge("s", "t", true, 3);
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::depth_first(), &mut graph, &mut surface);

        assert_eq!(ff.capacity(id(&graph, "s"), id(&graph, "t")), 5);
        assert_eq!(ff.flow_value(), 5);
        assert_eq!(ff.augmentations().len(), 1);
    }

    #[test]
    fn test_huge_capacities_saturate() {
        let heavy = i64::MAX / 2 + 1;
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("s", "t", true, heavy);
        graph.insert_edge("s", "t", true, heavy + 1);
        graph.insert_edge("s", "a", false, i64::MAX);
        graph.insert_edge("a", "t", false, i64::MAX);
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::breadth_first(), &mut graph, &mut surface);

        assert_eq!(ff.capacity(id(&graph, "s"), id(&graph, "t")), i64::MAX);
        assert_eq!(ff.flow_value(), i64::MAX);
        assert_eq!(ff.augmentations().len(), 2);
        let (s, a, t) = (id(&graph, "s"), id(&graph, "a"), id(&graph, "t"));
        assert_eq!(ff.flow(s, t), i64::MAX);
        assert_eq!(ff.flow(a, t), i64::MAX);
        assert_eq!(ff.flow(t, a), -i64::MAX);
    }

    #[test]
    fn test_unreachable_sink_finishes_with_zero_flow() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        graph.insert_edge("t", "s", true, 5);
        let mut surface = DisplayState::new();
        let ff = run(FordFulkerson::depth_first(), &mut graph, &mut surface);

        assert_eq!(ff.flow_value(), 0);
        assert!(ff.augmentations().is_empty());
        assert_eq!(
            surface.messages().last().unwrap(),
            "Ford-Fulkerson finished. Maximum flow: 0."
        );
    }

    #[test]
    fn test_augmenting_path_is_selected() {
        let mut graph: Graph<&'static str, i64> = Graph::new();
        let sa = graph.insert_edge("s", "a", true, 1);
        let at = graph.insert_edge("a", "t", true, 1);
        let mut surface = DisplayState::new();
        let mut ff = FordFulkerson::depth_first();
        let start = Start::Pair {
            source: id(&graph, "s"),
            sink: id(&graph, "t"),
        };

        ff.initialize(&graph, &mut surface, start);
        assert_eq!(ff.step(&mut graph, &mut surface), Control::Continue);
        assert!(surface.is_selected(Element::Edge(sa)));
        assert!(surface.is_selected(Element::Edge(at)));
        assert!(surface.is_selected(Element::Vertex(id(&graph, "a"))));

        // The detection step clears the highlight
        assert_eq!(ff.step(&mut graph, &mut surface), Control::Finished);
        assert!(!surface.is_selected(Element::Edge(sa)));
    }

    #[test]
    #[should_panic(expected = "requires a source and a sink")]
    fn test_single_vertex_start_panics() {
        let graph = network();
        let mut surface = DisplayState::new();
        let s = id(&graph, "s");
        FordFulkerson::depth_first().initialize(&graph, &mut surface, Start::Vertex(s));
    }
}
