//! Breadth-first and depth-first traversal.
//!
//! Both searches share one state machine and differ only in where newly
//! discovered vertices enter the frontier: the back (BFS) or the front
//! (DFS). A vertex enters the frontier at most once, and is marked visited
//! when it is popped.

use super::traits::{Control, Outcome, Start, StartKind, StepAlgorithm};
use super::{edge_name, start_vertex, vertex_name};
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::{FxBuildHasher, FxHashSet};
use graphxt_core::display::Surface;
use graphxt_core::graph::{Graph, Payload};
use indexmap::IndexSet;
use std::collections::VecDeque;
use std::fmt::Display;
use std::hash::Hash;

/// Where discovered vertices enter the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierPolicy {
    /// Queue: append at the back, breadth-first.
    Fifo,
    /// Stack: push at the front, depth-first.
    Lifo,
}

/// Step-wise BFS or DFS from a start vertex.
#[derive(Debug, Clone)]
pub struct Traversal {
    policy: FrontierPolicy,
    frontier: VecDeque<VertexId>,
    queued: FxHashSet<VertexId>,
    visited: IndexSet<VertexId, FxBuildHasher>,
    tree_edges: Vec<EdgeId>,
    live: bool,
}

impl Traversal {
    /// Creates a traversal with the given frontier policy.
    #[must_use]
    pub fn new(policy: FrontierPolicy) -> Self {
        Self {
            policy,
            frontier: VecDeque::new(),
            queued: FxHashSet::default(),
            visited: IndexSet::default(),
            tree_edges: Vec::new(),
            live: false,
        }
    }

    /// Breadth-first traversal.
    #[must_use]
    pub fn bfs() -> Self {
        Self::new(FrontierPolicy::Fifo)
    }

    /// Depth-first traversal.
    #[must_use]
    pub fn dfs() -> Self {
        Self::new(FrontierPolicy::Lifo)
    }

    /// The frontier policy.
    #[must_use]
    pub fn policy(&self) -> FrontierPolicy {
        self.policy
    }

    /// Visited vertices in visit order.
    pub fn visited(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.visited.iter().copied()
    }

    /// Returns true if `v` has been popped from the frontier.
    #[must_use]
    pub fn is_visited(&self, v: VertexId) -> bool {
        self.visited.contains(&v)
    }

    /// Vertices waiting in the frontier, next to be popped first.
    pub fn frontier(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.frontier.iter().copied()
    }

    /// Edges along which vertices were discovered.
    #[must_use]
    pub fn tree_edges(&self) -> &[EdgeId] {
        &self.tree_edges
    }

    /// Returns true until the traversal has detected an empty frontier.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Visit order so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::Traversal {
            order: self.visited.iter().copied().collect(),
        }
    }

    fn label(&self) -> &'static str {
        match self.policy {
            FrontierPolicy::Fifo => "BFS",
            FrontierPolicy::Lifo => "DFS",
        }
    }
}

impl<T, W> StepAlgorithm<T, W> for Traversal
where
    T: Payload,
    W: Clone + Eq + Hash + Display,
{
    fn name(&self) -> &'static str {
        match self.policy {
            FrontierPolicy::Fifo => "bfs",
            FrontierPolicy::Lifo => "dfs",
        }
    }

    fn requires(&self) -> StartKind {
        StartKind::Vertex
    }

    fn initialize(&mut self, graph: &Graph<T, W>, surface: &mut dyn Surface, start: Start) {
        let start = start_vertex(self.label(), graph, start);

        self.frontier.clear();
        self.queued.clear();
        self.visited.clear();
        self.tree_edges.clear();

        self.frontier.push_back(start);
        self.queued.insert(start);
        self.live = true;

        surface.deselect_all();
        surface.message(format!(
            "{} initialized at {}.",
            self.label(),
            vertex_name(graph, start)
        ));
    }

    fn step(&mut self, graph: &mut Graph<T, W>, surface: &mut dyn Surface) -> Control {
        if !self.live {
            return Control::Finished;
        }

        let Some(current) = self.frontier.pop_front() else {
            self.live = false;
            surface.message(format!("{} finished.", self.label()));
            return Control::Finished;
        };

        self.queued.remove(&current);
        self.visited.insert(current);
        surface.select_vertex(current);
        surface.message(format!("Current: {}.", vertex_name(graph, current)));
        tracing::trace!(algorithm = self.label(), vertex = %current, "visit");

        let moves: Vec<(EdgeId, VertexId)> = graph
            .outgoing_edges(current)
            .map(|e| (e.id, e.opposite(current)))
            .collect();

        for (edge, next) in moves {
            if self.visited.contains(&next) || self.queued.contains(&next) {
                continue;
            }

            self.queued.insert(next);
            match self.policy {
                FrontierPolicy::Fifo => self.frontier.push_back(next),
                FrontierPolicy::Lifo => self.frontier.push_front(next),
            }
            self.tree_edges.push(edge);

            surface.select_edge(edge);
            surface.message(format!("- Discovered over {}", edge_name(graph, edge)));
        }

        Control::Continue
    }

    fn is_live(&self) -> bool {
        Traversal::is_live(self)
    }

    fn outcome(&self) -> Outcome {
        Traversal::outcome(self)
    }
}
