//! Graph store implementation.

use super::{Edge, EdgeKey, Payload, Vertex};
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::{FxBuildHasher, FxHashMap};
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Configuration for a graph.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Initial capacity for vertices.
    pub initial_vertex_capacity: usize,
    /// Initial capacity for edges.
    pub initial_edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_vertex_capacity: 36,
            initial_edge_capacity: 64,
        }
    }
}

/// Per-vertex record: the vertex itself plus its incidence set.
#[derive(Debug, Clone)]
struct VertexRecord<T> {
    vertex: Vertex<T>,
    /// Every edge touching this vertex, in insertion order.
    edges: IndexSet<EdgeId, FxBuildHasher>,
}

/// A graph with payload-identified vertices and mixed directed/undirected
/// edges.
///
/// Enumeration of vertices, edges, and each vertex's incidence set follows
/// insertion order, so algorithms that break ties by "first seen" behave the
/// same on every run.
#[derive(Debug, Clone)]
pub struct Graph<T, W> {
    /// Configuration.
    config: GraphConfig,

    /// Vertex arena indexed by VertexId.
    vertices: IndexMap<VertexId, VertexRecord<T>, FxBuildHasher>,

    /// Payload to vertex id.
    payload_index: FxHashMap<T, VertexId>,

    /// Edge arena indexed by EdgeId.
    edges: IndexMap<EdgeId, Edge<W>, FxBuildHasher>,

    /// Structural key to edge id, used to collapse duplicate edges.
    edge_index: FxHashMap<EdgeKey<W>, EdgeId>,

    /// Next vertex ID.
    next_vertex_id: u64,

    /// Next edge ID.
    next_edge_id: u64,
}

impl<T: Payload, W: Clone + Eq + Hash> Graph<T, W> {
    /// Creates a new graph with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates a new graph with custom configuration.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            vertices: IndexMap::with_capacity_and_hasher(
                config.initial_vertex_capacity,
                FxBuildHasher::default(),
            ),
            payload_index: FxHashMap::with_capacity_and_hasher(
                config.initial_vertex_capacity,
                FxBuildHasher::default(),
            ),
            edges: IndexMap::with_capacity_and_hasher(
                config.initial_edge_capacity,
                FxBuildHasher::default(),
            ),
            edge_index: FxHashMap::with_capacity_and_hasher(
                config.initial_edge_capacity,
                FxBuildHasher::default(),
            ),
            next_vertex_id: 0,
            next_edge_id: 0,
            config,
        }
    }

    /// Returns the configuration this graph was built with.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // === Vertex Operations ===

    /// Inserts a vertex carrying `payload`.
    ///
    /// If a vertex with an equal payload already exists, its id is returned
    /// and the graph is unchanged.
    pub fn insert_vertex(&mut self, payload: T) -> VertexId {
        if let Some(&id) = self.payload_index.get(&payload) {
            return id;
        }

        let id = VertexId::new(self.next_vertex_id);
        self.next_vertex_id += 1;

        self.payload_index.insert(payload.clone(), id);
        self.vertices.insert(
            id,
            VertexRecord {
                vertex: Vertex::new(id, payload),
                edges: IndexSet::default(),
            },
        );
        id
    }

    /// Removes a vertex and every edge touching it.
    ///
    /// Returns false if the vertex is not in the graph.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let Some(record) = self.vertices.shift_remove(&id) else {
            return false;
        };

        self.payload_index.remove(&record.vertex.payload);

        for edge_id in record.edges {
            if let Some(edge) = self.edges.shift_remove(&edge_id) {
                self.edge_index.remove(&edge.key());
                let other = edge.opposite(id);
                if let Some(other) = self.vertices.get_mut(&other) {
                    other.edges.shift_remove(&edge_id);
                }
            }
        }

        true
    }

    /// Returns the vertex with the given id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(&id).map(|r| &r.vertex)
    }

    /// Returns the payload of the vertex with the given id.
    #[must_use]
    pub fn payload(&self, id: VertexId) -> Option<&T> {
        self.vertex(id).map(|v| &v.payload)
    }

    /// Returns the id of the vertex carrying `payload`.
    #[must_use]
    pub fn vertex_by_payload(&self, payload: &T) -> Option<VertexId> {
        self.payload_index.get(payload).copied()
    }

    /// Returns true if the vertex is in the graph.
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Returns true if some vertex carries `payload`.
    #[must_use]
    pub fn contains(&self, payload: &T) -> bool {
        self.payload_index.contains_key(payload)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Iterates over vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.vertices.values().map(|r| &r.vertex)
    }

    // === Edge Operations ===

    /// Inserts an edge between the vertices carrying `start` and `end`.
    ///
    /// Missing endpoints are inserted first. If a structurally equal edge
    /// already exists, its id is returned and the graph is unchanged.
    pub fn insert_edge(&mut self, start: T, end: T, directed: bool, payload: W) -> EdgeId {
        let start = self.insert_vertex(start);
        let end = self.insert_vertex(end);
        self.link(start, end, directed, payload)
    }

    /// Inserts an edge between two existing vertices.
    ///
    /// Returns `None` if either endpoint is not in the graph.
    pub fn connect(
        &mut self,
        start: VertexId,
        end: VertexId,
        directed: bool,
        payload: W,
    ) -> Option<EdgeId> {
        if !self.contains_vertex(start) || !self.contains_vertex(end) {
            return None;
        }
        Some(self.link(start, end, directed, payload))
    }

    fn link(&mut self, start: VertexId, end: VertexId, directed: bool, payload: W) -> EdgeId {
        let key = EdgeKey {
            start,
            end,
            directed,
            payload,
        };
        if let Some(&id) = self.edge_index.get(&key) {
            return id;
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        let edge = Edge::new(id, start, end, directed, key.payload.clone());
        self.edge_index.insert(key, id);
        self.edges.insert(id, edge);

        if let Some(record) = self.vertices.get_mut(&start) {
            record.edges.insert(id);
        }
        if let Some(record) = self.vertices.get_mut(&end) {
            record.edges.insert(id);
        }

        id
    }

    /// Removes an edge.
    ///
    /// Returns false if the edge is not in the graph.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.shift_remove(&id) else {
            return false;
        };

        self.edge_index.remove(&edge.key());
        for endpoint in [edge.start, edge.end] {
            if let Some(record) = self.vertices.get_mut(&endpoint) {
                record.edges.shift_remove(&id);
            }
        }

        true
    }

    /// Swaps the endpoints of an edge.
    ///
    /// If the reversed edge already exists, the two collapse and this edge
    /// is removed. Returns false if the edge is not in the graph.
    pub fn reverse_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get(&id) else {
            return false;
        };

        let old_key = edge.key();
        let new_key = EdgeKey {
            start: old_key.end,
            end: old_key.start,
            directed: old_key.directed,
            payload: old_key.payload.clone(),
        };

        if new_key == old_key {
            return true;
        }
        if self.edge_index.contains_key(&new_key) {
            return self.remove_edge(id);
        }

        self.edge_index.remove(&old_key);
        self.edge_index.insert(new_key, id);
        if let Some(edge) = self.edges.get_mut(&id) {
            std::mem::swap(&mut edge.start, &mut edge.end);
        }
        true
    }

    /// Returns the edge with the given id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<W>> {
        self.edges.get(&id)
    }

    /// Returns true if the edge is in the graph.
    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Finds the edge with the given structure.
    #[must_use]
    pub fn find_edge(
        &self,
        start: VertexId,
        end: VertexId,
        directed: bool,
        payload: &W,
    ) -> Option<EdgeId> {
        let key = EdgeKey {
            start,
            end,
            directed,
            payload: payload.clone(),
        };
        self.edge_index.get(&key).copied()
    }

    /// Returns the number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over edge ids in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// Iterates over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.edges.values()
    }

    // === Traversal ===

    /// Returns every edge touching `v`, regardless of direction.
    pub fn connected_edges(&self, v: VertexId) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.vertices
            .get(&v)
            .into_iter()
            .flat_map(|record| record.edges.iter())
            .filter_map(|id| self.edges.get(id))
    }

    /// Returns the edges that terminate at `v`.
    ///
    /// Directed edges count only when they end at `v`; undirected edges
    /// always count.
    pub fn incident_edges(&self, v: VertexId) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.connected_edges(v).filter(move |e| e.enters(v))
    }

    /// Returns the edges that originate at `v`.
    ///
    /// Directed edges count only when they start at `v`; undirected edges
    /// always count.
    pub fn outgoing_edges(&self, v: VertexId) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.connected_edges(v).filter(move |e| e.leaves(v))
    }

    /// Returns the vertices reachable from `v` over one edge.
    ///
    /// Directed edges are followed start → end only.
    #[must_use]
    pub fn neighbours(&self, v: VertexId) -> Vec<VertexId> {
        let set: IndexSet<VertexId, FxBuildHasher> = self
            .outgoing_edges(v)
            .map(|e| e.opposite(v))
            .collect();
        set.into_iter().collect()
    }

    /// Returns true if some edge joins `x` and `y`, in either direction.
    #[must_use]
    pub fn is_connected(&self, x: VertexId, y: VertexId) -> bool {
        if !self.contains_vertex(y) {
            return false;
        }
        self.connected_edges(x).any(|e| e.contains(y) && e.opposite(x) == y)
    }

    /// Returns an edge joining `a` and `b`.
    ///
    /// Prefers an edge that can be walked a → b; falls back to any edge with
    /// both endpoints.
    #[must_use]
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let mut fallback = None;
        for edge in self.connected_edges(a) {
            if edge.opposite(a) != b || !edge.contains(b) {
                continue;
            }
            if edge.leaves(a) {
                return Some(edge.id);
            }
            fallback.get_or_insert(edge.id);
        }
        fallback
    }
}

impl<T: Payload, W: Clone + Eq + Hash> Default for Graph<T, W> {
    fn default() -> Self {
        Self::new()
    }
}
