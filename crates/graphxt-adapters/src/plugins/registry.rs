//! Name → algorithm lookup.

use super::algorithms::{
    Dijkstra, FordFulkerson, Kruskal, Prim, StartKind, StepAlgorithm, TopologicalSort, Traversal,
};
use graphxt_common::utils::error::{Error, Result};
use graphxt_common::utils::hash::FxBuildHasher;
use graphxt_core::graph::{Payload, Weight};
use indexmap::IndexMap;

/// Builds a fresh, uninitialized algorithm instance.
pub type Factory<T, W> = fn() -> Box<dyn StepAlgorithm<T, W>>;

/// A registered algorithm.
#[derive(Debug)]
pub struct PluginEntry<T, W> {
    /// Lookup name, e.g. `dijkstra`.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// The kind of start the algorithm needs.
    pub requires: StartKind,
    /// Constructor.
    pub factory: Factory<T, W>,
}

/// Registry of step algorithms, kept in registration order.
///
/// # Example
///
/// ```
/// use graphxt_adapters::plugins::PluginRegistry;
///
/// let registry: PluginRegistry<String, i64> = PluginRegistry::with_builtins();
/// let dijkstra = registry.create("dijkstra").unwrap();
/// assert_eq!(dijkstra.name(), "dijkstra");
/// assert!(registry.create("bellman-ford").is_err());
/// ```
pub struct PluginRegistry<T, W> {
    entries: IndexMap<&'static str, PluginEntry<T, W>, FxBuildHasher>,
}

impl<T: Payload + 'static, W: Weight + 'static> PluginRegistry<T, W> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::default(),
        }
    }

    /// Creates a registry holding every built-in algorithm.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("bfs", "Breadth-first traversal", || {
            Box::new(Traversal::bfs())
        });
        registry.register("dfs", "Depth-first traversal", || {
            Box::new(Traversal::dfs())
        });
        registry.register("dijkstra", "Single-source shortest paths", || {
            Box::new(Dijkstra::new())
        });
        registry.register(
            "kruskal",
            "Minimum spanning forest; deletes cycle-closing edges",
            || Box::new(Kruskal::new()),
        );
        registry.register(
            "prim",
            "Minimum spanning tree from a start vertex; deletes unused edges",
            || Box::new(Prim::new()),
        );
        registry.register(
            "ford-fulkerson",
            "Maximum flow, depth-first augmenting paths",
            || Box::new(FordFulkerson::depth_first()),
        );
        registry.register(
            "ford-fulkerson-bfs",
            "Maximum flow, breadth-first augmenting paths",
            || Box::new(FordFulkerson::breadth_first()),
        );
        registry.register("topological-sort", "Kahn-style topological order", || {
            Box::new(TopologicalSort::new())
        });
        registry
    }

    /// Registers an algorithm, replacing any entry with the same name.
    ///
    /// The start kind is read from a probe instance.
    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        factory: Factory<T, W>,
    ) {
        let requires = factory().requires();
        self.entries.insert(
            name,
            PluginEntry {
                name,
                description,
                requires,
                factory,
            },
        );
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PluginEntry<T, W>> {
        self.entries.get(name)
    }

    /// Builds a fresh instance of the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlgorithm`] if nothing is registered under
    /// `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn StepAlgorithm<T, W>>> {
        self.get(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &PluginEntry<T, W>> + '_ {
        self.entries.values()
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Payload + 'static, W: Weight + 'static> Default for PluginRegistry<T, W> {
    fn default() -> Self {
        Self::with_builtins()
    }
}
