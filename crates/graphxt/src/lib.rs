//! # GraphXT
//!
//! Step-by-step graph algorithms for visualization and teaching.
//!
//! Every algorithm is a resumable state machine: each tick does one unit of
//! work and reports what changed as display annotations (selections,
//! labels, messages, removed elements). A [`Driver`] owns the graph and the
//! display surface and delivers ticks to one algorithm at a time.
//!
//! ## Algorithms
//!
//! | Name | Start | Notes |
//! | ---- | ----- | ----- |
//! | `bfs`, `dfs` | vertex | One vertex visited per tick |
//! | `dijkstra` | vertex | Labels vertices `predecessor/distance` |
//! | `kruskal` | - | Deletes edges that close a cycle |
//! | `prim` | vertex | Deletes unused edges once spanning |
//! | `ford-fulkerson`, `ford-fulkerson-bfs` | source, sink | Labels edges `flow/capacity` |
//! | `topological-sort` | - | Cyclic input ends incomplete |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphxt::{Config, DisplayState, Driver, Outcome};
//!
//! let mut driver: Driver<String, i64, DisplayState> =
//!     Driver::with_config(Config::default().with_max_ticks(100), DisplayState::new());
//!
//! let graph = driver.graph_mut().unwrap();
//! graph.insert_edge("A".to_string(), "B".to_string(), true, 1);
//! graph.insert_edge("B".to_string(), "C".to_string(), true, 2);
//!
//! driver.start_named("dijkstra", Some(&"A".to_string()), None)?;
//! driver.run_to_completion()?;
//!
//! assert!(matches!(driver.outcome(), Some(Outcome::ShortestPaths { .. })));
//! # Ok::<(), graphxt::Error>(())
//! ```

// Re-export the driver API
pub use graphxt_engine::{Config, Driver};

// Re-export the graph model and display surface
pub use graphxt_core::{
    Annotation, DisplayState, Edge, Element, Graph, GraphConfig, Payload, Surface, Vertex, Weight,
};

// Re-export ids and errors
pub use graphxt_common::types::{EdgeId, VertexId};
pub use graphxt_common::utils::error::{Error, Result};

// Re-export the algorithms and their registry
pub use graphxt_adapters::plugins::algorithms::{
    Control, Dijkstra, FordFulkerson, Kruskal, Outcome, Prim, Start, StartKind, StepAlgorithm,
    TopologicalSort, Traversal,
};
pub use graphxt_adapters::plugins::PluginRegistry;
