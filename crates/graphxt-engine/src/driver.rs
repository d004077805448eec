//! Tick driver.
//!
//! The driver owns the graph and the surface and delivers ticks to at most
//! one live algorithm. Starting an algorithm cancels the previous one;
//! cancellation does not roll back edits the algorithm already made to the
//! graph.

use crate::config::Config;
use graphxt_adapters::plugins::PluginRegistry;
use graphxt_adapters::plugins::algorithms::{Control, Outcome, Start, StartKind, StepAlgorithm};
use graphxt_common::types::VertexId;
use graphxt_common::utils::error::{Error, Result};
use graphxt_core::display::Surface;
use graphxt_core::graph::{Graph, Payload, Weight};
use tokio::time::MissedTickBehavior;

type BoxedAlgorithm<T, W> = Box<dyn StepAlgorithm<T, W>>;

/// Runs step algorithms against an owned graph and surface.
pub struct Driver<T, W, S> {
    /// Driver configuration.
    config: Config,
    /// The graph algorithms run on.
    graph: Graph<T, W>,
    /// Where annotations go.
    surface: S,
    /// Algorithms available by name.
    registry: PluginRegistry<T, W>,
    /// The live algorithm, if any.
    active: Option<BoxedAlgorithm<T, W>>,
    /// The last algorithm that terminated, kept for its result.
    finished: Option<BoxedAlgorithm<T, W>>,
    /// Ticks delivered to the current (or last) run.
    ticks: usize,
}

impl<T, W, S> Driver<T, W, S>
where
    T: Payload + 'static,
    W: Weight + 'static,
    S: Surface,
{
    /// Creates a driver with an empty graph and the built-in algorithms.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(Config::default(), surface)
    }

    /// Creates a driver with the given configuration.
    #[must_use]
    pub fn with_config(config: Config, surface: S) -> Self {
        let graph = Graph::with_config(config.graph.clone());
        Self::with_graph(config, graph, surface)
    }

    /// Creates a driver around an existing graph.
    #[must_use]
    pub fn with_graph(config: Config, graph: Graph<T, W>, surface: S) -> Self {
        Self {
            config,
            graph,
            surface,
            registry: PluginRegistry::with_builtins(),
            active: None,
            finished: None,
            ticks: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<T, W> {
        &self.graph
    }

    /// Returns the graph for editing.
    ///
    /// Returns `None` while an algorithm is live, since the algorithm's
    /// state refers to the graph it was initialized on.
    pub fn graph_mut(&mut self) -> Option<&mut Graph<T, W>> {
        if self.active.is_some() {
            return None;
        }
        Some(&mut self.graph)
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the algorithm registry.
    #[must_use]
    pub fn registry(&self) -> &PluginRegistry<T, W> {
        &self.registry
    }

    /// Returns the algorithm registry mutably, for registering extra algorithms.
    pub fn registry_mut(&mut self) -> &mut PluginRegistry<T, W> {
        &mut self.registry
    }

    /// Returns true while an algorithm is live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Ticks delivered to the current or last run, including the one that
    /// detected termination.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Name of the live algorithm, or of the last one that terminated.
    #[must_use]
    pub fn algorithm_name(&self) -> Option<&'static str> {
        self.current().map(|algorithm| algorithm.name())
    }

    /// Result of the live algorithm, or of the last one that terminated.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.current().map(|algorithm| algorithm.outcome())
    }

    fn current(&self) -> Option<&BoxedAlgorithm<T, W>> {
        self.active.as_ref().or(self.finished.as_ref())
    }

    /// Cancels the live algorithm, if any, then initializes `algorithm`.
    pub fn start(&mut self, mut algorithm: BoxedAlgorithm<T, W>, start: Start) {
        self.cancel();
        self.finished = None;
        self.ticks = 0;

        tracing::info!(algorithm = algorithm.name(), ?start, "starting algorithm");
        algorithm.initialize(&self.graph, &mut self.surface, start);
        self.active = Some(algorithm);
    }

    /// Looks up `name` in the registry and starts it.
    ///
    /// `start` and `sink` are vertex payloads. An algorithm that needs a
    /// start vertex gets the first vertex of the graph when `start` is
    /// `None`; a flow algorithm needs an explicit sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, a payload names no vertex,
    /// the graph is empty, or a required sink is missing.
    pub fn start_named(&mut self, name: &str, start: Option<&T>, sink: Option<&T>) -> Result<()> {
        let algorithm = self.registry.create(name)?;

        let start = match algorithm.requires() {
            StartKind::None => Start::None,
            StartKind::Vertex => Start::Vertex(self.resolve_or_first(start)?),
            StartKind::Pair => {
                let source = self.resolve_or_first(start)?;
                let sink = sink.ok_or_else(|| Error::MissingArgument {
                    algorithm: name.to_string(),
                    argument: "sink vertex",
                })?;
                Start::Pair {
                    source,
                    sink: self.resolve(sink)?,
                }
            }
        };

        self.start(algorithm, start);
        Ok(())
    }

    fn resolve(&self, payload: &T) -> Result<VertexId> {
        self.graph
            .vertex_by_payload(payload)
            .ok_or_else(|| Error::VertexNotFound(payload.to_string()))
    }

    fn resolve_or_first(&self, payload: Option<&T>) -> Result<VertexId> {
        match payload {
            Some(payload) => self.resolve(payload),
            None => self.graph.vertex_ids().next().ok_or(Error::EmptyGraph),
        }
    }

    /// Stops the live algorithm without rolling back its graph edits.
    ///
    /// Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(algorithm) => {
                tracing::info!(algorithm = algorithm.name(), ticks = self.ticks, "cancelled");
                true
            }
            None => false,
        }
    }

    /// Delivers one tick to the live algorithm.
    ///
    /// When the algorithm terminates it is detached; its result stays
    /// available through [`outcome`](Self::outcome). Without a live
    /// algorithm this is a no-op.
    pub fn tick(&mut self) -> Control {
        let Some(algorithm) = self.active.as_mut() else {
            return Control::Finished;
        };

        self.ticks += 1;
        let control = algorithm.step(&mut self.graph, &mut self.surface);
        tracing::debug!(algorithm = algorithm.name(), tick = self.ticks, ?control, "tick");

        if control == Control::Finished || !algorithm.is_live() {
            tracing::info!(algorithm = algorithm.name(), ticks = self.ticks, "finished");
            self.finished = self.active.take();
            return Control::Finished;
        }
        Control::Continue
    }

    fn check_limit(&self, delivered: usize) -> Result<()> {
        match self.config.max_ticks {
            Some(max) if delivered >= max => {
                tracing::warn!("tick limit reached: {}", max);
                Err(Error::TickLimitExceeded(max))
            }
            _ => Ok(()),
        }
    }

    /// Ticks the live algorithm until it terminates.
    ///
    /// Returns the number of ticks delivered by this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TickLimitExceeded`] if the configured limit is hit
    /// first. The algorithm stays live and can be resumed.
    pub fn run_to_completion(&mut self) -> Result<usize> {
        let mut delivered = 0;
        while self.is_running() {
            self.check_limit(delivered)?;
            self.tick();
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Like [`run_to_completion`](Self::run_to_completion), but waits the
    /// configured tick interval between ticks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TickLimitExceeded`] if the configured limit is hit
    /// first.
    pub async fn run_paced(&mut self) -> Result<usize> {
        if self.config.tick_interval.is_zero() {
            return self.run_to_completion();
        }

        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut delivered = 0;
        while self.is_running() {
            self.check_limit(delivered)?;
            interval.tick().await;
            self.tick();
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Consumes the driver, returning the graph and the surface.
    pub fn into_parts(self) -> (Graph<T, W>, S) {
        (self.graph, self.surface)
    }
}
