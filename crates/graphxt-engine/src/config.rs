//! Driver configuration.

use graphxt_core::GraphConfig;
use std::time::Duration;

/// Default delay between paced ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration for a [`Driver`](crate::Driver).
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on ticks for a single run; `None` means unbounded.
    pub max_ticks: Option<usize>,
    /// Delay between ticks in a paced run.
    pub tick_interval: Duration,
    /// Configuration of the owned graph.
    pub graph: GraphConfig,
}

impl Config {
    /// Sets the tick limit.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Sets the delay between paced ticks.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the graph configuration.
    #[must_use]
    pub fn with_graph_config(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_ticks: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            graph: GraphConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_max_ticks(10)
            .with_tick_interval(Duration::from_millis(5));

        assert_eq!(config.max_ticks, Some(10));
        assert_eq!(config.tick_interval, Duration::from_millis(5));
        assert_eq!(Config::default().max_ticks, None);
    }
}
