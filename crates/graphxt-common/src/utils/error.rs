//! Error types for GraphXT.
//!
//! Precondition violations inside algorithms are programming errors and
//! panic. This type covers the input-facing paths: resolving user-supplied
//! payloads, looking up algorithms by name, and driving ticks.

use thiserror::Error;

/// Result alias used across GraphXT.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the driver, the registry, and the CLI input paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No vertex carries the given payload.
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    /// An algorithm needs at least one vertex.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// No algorithm is registered under the given name.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A required start argument was not supplied.
    #[error("algorithm '{algorithm}' requires a {argument}")]
    MissingArgument {
        /// Algorithm name.
        algorithm: String,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// The driver gave up before the algorithm terminated.
    #[error("tick limit of {0} exceeded before the algorithm finished")]
    TickLimitExceeded(usize),

    /// Malformed user input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
