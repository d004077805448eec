//! # graphxt-engine
//!
//! The main entry point for GraphXT: owns the graph and the display surface,
//! and drives one step algorithm at a time.
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`driver`] - Tick delivery, cancellation, and paced runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;

pub use config::Config;
pub use driver::Driver;
