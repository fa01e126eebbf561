//! Rapidly-exploring random tree (RRT) growth over a bounded,
//! continuous configuration space.
//!
//! Main components:
//! - [`configuration`] — immutable points, distances, and their codecs.
//! - [`space`] — per-dimension bounds and uniform sampling.
//! - [`tree`] — arena-backed rooted tree with nearest-vertex search.
//! - [`steering`] — bounded-step extension toward a target.
//! - [`planner`] — the sample/extend loop and its build trace.
//! - [`config`] — build parameters, loadable from TOML.
//! - [`error`] — the crate error type.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod configuration;
pub mod error;
pub mod planner;
pub mod space;
pub mod steering;
pub mod tree;
pub mod types;

pub use config::Config;
pub use configuration::{ConfigKey, Configuration};
pub use error::{Result, RrtError};
pub use planner::{BuildTrace, Chain, Planner, PlannerState, SeededPlanner};
pub use space::ConfigurationSpace;
pub use steering::Steering;
pub use tree::{Tree, Vertex};
pub use types::{ROOT, VertexId};
