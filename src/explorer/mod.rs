//! Incremental graph state and layout orchestration.
//!
//! The explorer keeps two registries (nodes and links), decides whether an
//! expansion needs remote data or can reveal what is already known, and runs
//! a bounded force-directed layout over whatever is currently visible. All
//! drawing goes through the [`Renderer`] trait.

pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod links;
pub mod nodes;
pub mod placement;
pub mod renderer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ExplorerConfig, LayoutConfig};
pub use controller::{Direction, FetchOutcome, FetchTicket, GraphController};
pub use error::{ExplorerError, FetchError};
pub use fetch::{DataFetcher, Fragment, LinkTriple, NodeSummary, StaticFetcher};
pub use layout::{LayoutEngine, LayoutFrame, LayoutRun, Placement};
pub use links::{Link, LinkRegistry};
pub use nodes::{Node, NodeRegistry};
pub use renderer::{Offset, Renderer};

/// Stable external identifier of a dataset entity.
pub type NodeId = String;
