//! Analysis engine: walking commit history and folding it into versions

pub mod aggregator;
pub mod reconcile;
pub mod walker;

pub use aggregator::{TrailOrigin, VersionAggregator};
pub use reconcile::{reconcile_merge, ReconcileQueue};
pub use walker::GraphWalker;
