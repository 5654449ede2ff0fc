#![deny(unused)]

//! Value routing engine.
//!
//! - [`aggregate`]: reduce raw performance records into per-model means
//! - [`frontier`]: Pareto dominance, ranking, and snapshot construction
//! - [`router`]: deterministic cheapest-meeting-threshold selection
//! - [`snapshot`]: the published snapshot cache and its refresh loop

pub mod aggregate;
pub mod frontier;
pub mod router;
pub mod snapshot;

pub use frontier::{build_snapshot, build_view, dominates};
pub use router::{select_on, ValueRouter};
pub use snapshot::{spawn_refresh_loop, FrontierCache, RefreshStats};
