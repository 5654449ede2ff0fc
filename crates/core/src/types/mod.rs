//! Core type definitions for ValueFrontier.
//!
//! Broken down by entity:
//! - `record`: raw performance observations and benchmark run bookkeeping
//! - `summary`: per-model aggregated statistics
//! - `frontier`: ranked efficiency views and the published snapshot
//! - `decision`: routing queries, decisions, and rejection reasons

pub mod decision;
pub mod frontier;
pub mod record;
pub mod summary;

pub use decision::*;
pub use frontier::*;
pub use record::*;
pub use summary::*;
