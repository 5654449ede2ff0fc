//! Boundary traits for ValueFrontier.
//!
//! Traits are organized by collaborator:
//! - `store`: metrics persistence (MetricsStore)
//! - `generate`: provider text generation (TextGenerator)
//! - `judge`: quality scoring (QualityJudge)

pub mod generate;
pub mod judge;
pub mod store;

pub use generate::*;
pub use judge::*;
pub use store::*;
