#![deny(unused)]
//! Metrics persistence for ValueFrontier.
//!
//! This crate provides the `MetricsStore` implementations: a DashMap-backed
//! in-memory store for development and tests, and a SQLite-backed store for
//! single-node durable deployments.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryMetricsStore;
pub use sqlite::SqliteMetricsStore;
