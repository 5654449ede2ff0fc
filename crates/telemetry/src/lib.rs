#![deny(unused)]
//! Observability for ValueFrontier.
//!
//! This crate provides:
//! - Stdout logging with env-driven filters (plain or JSON)
//! - Prometheus metrics helpers for HTTP, routing, and refresh activity

pub mod metrics;
pub mod tracing_layer;

pub use metrics::{setup_metrics_recorder, track_refresh, track_request, track_route_decision};
pub use tracing_layer::configure_tracing;
