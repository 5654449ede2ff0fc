#![deny(unused)]
//! HTTP gateway for ValueFrontier.
//!
//! This crate provides the HTTP entry point for the system: model
//! selection, frontier listings, and snapshot refresh control.

pub mod server;

pub use server::{AppState, GatewayConfig, GatewayServer};
