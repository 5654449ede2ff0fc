#![deny(unused)]
//! Core types, traits, and error definitions for ValueFrontier.
//!
//! This crate provides the foundational building blocks shared across the
//! metrics, engine, provider, and gateway layers.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
