#![deny(unused)]

//! Provider clients, the provider registry, and static pricing.

pub mod http;
pub mod mock;
pub mod pricing;
pub mod registry;

pub use http::HttpGenerator;
pub use mock::MockGenerator;
pub use pricing::{ModelPricing, PricingRegistry, FLOOR_INPUT_TOKENS, FLOOR_OUTPUT_TOKENS};
pub use registry::{ProviderRegistry, ProviderStatus};
