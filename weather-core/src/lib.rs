//! Core library for the `weather` tools.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The gateway onto the WeatherAPI.com REST API
//! - Typed summaries of provider documents for display
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use endpoint::Endpoint;
pub use error::GatewayError;
pub use gateway::WeatherGateway;
pub use provider::WeatherProvider;
