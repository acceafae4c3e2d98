use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{endpoint::Endpoint, error::GatewayError};

/// Anything that can answer a weather operation with a provider document.
///
/// HTTP handlers hold a `dyn WeatherProvider` so they never see URLs or keys.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, endpoint: Endpoint, query: &str) -> Result<Value, GatewayError>;
}
