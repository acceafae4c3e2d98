use std::sync::Arc;

use weather_core::{GatewayError, ProviderConfig, WeatherGateway, WeatherProvider};

/// Shared by every request; the gateway is built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, GatewayError> {
        let gateway = WeatherGateway::new(config.clone())?;
        Ok(Self::new(Arc::new(gateway)))
    }
}
