use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::ProviderConfig, endpoint::Endpoint, error::GatewayError, provider::WeatherProvider,
};

/// Thin client for the WeatherAPI.com REST API.
///
/// Every operation goes through [`WeatherGateway::fetch_with`], which sends the
/// same parameter set (`key`, query, `aqi=yes`, `days`) regardless of the
/// endpoint and hands back the decoded body untouched. Failures are logged
/// once and returned; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct WeatherGateway {
    config: ProviderConfig,
    http: Client,
}

impl WeatherGateway {
    pub fn new(config: ProviderConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(GatewayError::Client)?;

        Ok(Self { config, http })
    }

    pub fn with_client(config: ProviderConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub async fn current_weather(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Current, query).await
    }

    pub async fn forecast(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Forecast, query).await
    }

    pub async fn search(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Search, query).await
    }

    pub async fn history(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::History, query).await
    }

    pub async fn alerts(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Alerts, query).await
    }

    pub async fn marine_weather(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Marine, query).await
    }

    pub async fn future_weather(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Future, query).await
    }

    pub async fn time_zone(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::TimeZone, query).await
    }

    pub async fn sports_weather(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Sports, query).await
    }

    pub async fn astronomy(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Astronomy, query).await
    }

    pub async fn ip_lookup(&self, query: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::IpLookup, query).await
    }

    pub async fn fetch(&self, endpoint: Endpoint, query: &str) -> Result<Value, GatewayError> {
        self.fetch_with(endpoint, query, &[]).await
    }

    /// Shared request routine. `overrides` replace default parameters of the
    /// same name and are appended otherwise.
    pub async fn fetch_with(
        &self,
        endpoint: Endpoint,
        query: &str,
        overrides: &[(&str, &str)],
    ) -> Result<Value, GatewayError> {
        let url = self.url_for(endpoint);
        let params = self.params(query, overrides);

        debug!(endpoint = endpoint.path(), query, "Requesting WeatherAPI");

        let result = self.send(endpoint, &url, &params).await;
        if let Err(err) = &result {
            error!(endpoint = endpoint.path(), "Error making request to {url}: {}", err.detail());
        }
        result
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint.path())
    }

    fn params(&self, query: &str, overrides: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut params = vec![
            ("key".to_string(), self.config.api_key.clone()),
            (self.config.query_param.clone(), query.to_string()),
            ("aqi".to_string(), "yes".to_string()),
            ("days".to_string(), self.config.forecast_days.to_string()),
        ];

        for (name, value) in overrides {
            match params.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = (*value).to_string(),
                None => params.push(((*name).to_string(), (*value).to_string())),
            }
        }

        params
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Value, GatewayError> {
        let res = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|source| GatewayError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(upstream_error(endpoint, status, &body));
        }

        let doc: Value = serde_json::from_slice(&body)
            .map_err(|source| GatewayError::Decode { endpoint, source })?;

        // The provider occasionally reports errors in a 2xx body.
        let provider_error =
            doc.get("error").and_then(|e| ProviderErrorDetail::deserialize(e).ok());
        if let Some(detail) = provider_error {
            return Err(GatewayError::Upstream {
                endpoint,
                status,
                code: detail.code,
                message: detail.message,
            });
        }

        Ok(doc)
    }
}

#[async_trait]
impl WeatherProvider for WeatherGateway {
    async fn fetch(&self, endpoint: Endpoint, query: &str) -> Result<Value, GatewayError> {
        WeatherGateway::fetch(self, endpoint, query).await
    }
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    code: Option<i64>,
    message: String,
}

fn upstream_error(endpoint: Endpoint, status: StatusCode, body: &[u8]) -> GatewayError {
    let (code, message) = match serde_json::from_slice::<ProviderErrorBody>(body) {
        Ok(parsed) => (parsed.error.code, parsed.error.message),
        Err(_) if body.is_empty() => {
            (None, status.canonical_reason().unwrap_or("no response body").to_string())
        }
        Err(_) => (None, truncate_body(&String::from_utf8_lossy(body))),
    };

    GatewayError::Upstream { endpoint, status, code, message }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(config: ProviderConfig) -> WeatherGateway {
        WeatherGateway::with_client(config, Client::new())
    }

    #[test]
    fn params_are_uniform_across_endpoints() {
        let gw = gateway(ProviderConfig::new("K"));
        let params = gw.params("London", &[]);

        assert_eq!(
            params,
            vec![
                ("key".to_string(), "K".to_string()),
                ("query".to_string(), "London".to_string()),
                ("aqi".to_string(), "yes".to_string()),
                ("days".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn overrides_replace_or_append() {
        let gw = gateway(ProviderConfig::new("K"));
        let params = gw.params("Paris", &[("days", "3"), ("dt", "2024-01-01")]);

        assert_eq!(params.len(), 5);
        assert!(params.contains(&("days".to_string(), "3".to_string())));
        assert!(params.contains(&("dt".to_string(), "2024-01-01".to_string())));
        assert!(!params.contains(&("days".to_string(), "9".to_string())));
    }

    #[test]
    fn query_param_name_is_configurable() {
        let mut cfg = ProviderConfig::new("K");
        cfg.query_param = "q".into();
        let params = gateway(cfg).params("48.85,2.35", &[]);

        assert_eq!(params[1], ("q".to_string(), "48.85,2.35".to_string()));
    }

    #[test]
    fn url_joins_base_and_path() {
        let gw = gateway(ProviderConfig::new("K").with_base_url("http://localhost:9000/v1/"));
        assert_eq!(gw.url_for(Endpoint::Astronomy), "http://localhost:9000/v1/astronomy.json");

        let gw = gateway(ProviderConfig::new("K"));
        assert_eq!(gw.url_for(Endpoint::Current), "http://api.weatherapi.com/v1/current.json");
    }

    #[test]
    fn upstream_error_reads_provider_payload() {
        let body = br#"{"error":{"code":2006,"message":"API key is invalid."}}"#;
        let err = upstream_error(Endpoint::Current, StatusCode::UNAUTHORIZED, body);

        assert_eq!(err.provider_code(), Some(2006));
        assert_eq!(err.provider_message(), Some("API key is invalid."));
    }

    #[test]
    fn upstream_error_falls_back_to_raw_body() {
        let err = upstream_error(Endpoint::Search, StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(err.provider_message(), Some("<html>oops</html>"));
        assert!(err.provider_code().is_none());

        let err = upstream_error(Endpoint::Search, StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(err.provider_message(), Some("Service Unavailable"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
