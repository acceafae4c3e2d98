use reqwest::StatusCode;
use thiserror::Error;

use crate::endpoint::Endpoint;

/// Failure of a single gateway call.
///
/// Every variant that comes out of a request names the endpoint it was
/// issued against, so the caller can report it without extra context.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to WeatherAPI {} failed", .endpoint.path())]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("WeatherAPI {} request failed with status {status}: {message}", .endpoint.path())]
    Upstream {
        endpoint: Endpoint,
        status: StatusCode,
        code: Option<i64>,
        message: String,
    },

    #[error("Failed to parse WeatherAPI {} JSON", .endpoint.path())]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            GatewayError::Client(_) => None,
            GatewayError::Transport { endpoint, .. }
            | GatewayError::Upstream { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }

    /// Display text followed by each underlying cause, e.g. the refused
    /// connection behind a `Transport` failure.
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }

    /// Message reported by the provider itself, if it sent one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            GatewayError::Upstream { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Provider error code (e.g. 1006 for "No matching location found.").
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            GatewayError::Upstream { code, .. } => *code,
            _ => None,
        }
    }
}
