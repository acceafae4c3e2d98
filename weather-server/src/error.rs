use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use weather_core::GatewayError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Failed to fetch weather data")]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingQuery => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::UnknownOperation(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            AppError::Gateway(err) => {
                // Provider text goes out as-is; fall back to our own description.
                let detail = err
                    .provider_message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| err.detail());

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "detail": detail }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
