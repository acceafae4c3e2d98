use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use weather_core::Endpoint;

use crate::{error::AppError, state::AppState};

/// `q` is what the pages send; `query` is accepted too and `q` wins when both are set.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    q: Option<String>,
    query: Option<String>,
}

impl LookupParams {
    fn into_query(self) -> Option<String> {
        [self.q, self.query].into_iter().flatten().find(|q| !q.is_empty())
    }
}

pub async fn weather_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, AppError> {
    lookup(&state, Endpoint::Current, params).await
}

pub async fn forecast_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, AppError> {
    lookup(&state, Endpoint::Forecast, params).await
}

pub async fn operation_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, AppError> {
    let endpoint = Endpoint::try_from(operation.as_str())
        .map_err(|_| AppError::UnknownOperation(operation))?;

    lookup(&state, endpoint, params).await
}

pub async fn health_handler() -> &'static str {
    "ok"
}

async fn lookup(
    state: &AppState,
    endpoint: Endpoint,
    params: LookupParams,
) -> Result<Json<Value>, AppError> {
    let query = params.into_query().ok_or(AppError::MissingQuery)?;

    info!(operation = %endpoint, query = %query, "Fetching weather data");
    let doc = state.provider.fetch(endpoint, &query).await?;

    Ok(Json(doc))
}
