//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::json::ApiJson;
use super::status::{Health, LocalStatus};
use crate::dispatch::{self, BatchRequest, BatchResponse};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use std::sync::Arc;
use versio_engines::metric::{MetricKind, MetricRequest, MetricScore};
use versio_engines::translate::{TranslationRequest, TranslationResult};

type Shared = State<Arc<AppState>>;

pub(super) async fn translate(
    State(state): Shared,
    Path(provider): Path<String>,
    ApiJson(request): ApiJson<TranslationRequest>,
) -> Result<Json<TranslationResult>, ApiError> {
    let result = dispatch::translate(&state.engines, &provider, request).await?;
    Ok(Json(result))
}

async fn score(
    state: &AppState,
    kind: MetricKind,
    request: MetricRequest,
) -> Result<Json<MetricScore>, ApiError> {
    let score = dispatch::score(&state.engines, kind, request).await?;
    Ok(Json(score))
}

pub(super) async fn bertscore(
    State(state): Shared,
    ApiJson(request): ApiJson<MetricRequest>,
) -> Result<Json<MetricScore>, ApiError> {
    score(&state, MetricKind::BertScore, request).await
}

pub(super) async fn comet(
    State(state): Shared,
    ApiJson(request): ApiJson<MetricRequest>,
) -> Result<Json<MetricScore>, ApiError> {
    score(&state, MetricKind::Comet, request).await
}

pub(super) async fn comet_qe(
    State(state): Shared,
    ApiJson(request): ApiJson<MetricRequest>,
) -> Result<Json<MetricScore>, ApiError> {
    score(&state, MetricKind::CometQe, request).await
}

pub(super) async fn bleurt(
    State(state): Shared,
    ApiJson(request): ApiJson<MetricRequest>,
) -> Result<Json<MetricScore>, ApiError> {
    score(&state, MetricKind::Bleurt, request).await
}

pub(super) async fn batch(
    State(state): Shared,
    ApiJson(batch): ApiJson<BatchRequest>,
) -> Json<BatchResponse> {
    Json(dispatch::score_batch(&state.engines, batch).await)
}

pub(super) async fn local_status(State(state): Shared) -> Json<LocalStatus> {
    Json(LocalStatus::probe(&state.engines))
}

pub(super) async fn health(State(state): Shared) -> Json<Health> {
    Json(Health::probe(&state.engines))
}

pub(super) async fn page(State(state): Shared) -> Response {
    state.assets.page().await
}

pub(super) async fn synonyms(State(state): Shared) -> Response {
    state.assets.synonyms().await
}
