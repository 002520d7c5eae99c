//! Handler for the recommendation scorer endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use vitalrec_core::recommendation::RecommendationRequest;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /run-python
///
/// Validate the questionnaire parameters, run the scorer, and relay its
/// JSON output unchanged. Missing `age`/`description` → 400; scorer
/// failure or timeout → 501; non-JSON scorer output → 500.
pub async fn run_recommendation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> AppResult<Json<Value>> {
    let resolved = request.resolve()?;

    tracing::info!(
        age = resolved.age,
        brand = %resolved.brand,
        market_status = resolved.market_status,
        "Running recommendation scorer"
    );

    let result = state.scorer.recommend(&resolved).await?;

    Ok(Json(result))
}
