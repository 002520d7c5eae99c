//! Readiness of the two things a recommendation round-trip depends on: the
//! database and the scorer script.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is ready, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub scorer: ScorerHealth,
}

#[derive(Serialize)]
pub struct ScorerHealth {
    pub runtime: &'static str,
    pub script: String,
    /// The script exists where the child process will look for it.
    pub script_found: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vitalrec_db::health_check(&state.pool).await.is_ok();

    let config = state.scorer.config();
    let scorer = ScorerHealth {
        runtime: config.runtime.as_str(),
        script: config.script_path.clone(),
        script_found: state.scorer.script_available().await,
    };

    if !scorer.script_found {
        tracing::warn!(script = %scorer.script, "Scorer script not found");
    }

    Json(HealthResponse {
        status: if db_healthy && scorer.script_found { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        scorer,
    })
}

/// `GET /health`, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
