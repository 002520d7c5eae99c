use axum::routing::post;
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Mount the scorer endpoint (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/run-python", post(recommendations::run_recommendation))
}
