//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, lazy_pool, shell_scorer, write_scorer};
use sqlx::PgPool;
use vitalrec_core::scorer::ScorerConfig;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_ok_when_db_and_scorer_are_ready(pool: PgPool) {
    let script = write_scorer("echo '{}'\n");
    let app = build_test_app(pool, shell_scorer(&script, Duration::from_secs(5)));

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["scorer"]["runtime"], "shell");
    assert_eq!(json["scorer"]["script_found"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_scorer_script_degrades_health(pool: PgPool) {
    let app = build_test_app(
        pool,
        ScorerConfig {
            script_path: "check.py".to_string(),
            working_directory: Some("/nonexistent/scorer".to_string()),
            ..ScorerConfig::default()
        },
    );

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["scorer"]["runtime"], "python");
    assert_eq!(json["scorer"]["script"], "check.py");
    assert_eq!(json["scorer"]["script_found"], false);
}

#[tokio::test]
async fn unreachable_database_degrades_health() {
    let script = write_scorer("echo '{}'\n");
    let app = build_test_app(lazy_pool(), shell_scorer(&script, Duration::from_secs(5)));

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(lazy_pool(), ScorerConfig::default());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
