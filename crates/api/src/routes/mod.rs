pub mod health;
pub mod questions;
pub mod recommendations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                      list, create
/// /questions/{question_id}        get, update rec_list, delete
/// /questions/user/{user_id}       list by user
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/questions", questions::router())
}
