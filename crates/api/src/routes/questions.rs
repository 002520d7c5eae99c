//! Route definitions for questionnaire submissions.
//!
//! Mounted at `/api/questions` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Question routes.
///
/// ```text
/// GET    /                        -> list_questions
/// POST   /                        -> create_question
/// GET    /user/{user_id}          -> list_user_questions
/// GET    /{question_id}           -> get_question
/// PATCH  /{question_id}           -> update_question
/// DELETE /{question_id}           -> delete_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/user/{user_id}", get(questions::list_user_questions))
        .route(
            "/{question_id}",
            get(questions::get_question)
                .patch(questions::update_question)
                .delete(questions::delete_question),
        )
}
