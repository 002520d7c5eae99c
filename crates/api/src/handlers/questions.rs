//! Handlers for questionnaire submissions.
//!
//! Plain CRUD over the `questions` table plus the `rec_list` save used by
//! the recommendation view on exit.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vitalrec_core::error::CoreError;
use vitalrec_core::types::DbId;
use vitalrec_db::models::question::{CreateQuestion, UpdateQuestion};
use vitalrec_db::repositories::QuestionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::response::{DataResponse, DeleteResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Question",
        id,
    })
}

/// GET /api/questions
///
/// List every question.
pub async fn list_questions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let questions = QuestionRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// GET /api/questions/{question_id}
pub async fn get_question(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or_else(|| not_found(question_id))?;

    Ok(Json(DataResponse { data: question }))
}

/// GET /api/questions/user/{user_id}
///
/// List the questions submitted by one user.
pub async fn list_user_questions(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let questions = QuestionRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /api/questions
pub async fn create_question(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateQuestion>,
) -> AppResult<impl IntoResponse> {
    if matches!(input.age, Some(age) if age < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "age must not be negative".to_string(),
        )));
    }

    let question = QuestionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        question_id = question.id,
        user_id = question.user_id,
        "Question created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PATCH /api/questions/{question_id}
///
/// Replace the question's recommendation list and return the updated row.
pub async fn update_question(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateQuestion>,
) -> AppResult<impl IntoResponse> {
    let question = QuestionRepo::update_rec_list(&state.pool, question_id, &input)
        .await?
        .ok_or_else(|| not_found(question_id))?;

    tracing::info!(
        question_id,
        rec_count = input.rec_list.len(),
        "Recommendation list saved"
    );

    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/questions/{question_id}
pub async fn delete_question(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = QuestionRepo::delete(&state.pool, question_id).await?;

    if !deleted {
        return Err(not_found(question_id));
    }

    tracing::info!(question_id, "Question deleted");

    Ok(Json(DataResponse {
        data: DeleteResponse { success: true },
    }))
}
