//! Repository for the `questions` table.

use serde_json::Value;
use sqlx::PgPool;
use vitalrec_core::types::DbId;

use crate::models::question::{CreateQuestion, Question, UpdateQuestion};

/// Column list for questions queries.
const COLUMNS: &str = "id, user_id, gender, age, allergies, description, rec_list, \
    created_at, updated_at";

/// Provides CRUD operations for questionnaire submissions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (user_id, gender, age, allergies, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.user_id)
            .bind(&input.gender)
            .bind(input.age)
            .bind(&input.allergies)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List every question, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// Find a question by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the questions submitted by one user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the recommendation list of a question, returning the
    /// updated row. The previous list is discarded, not merged.
    pub async fn update_rec_list(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET rec_list = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(Value::Array(input.rec_list.clone()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a question by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
