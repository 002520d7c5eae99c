//! Questionnaire submission model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use vitalrec_core::types::{DbId, Timestamp};

/// A row from the `questions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: DbId,
    pub user_id: DbId,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub allergies: Option<String>,
    pub description: Option<String>,
    /// JSON array of recommendation tuples; `None` until saved.
    pub rec_list: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub user_id: DbId,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub allergies: Option<String>,
    pub description: Option<String>,
}

/// DTO for attaching a recommendation list. The list replaces whatever
/// was stored before.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuestion {
    pub rec_list: Vec<Value>,
}
