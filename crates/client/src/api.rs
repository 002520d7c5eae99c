//! REST client for the questionnaire backend.

use serde_json::Value;

use vitalrec_core::recommendation::RecommendationRequest;
use vitalrec_core::types::DbId;

use crate::error::ClientError;

/// HTTP client for one backend instance.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - Backend origin, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /run-python`.
    ///
    /// The body is parsed as JSON whatever the status code: error
    /// responses carry an `error` field the view displays.
    pub async fn run_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(format!("{}/run-python", self.base_url))
            .json(request)
            .send()
            .await?;

        tracing::debug!(status = response.status().as_u16(), "Recommendation response");
        Ok(response.json::<Value>().await?)
    }

    /// `PATCH /api/questions/{question_id}` replacing the stored `rec_list`.
    pub async fn update_question(
        &self,
        question_id: DbId,
        rec_list: &[Value],
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .patch(format!("{}/api/questions/{}", self.base_url, question_id))
            .json(&serde_json::json!({ "rec_list": rec_list }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
