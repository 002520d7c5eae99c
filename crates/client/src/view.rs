//! Recommendation view state machine.
//!
//! ```text
//! Loading ──► Results(entries)
//!         ├─► Empty
//!         └─► Error(message)
//! ```
//!
//! Every [`RecommendationView::load`] bumps a generation counter. A response
//! that arrives after a newer `load` started is dropped instead of
//! overwriting the newer state.

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use vitalrec_core::recommendation::{top_recommendations, RecommendationEntry, RecommendationRequest};
use vitalrec_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientError;

pub const LOGIN_ROUTE: &str = "/login";
pub const MAIN_PAGE_ROUTE: &str = "/mainpage";

/// Shown when the backend could not be reached or replied with something
/// other than JSON.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching recommendations. Please try again later.";

pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_DESCRIPTION: &str = "My eyes feel dry.";

/// Questionnaire answers handed to the view by the previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Record the displayed list is saved to on exit.
    pub question_id: Option<DbId>,
    pub age: u32,
    pub description: String,
    /// Empty means "let the backend pick".
    pub brand: String,
    pub market_status: bool,
    pub allergies: String,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            question_id: None,
            age: DEFAULT_AGE,
            description: DEFAULT_DESCRIPTION.to_string(),
            brand: String::new(),
            market_status: false,
            allergies: String::new(),
        }
    }
}

impl ViewParams {
    pub fn to_request(&self) -> RecommendationRequest {
        RecommendationRequest {
            age: Some(Value::from(self.age)),
            description: Some(Value::from(self.description.as_str())),
            brand: Some(Value::from(self.brand.as_str())),
            market_status: Some(Value::Bool(self.market_status)),
            allergies: Some(Value::from(self.allergies.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Results(Vec<RecommendationEntry>),
    Empty,
    Error(String),
}

impl ViewState {
    pub fn headline(&self) -> String {
        match self {
            ViewState::Loading => "Collecting results...".to_string(),
            ViewState::Results(entries) => format!("Recommendations ({})", entries.len()),
            ViewState::Empty | ViewState::Error(_) => "No recommendations found".to_string(),
        }
    }

    pub fn subtext(&self) -> Option<&str> {
        match self {
            ViewState::Loading => Some("(This may take up to 10 seconds)"),
            ViewState::Results(_) => None,
            ViewState::Empty => Some("Try changing your answers or be more specific."),
            ViewState::Error(message) => Some(message),
        }
    }

    /// The list saved back to the question record.
    pub fn rec_list(&self) -> Vec<Value> {
        match self {
            ViewState::Results(entries) => entries.iter().map(|e| e.0.clone()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Result of one [`RecommendationView::load`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No authenticated user; navigate here without calling the backend.
    Redirect(&'static str),
    /// The response was applied and the view now shows this state.
    Rendered(ViewState),
    /// A newer `load` started while this one was in flight.
    Superseded,
}

struct Inner {
    generation: u64,
    state: ViewState,
    question_id: Option<DbId>,
}

pub struct RecommendationView {
    api: ApiClient,
    user_id: Option<DbId>,
    inner: Mutex<Inner>,
}

impl RecommendationView {
    /// `user_id` is the authenticated user, if any.
    pub fn new(api: ApiClient, user_id: Option<DbId>) -> Self {
        Self {
            api,
            user_id,
            inner: Mutex::new(Inner {
                generation: 0,
                state: ViewState::Loading,
                question_id: None,
            }),
        }
    }

    pub async fn state(&self) -> ViewState {
        self.inner.lock().await.state.clone()
    }

    pub async fn load(&self, params: ViewParams) -> LoadOutcome {
        if self.user_id.is_none() {
            tracing::info!("No authenticated user, redirecting to login");
            return LoadOutcome::Redirect(LOGIN_ROUTE);
        }

        let generation = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            inner.state = ViewState::Loading;
            inner.question_id = params.question_id;
            inner.generation
        };

        let result = self.api.run_recommendation(&params.to_request()).await;
        let next = interpret(result);

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Discarding stale recommendation response"
            );
            return LoadOutcome::Superseded;
        }
        inner.state = next.clone();
        LoadOutcome::Rendered(next)
    }

    /// Save the displayed list in the background and return where to go.
    ///
    /// The save never blocks navigation; its outcome is only logged. No
    /// request is made when the view has no question id.
    pub async fn save_and_exit(&self) -> (&'static str, Option<JoinHandle<()>>) {
        let (question_id, rec_list) = {
            let inner = self.inner.lock().await;
            (inner.question_id, inner.state.rec_list())
        };

        let Some(question_id) = question_id else {
            tracing::warn!("No question id, skipping recommendation save");
            return (MAIN_PAGE_ROUTE, None);
        };

        let api = self.api.clone();
        let handle = tokio::spawn(async move {
            match api.update_question(question_id, &rec_list).await {
                Ok(()) => tracing::info!(question_id, count = rec_list.len(), "Saved recommendations"),
                Err(e) => tracing::error!(question_id, error = %e, "Failed to save recommendations"),
            }
        });

        (MAIN_PAGE_ROUTE, Some(handle))
    }
}

fn interpret(result: Result<Value, ClientError>) -> ViewState {
    let body = match result {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Recommendation request failed");
            return ViewState::Error(FETCH_FAILED_MESSAGE.to_string());
        }
    };

    if let Some(entries) = top_recommendations(&body) {
        return if entries.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Results(entries)
        };
    }

    match body.get("error") {
        Some(Value::String(message)) => ViewState::Error(message.clone()),
        Some(other) => ViewState::Error(other.to_string()),
        None => ViewState::Empty,
    }
}
