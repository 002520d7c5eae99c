//! Client-side recommendation view for the questionnaire backend.
//!
//! [`api::ApiClient`] talks HTTP to the backend; [`view::RecommendationView`]
//! drives the loading / results / empty / error presentation states.

pub mod api;
pub mod error;
pub mod view;
