//! Shared response envelope types for API handlers.
//!
//! Question endpoints use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.
//! `POST /run-python` is the exception: it relays the scorer's JSON as-is.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body returned by successful deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
