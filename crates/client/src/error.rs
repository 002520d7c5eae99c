/// Errors from the backend HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request itself failed (connect, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
