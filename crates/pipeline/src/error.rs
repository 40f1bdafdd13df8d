//! Errors raised while talking to model APIs or persisting results.

/// Errors from the generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Reading an uploaded input or writing a generated track failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reply could not be decoded.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing the result back failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Return the response unchanged on a 2xx status, or a
/// [`PipelineError::Api`] carrying the status and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, PipelineError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(PipelineError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
