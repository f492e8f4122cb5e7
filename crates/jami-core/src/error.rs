//! Failure modes of a chart computation call.

/// Error surfaced by a [`ChartService`](crate::ChartService) call.
///
/// Never written into the cache; the orchestrator turns every variant into one generic notice.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// The request did not complete (unreachable host, timeout, broken connection).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The service answered with a non-2xx status. `body` is the response text, verbatim.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    /// A 2xx body that does not match the chart shape.
    #[error("malformed chart response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ChartError {
    pub fn network<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ChartError::Network(Box::new(err))
    }

    /// HTTP status of a `Status` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChartError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
