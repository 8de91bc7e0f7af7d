use thiserror::Error;

/// Why a launch request did not produce a JSON body.
///
/// Everything except [`RequestError::Cancelled`] is a network failure. The
/// widget folds both kinds into the same `Error` phase; the distinction only
/// matters to code driving the lifecycle directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl RequestError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Non-success status, transport error or undecodable body.
    pub fn is_network_failure(&self) -> bool {
        !self.is_cancelled()
    }
}
