//! Error types for port operations.

/// Errors talking to the remote playbook API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("Playbook API request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status.
    #[error("Playbook API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded or mapped onto the domain.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }
}
