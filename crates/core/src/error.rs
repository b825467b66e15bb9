//! Client error taxonomy.

use thiserror::Error;

/// Result type used at the transport boundary.
pub type ApiResult<T> = Result<T, ApiError>;

/// Classified failure of one server round-trip.
///
/// Keep this focused on what the state layer needs to decide: whether a
/// response existed, whether the server supplied a displayable message, and
/// whether the credential itself was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, dropped).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status and, usually, a message body.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// 401: the credential is missing, expired, or invalid.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A success response decoded to something other than the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn rejected(status: u16, msg: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: msg.into(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// True when the credential itself was rejected (forces a session reset
    /// when hit during verification).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message suitable for a slice `error` field: the server-supplied text
    /// when one exists, otherwise the caller's fallback.
    pub fn surface_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } | Self::Unauthorized(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::rejected(400, "Email already in use");
        assert_eq!(err.surface_message("Registration failed"), "Email already in use");
    }

    #[test]
    fn fallback_used_for_transport_and_empty_messages() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.surface_message("Login failed"), "Login failed");

        let err = ApiError::rejected(500, "  ");
        assert_eq!(err.surface_message("Login failed"), "Login failed");
    }

    #[test]
    fn unauthorized_is_flagged() {
        assert!(ApiError::unauthorized("token expired").is_unauthorized());
        assert!(!ApiError::rejected(403, "forbidden").is_unauthorized());
    }
}
