//! Error types for the eventplan ecosystem.

use thiserror::Error;

/// Errors that can occur in eventplan operations.
#[derive(Error, Debug)]
pub enum EventPlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never completed (connection refused, DNS, timeout...).
    #[error("Failed to {operation}: {message}")]
    Transport { operation: String, message: String },

    /// The backend answered with a non-2xx status.
    #[error("Failed to {operation}: {status}")]
    Status { operation: String, status: u16 },

    #[error("Could not decode response for {operation}: {message}")]
    Decode { operation: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EventPlanError {
    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            EventPlanError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for eventplan operations.
pub type EventPlanResult<T> = Result<T, EventPlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_embeds_code() {
        let err = EventPlanError::Status {
            operation: "load sessions".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Failed to load sessions: 503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn transport_has_no_status() {
        let err = EventPlanError::Transport {
            operation: "delete session".into(),
            message: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
