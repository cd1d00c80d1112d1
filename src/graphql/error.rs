use serde::Deserialize;

/// Failure modes of a GraphQL round trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphqlError {
    #[error("[Network] {0}")]
    Transport(String),

    #[error("[Network] HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("[GraphQL] {}", .0.join("; "))]
    Server(Vec<String>),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response carried neither data nor errors")]
    MissingData,

    #[error("Subscription protocol error: {0}")]
    Protocol(String),
}

impl GraphqlError {
    /// The user-facing message, if the error carries one.
    ///
    /// Accessors fall back to a resource-specific text when this is `None`.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::MissingData => None,
            Self::Server(messages) if messages.iter().all(|m| m.trim().is_empty()) => None,
            Self::Transport(msg) | Self::Decode(msg) | Self::Protocol(msg)
                if msg.trim().is_empty() =>
            {
                None
            }
            other => Some(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for GraphqlError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for GraphqlError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: String,
}

impl ErrorEntry {
    pub(crate) fn into_error(entries: Vec<ErrorEntry>) -> GraphqlError {
        GraphqlError::Server(entries.into_iter().map(|e| e.message).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_joins_entries() {
        let err = GraphqlError::Server(vec!["bad limit".into(), "bad offset".into()]);
        assert_eq!(
            err.message().as_deref(),
            Some("[GraphQL] bad limit; bad offset")
        );
    }

    #[test]
    fn test_blank_server_error_has_no_message() {
        assert_eq!(GraphqlError::Server(vec![String::new()]).message(), None);
        assert_eq!(GraphqlError::Server(vec![]).message(), None);
    }

    #[test]
    fn test_missing_data_has_no_message() {
        assert_eq!(GraphqlError::MissingData.message(), None);
    }

    #[test]
    fn test_transport_message() {
        let err = GraphqlError::Transport("connection refused".into());
        assert_eq!(err.message().as_deref(), Some("[Network] connection refused"));
        assert_eq!(GraphqlError::Transport("  ".into()).message(), None);
    }
}
