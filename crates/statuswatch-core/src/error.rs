use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("endpoint {endpoint} answered with HTTP {status}")]
    Server { endpoint: String, status: u16 },

    #[error("malformed response: {0}")]
    Schema(String),

    #[error("unknown status code '{0}'")]
    UnknownStatus(String),
}

impl WatchError {
    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            WatchError::Config(_) => "config",
            WatchError::Transport { .. } => "transport",
            WatchError::Server { .. } => "server",
            WatchError::Schema(_) => "schema",
            WatchError::UnknownStatus(_) => "unknown_status",
        }
    }
}

/// A failed delivery through a [`Notifier`](crate::Notifier).
///
/// Never propagated past the scheduler: it is logged and dropped.
#[derive(Debug, Error)]
#[error("delivery to {recipient} failed: {reason}")]
pub struct NotifyError {
    pub recipient: String,
    pub reason: String,
}

impl NotifyError {
    pub fn new(recipient: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            recipient: recipient.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_mentions_status() {
        let err = WatchError::Server {
            endpoint: "http://api.test/statuses/".into(),
            status: 503,
        };
        assert_eq!(err.kind(), "server");
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn notify_error_display() {
        let err = NotifyError::new("42", "chat not found");
        assert_eq!(err.to_string(), "delivery to 42 failed: chat not found");
    }
}
