use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// The request never reached a handler (no `xcall`, spawn failure,
    /// timeout, connection refused, ...).
    #[error("{transport} transport error: {message}")]
    Transport {
        transport: &'static str,
        message: String,
    },

    /// The handler answered, and the answer was a failure.
    #[error("remote error: {message}")]
    Remote {
        message: String,
        code: Option<String>,
    },

    #[error("malformed response ({reason})\n  payload: {payload}")]
    MalformedResponse { payload: String, reason: String },

    #[error("invalid action '{0}': expected '/'-separated segments of letters, digits, '-' or '_'")]
    InvalidAction(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ActionError {
    pub(crate) fn transport(transport: &'static str, message: impl Into<String>) -> Self {
        ActionError::Transport {
            transport,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(payload: &str, reason: impl Into<String>) -> Self {
        ActionError::MalformedResponse {
            payload: payload.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ActionError::Transport { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ActionError::Remote { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ActionError::MalformedResponse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
