use thiserror::Error;

/// Failure of a single completion attempt, as reported by a `RequestHandler`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    /// Transport failure or non-2xx status. Worth retrying.
    #[error("{0}")]
    Network(String),
    /// Anything else: unreadable body, missing fields, broken handler.
    #[error("{0}")]
    Unexpected(String),
}

/// Terminal failure of a whole chat turn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    #[error("API key required! Set it with !key <your key>")]
    MissingCredential,
    #[error("{message} (after {attempts} attempt(s))")]
    Network { attempts: u32, message: String },
    #[error("{0}")]
    Unexpected(String),
}

impl RelayError {
    /// Text stored in the conversation as the assistant's answer.
    pub fn reply_text(&self) -> &'static str {
        match self {
            RelayError::MissingCredential => "🔑 API key required! Set it with !key <your key>",
            RelayError::Network { .. } => "Error: Connection issue - try again later",
            RelayError::Unexpected(_) => "Error: Please check your input and try again",
        }
    }
}
