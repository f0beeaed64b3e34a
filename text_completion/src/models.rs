use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const GREETING: &str =
    "Hello! 😊 I am your AI-Based Home Energy Saver. Ask me for tips on reducing electricity bills!";
const GREETING_CLEARED: &str = "Chat cleared! Ask me for energy-saving tips!";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The chat history of one session.
///
/// Always starts with exactly one assistant greeting. Messages are only ever
/// appended; clearing replaces the whole conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    /// A fresh conversation after the user asked to clear the chat.
    pub fn cleared() -> Self {
        Conversation {
            messages: vec![Message::assistant(GREETING_CLEARED)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Secret bearer token. Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Only meant for building the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub temperature: f32,
    pub max_retries: u32,
    pub timeout: Duration,
}

impl RequestConfig {
    /// Number of attempts a turn may make. Never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

/// One attempt, as handed to a `RequestHandler`.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub api_key: ApiKey,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub messages: Vec<Message>,
}
