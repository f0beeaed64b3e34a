use futures::stream::{self, BoxStream, StreamExt};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::*;

use crate::{
    typewriter, CompletionError, CompletionRequest, Conversation, Message, RelayError,
    RequestConfig, RequestHandler, SystemPrompt,
};

/// Sends a conversation to a completion provider and turns the answer into one chat turn.
pub struct ChatRelay<H> {
    handler: H,
    system_prompt: SystemPrompt,
}

/// The result of one `ChatRelay::send`.
///
/// Holds the conversation (user message already appended) until the turn is
/// finished with `finish`, which appends the assistant answer.
#[derive(Debug)]
pub struct Turn {
    conversation: Conversation,
    outcome: Result<String, RelayError>,
}

impl<H: RequestHandler> ChatRelay<H> {
    pub fn new(handler: H) -> Self {
        ChatRelay {
            handler,
            system_prompt: SystemPrompt,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub async fn send(
        &self,
        mut conversation: Conversation,
        prompt: &str,
        config: &RequestConfig,
    ) -> Turn {
        conversation.push(Message::user(prompt));

        if config.api_key.is_empty() {
            error!("send refused, no API key configured");
            return Turn {
                conversation,
                outcome: Err(RelayError::MissingCredential),
            };
        }

        let today = chrono::Local::now().date_naive();
        let request = CompletionRequest {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout,
            messages: self.system_prompt.prepend(&conversation, today),
        };

        let outcome = self.attempt_all(request, config.attempts()).await;
        Turn {
            conversation,
            outcome,
        }
    }

    async fn attempt_all(
        &self,
        request: CompletionRequest,
        attempts: u32,
    ) -> Result<String, RelayError> {
        let mut last_error = String::new();

        //no backoff between attempts
        for attempt in 1..=attempts {
            trace!(
                "attempt {}/{} model={} temperature={} messages={}",
                attempt,
                attempts,
                request.model,
                request.temperature,
                request.messages.len()
            );

            let (tx, rx) = oneshot::channel();
            self.handler.answer_request(request.clone(), tx);

            match rx.await {
                Ok(Ok(text)) => {
                    debug!("attempt {}/{} succeeded", attempt, attempts);
                    return Ok(text);
                }
                Ok(Err(CompletionError::Network(message))) => {
                    if attempt < attempts {
                        warn!("Network Error: {} (attempt {}/{})", message, attempt, attempts);
                    } else {
                        error!("Network Error: {} (attempt {}/{})", message, attempt, attempts);
                    }
                    last_error = message;
                }
                Ok(Err(CompletionError::Unexpected(message))) => {
                    error!("Unexpected Error: {}", message);
                    return Err(RelayError::Unexpected(message));
                }
                Err(_) => {
                    let message = "completion handler dropped the request".to_string();
                    error!("Unexpected Error: {}", message);
                    return Err(RelayError::Unexpected(message));
                }
            }
        }

        Err(RelayError::Network {
            attempts,
            message: last_error,
        })
    }
}

impl Turn {
    pub fn outcome(&self) -> &Result<String, RelayError> {
        &self.outcome
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Fragments to display for this turn. A failed turn yields its reply text once.
    pub fn typewriter(&self, cadence: Duration) -> BoxStream<'static, String> {
        match &self.outcome {
            Ok(text) => typewriter(text, cadence),
            Err(e) => stream::once(futures::future::ready(e.reply_text().to_string())).boxed(),
        }
    }

    /// Appends the assistant answer and hands the conversation back.
    pub fn finish(self) -> Conversation {
        let mut conversation = self.conversation;
        match self.outcome {
            Ok(text) => conversation.push(Message::assistant(text)),
            Err(RelayError::MissingCredential) => {}
            Err(e) => conversation.push(Message::assistant(e.reply_text())),
        }
        conversation
    }
}
