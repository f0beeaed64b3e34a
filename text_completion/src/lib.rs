//! An interface for handling chat completion requests
//!
//! This crate provides a `RequestHandler` trait that a completion provider
//! implements, the conversation model shared by the front-end and the providers,
//! and the `ChatRelay` that drives one chat turn (system prompt, retries,
//! typewriter display).

mod error;
pub use error::{CompletionError, RelayError};
mod models;
pub use models::{
    ApiKey, CompletionRequest, Conversation, Message, RequestConfig, Role, DEFAULT_TIMEOUT,
};
mod relay;
pub use relay::{ChatRelay, Turn};
mod system_prompt;
pub use system_prompt::SystemPrompt;
mod typewriter;
pub use typewriter::{tokens, typewriter, DEFAULT_CADENCE};

use tokio::sync::oneshot::Sender;

pub trait RequestHandler {
    //The front-end only knows this trait, never the provider crate.

    //The answer goes through the channel so an implementation is free to
    //run the request on its own task.
    fn answer_request(
        &self,
        request: CompletionRequest,
        result: Sender<Result<String, CompletionError>>,
    );
}
