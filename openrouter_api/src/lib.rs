//! A `RequestHandler` backed by the OpenRouter chat completions API.
//!
//! Each request is a single POST; retries and the conversation itself are the
//! caller's business (see `text_completion::ChatRelay`).

mod models;
mod run_completion;
pub use run_completion::run_completion;

use text_completion::{CompletionError, CompletionRequest, RequestHandler};
use tokio::sync::oneshot::Sender;

pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_REFERER: &str = "https://energy-saver.streamlit.app";
pub const DEFAULT_TITLE: &str = "AI-Based Home Energy Saver";

//reqwest::Client is an Arc inside, so cloning the handler is cheap
#[derive(Clone, Debug)]
pub struct OpenRouterHandler {
    client: reqwest::Client,
    pub endpoint: String,
    pub referer: String,
    pub title: String,
}

impl OpenRouterHandler {
    pub fn new(endpoint: impl Into<String>) -> Self {
        OpenRouterHandler {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Default for OpenRouterHandler {
    fn default() -> Self {
        Self::new(OPENROUTER_ENDPOINT)
    }
}

impl RequestHandler for OpenRouterHandler {
    fn answer_request(
        &self,
        request: CompletionRequest,
        result: Sender<Result<String, CompletionError>>,
    ) {
        let handler = self.clone();
        tokio::spawn(async move {
            let r = run_completion(&handler, &request).await;
            let _ = result.send(r);
        });
    }
}
