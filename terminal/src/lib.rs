//! The chat surface of the home energy saver.
//!
//! A line-based session: plain lines go to the assistant through a
//! `ChatRelay`, lines starting with `!` are commands (settings, history,
//! clearing the chat). Input and output are any tokio reader/writer so the
//! session runs the same on a terminal and in tests.

mod commands;
mod emoji;
mod render;
mod settings;
pub use commands::{parse, Command, HELP_TEXT};
pub use settings::{Model, Settings, SettingsError};

use std::io;
use std::time::Duration;
use text_completion::{ChatRelay, Conversation, RequestHandler, DEFAULT_CADENCE};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tracing::*;

use crate::emoji::*;

pub const PREFIX: &str = "!";

pub struct ChatSession<H> {
    relay: ChatRelay<H>,
    settings: Settings,
    conversation: Conversation,
    cadence: Duration,
}

impl<H: RequestHandler> ChatSession<H> {
    pub fn new(handler: H, settings: Settings) -> Self {
        ChatSession {
            relay: ChatRelay::new(handler),
            settings,
            conversation: Conversation::new(),
            cadence: DEFAULT_CADENCE,
        }
    }

    /// Delay between typed fragments. Zero disables the effect.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn relay(&self) -> &ChatRelay<H> {
        &self.relay
    }

    /// Runs one parsed line. Returns false once the user wants to leave.
    pub async fn handle<W: AsyncWrite + Unpin>(
        &mut self,
        command: Command<'_>,
        out: &mut W,
    ) -> io::Result<bool> {
        match command {
            Command::Help => render::notice(out, HELP_TEXT).await?,
            Command::Key(raw) => {
                self.settings.set_api_key(raw);
                let text = if self.settings.api_key.is_empty() {
                    format!("{} API key removed.", EMOJI_KEY)
                } else {
                    format!("{} API key set.", EMOJI_KEY)
                };
                render::notice(out, &text).await?;
            }
            Command::Model(None) => {
                let mut text = String::from("Choose AI Model:");
                for (i, model) in Model::ALL.iter().enumerate() {
                    let mark = if *model == self.settings.model { "*" } else { " " };
                    text.push_str(&format!("\n{} {}. {}", mark, i + 1, model));
                }
                render::notice(out, &text).await?;
            }
            Command::Model(Some(raw)) => {
                let text = match self.settings.set_model(raw) {
                    Ok(model) => format!("Model: {}", model),
                    Err(e) => e.to_string(),
                };
                render::notice(out, &text).await?;
            }
            Command::Temperature(raw) => {
                let text = match self.settings.set_temperature(raw) {
                    Ok(t) => format!("Response creativity: {}", t),
                    Err(e) => e.to_string(),
                };
                render::notice(out, &text).await?;
            }
            Command::Retries(raw) => {
                let text = match self.settings.set_max_retries(raw) {
                    Ok(n) => format!("Max retries: {}", n),
                    Err(e) => e.to_string(),
                };
                render::notice(out, &text).await?;
            }
            Command::Settings => {
                let text = format!("{} Settings\n{}", EMOJI_SETTINGS, self.settings);
                render::notice(out, &text).await?;
            }
            Command::History => render::history(out, &self.conversation).await?,
            Command::Clear => {
                info!("chat cleared");
                self.conversation = Conversation::cleared();
                render::notice(out, &format!("{} Chat cleared.", EMOJI_CLEAR)).await?;
                render::history(out, &self.conversation).await?;
            }
            Command::Quit => return Ok(false),
            Command::Unknown(name) => {
                let text = format!("Unknown command {}{}, try {}help", PREFIX, name, PREFIX);
                render::notice(out, &text).await?;
            }
            Command::Prompt(prompt) => self.ask(prompt, out).await?,
        }
        Ok(true)
    }

    async fn ask<W: AsyncWrite + Unpin>(&mut self, prompt: &str, out: &mut W) -> io::Result<()> {
        let config = self.settings.request_config();
        let conversation = std::mem::take(&mut self.conversation);

        let turn = self.relay.send(conversation, prompt, &config).await;
        match turn.outcome() {
            Ok(_) => render::typewrite(out, turn.typewriter(self.cadence)).await?,
            Err(e) => render::error(out, e).await?,
        }
        self.conversation = turn.finish();
        Ok(())
    }
}

/// Reads lines until `!quit` or end of input.
pub async fn run<H, R, W>(session: &mut ChatSession<H>, input: R, out: &mut W) -> io::Result<()>
where
    H: RequestHandler,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    render::banner(out).await?;
    render::history(out, session.conversation()).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse(&line) else {
            continue;
        };
        if !session.handle(command, out).await? {
            break;
        }
    }

    debug!("session ended, {} messages", session.conversation().len());
    render::notice(out, "Bye! Keep saving energy.").await
}
