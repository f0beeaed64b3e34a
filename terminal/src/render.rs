use futures::{Stream, StreamExt};
use std::io;
use text_completion::{Conversation, Message, RelayError, Role};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::emoji::*;

const TITLE: &str = "AI-Based Home Energy Saver";
const CAPTION: &str = "Smart recommendations to help you cut down your electricity bills";
const INPUT_HINT: &str = "Ask me about saving energy... (!help for commands)";

const BACKSPACE: &str = "\x08";

fn speaker(role: Role) -> String {
    match role {
        Role::User => format!("{} you> ", EMOJI_USER),
        Role::Assistant => format!("{} assistant> ", EMOJI_ASSISTANT),
        Role::System => "system> ".to_string(),
    }
}

pub async fn banner<W: AsyncWrite + Unpin>(out: &mut W) -> io::Result<()> {
    let text = format!(
        "{} {}\n{}\n{}\n\n",
        EMOJI_PAGE, TITLE, CAPTION, INPUT_HINT
    );
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

pub async fn message<W: AsyncWrite + Unpin>(out: &mut W, message: &Message) -> io::Result<()> {
    let text = format!("{}{}\n", speaker(message.role), message.content);
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

pub async fn history<W: AsyncWrite + Unpin>(
    out: &mut W,
    conversation: &Conversation,
) -> io::Result<()> {
    for m in conversation.messages() {
        message(out, m).await?;
    }
    Ok(())
}

/// Shows fragments as they come, with a cursor after the text typed so far.
pub async fn typewrite<W, S>(out: &mut W, mut fragments: S) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    S: Stream<Item = String> + Unpin,
{
    out.write_all(speaker(Role::Assistant).as_bytes()).await?;
    let mut cursor_shown = false;
    while let Some(fragment) = fragments.next().await {
        if cursor_shown {
            out.write_all(BACKSPACE.as_bytes()).await?;
        }
        out.write_all(fragment.as_bytes()).await?;
        out.write_all(CURSOR.as_bytes()).await?;
        out.flush().await?;
        cursor_shown = true;
    }
    if cursor_shown {
        out.write_all(format!("{} {}", BACKSPACE, BACKSPACE).as_bytes())
            .await?;
    }
    out.write_all(b"\n").await?;
    out.flush().await
}

pub async fn error<W: AsyncWrite + Unpin>(out: &mut W, err: &RelayError) -> io::Result<()> {
    let text = match err {
        RelayError::MissingCredential => format!("{} {}\n", EMOJI_KEY, err),
        RelayError::Network { .. } => format!("{} Network Error: {}\n", EMOJI_NETWORK, err),
        RelayError::Unexpected(_) => format!("{} Unexpected error: {}\n", EMOJI_UNEXPECTED, err),
    };
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

pub async fn notice<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
