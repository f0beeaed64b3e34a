use futures::stream::{self, BoxStream, StreamExt};
use std::time::Duration;

pub const DEFAULT_CADENCE: Duration = Duration::from_millis(30);

/// Whitespace-delimited tokens, each followed by one space.
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|t| format!("{} ", t)).collect()
}

/// Releases an already complete text one token at a time.
///
/// Purely cosmetic: the text is in hand before the first fragment is yielded.
/// The stream owns its tokens and ends after the last one.
pub fn typewriter(text: &str, cadence: Duration) -> BoxStream<'static, String> {
    stream::iter(tokens(text))
        .then(move |fragment| async move {
            tokio::time::sleep(cadence).await;
            fragment
        })
        .boxed()
}
