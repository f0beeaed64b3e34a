pub const EMOJI_PAGE: &str = "💡";
pub const EMOJI_SETTINGS: &str = "⚙️";
pub const EMOJI_USER: &str = "🙂";
pub const EMOJI_ASSISTANT: &str = "🤖";
pub const EMOJI_KEY: &str = "🔑";
pub const EMOJI_NETWORK: &str = "🌐";
pub const EMOJI_UNEXPECTED: &str = "❌";
pub const EMOJI_CLEAR: &str = "🧹";

//Shown at the end of a reply while it is being typed
pub const CURSOR: &str = "▌";
