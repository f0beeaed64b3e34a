use chrono::NaiveDate;

use crate::{Conversation, Message};

const RULES: &str = "You are an expert in home energy conservation. Follow these STRICT rules:
1. RESPOND ONLY IN PLAIN TEXT
2. NEVER USE JSON, MARKDOWN, OR CODE BLOCKS
3. Format lists with hyphens (-) only
4. Provide practical energy-saving tips
5. Structure responses clearly with line breaks
6. If unsure about information, say \"I need to verify that\"
7. Maintain a friendly and informative tone
";

/// The operating instructions sent ahead of every conversation.
#[derive(Clone, Debug, Default)]
pub struct SystemPrompt;

impl SystemPrompt {
    pub fn render(&self, date: NaiveDate) -> String {
        format!("{}8. Current date: {}\n", RULES, date.format("%B %d, %Y"))
    }

    /// The message sequence as it goes over the wire: system prompt first.
    pub fn prepend(&self, conversation: &Conversation, date: NaiveDate) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::system(self.render(date)));
        messages.extend_from_slice(conversation.messages());
        messages
    }
}
