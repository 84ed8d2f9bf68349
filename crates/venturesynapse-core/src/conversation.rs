// ABOUTME: Append-only conversation history shared by the three pipeline stages.
// ABOUTME: Holds user turns written by the sequencer and assistant turns returned by agents.

use chrono::{DateTime, TimeDelta, Utc};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// The role string used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    /// "user" for sequencer turns, the agent name for assistant turns.
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            author: author.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of every message exchanged during one pipeline run.
/// Messages can only be appended.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(Role::User, Role::User.as_str(), content));
    }

    pub fn add_agent_message(&mut self, agent: &str, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(Role::Assistant, agent, content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Time between the newest agent reply and the message before it.
    /// `None` unless the conversation ends with an agent reply to some turn.
    pub fn last_reply_latency(&self) -> Option<TimeDelta> {
        match self.messages.as_slice() {
            [.., prompt, reply] if reply.role == Role::Assistant => {
                Some(reply.timestamp - prompt.timestamp)
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
