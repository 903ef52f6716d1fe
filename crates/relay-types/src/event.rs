use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;
use crate::suggestion::Suggestion;

/// Which live channel an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    Messages,
    Suggestions,
}

impl ChannelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Messages => "messages",
            ChannelKind::Suggestions => "suggestions",
        }
    }
}

/// Events emitted by the session controller.
/// UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RelayEvent {
    /// Full ordered message snapshot (never a delta).
    MessagesChanged { messages: Vec<ChatMessage> },

    /// Full ordered suggestion snapshot (never a delta).
    SuggestionsChanged { suggestions: Vec<Suggestion> },

    /// A live channel listener failed. No automatic retry.
    SubscriptionError { channel: ChannelKind, message: String },
}
