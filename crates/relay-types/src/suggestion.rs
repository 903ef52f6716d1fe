use serde::{Deserialize, Serialize};

/// Hard cap on the suggestion set size, matching the generator instruction.
pub const MAX_SUGGESTIONS: usize = 3;

/// An ephemeral AI-drafted candidate reply, shown only to the worker.
///
/// The set for a session is always either empty or wholly derived from
/// exactly one manager message; it is replaced wholesale, never appended to
/// across generator runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Store-assigned document id.
    pub id: String,
    /// Non-empty trimmed candidate reply.
    pub text: String,
    /// Id of the manager message that triggered this set.
    pub source_message_id: String,
    /// Store-assigned creation time, milliseconds since epoch.
    pub created_at_ms: i64,
}
