use serde::{Deserialize, Serialize};

/// Which side of the relay authored a message.
///
/// The distinction is purely a client convention: both roles write to the
/// same log with no server-side enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The participant who believes they are addressing an automated agent.
    Manager,
    /// The human covertly replying as the "digital worker".
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Worker => "worker",
        }
    }

    /// Parse the lowercase wire form. Unknown strings map to None.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "manager" => Some(Role::Manager),
            "worker" => Some(Role::Worker),
            _ => None,
        }
    }

    /// Display label used in message bubbles.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Worker => "Digital Worker",
        }
    }
}

/// A single immutable entry in a session's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Store-assigned document id.
    pub id: String,
    /// Non-empty after trim; validated at append time.
    pub text: String,
    pub role: Role,
    /// Store-assigned write time, milliseconds since epoch. Monotonic
    /// within a session; snapshots are sorted ascending by this field.
    pub timestamp_ms: i64,
}

impl ChatMessage {
    /// A message is "mine" iff its role matches the locally bound role.
    /// All grouping in the rendering layer derives from this alone.
    pub fn is_mine(&self, local_role: Role) -> bool {
        self.role == local_role
    }
}
