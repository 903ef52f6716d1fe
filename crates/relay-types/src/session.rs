use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one conversation scope.
///
/// Carried as the `session` URL query parameter and used as the key under
/// which the store nests the session's message log and suggestion set. A
/// session owns exactly one of each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token received from the URL or another client.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mint a fresh collision-resistant token for a first visit.
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL query parameter carrying the session token.
pub const SESSION_PARAM: &str = "session";

/// URL query parameter that seeds the worker role on first visit.
pub const OPERATOR_PARAM: &str = "operator";

/// Prefix for the client-local role binding storage key.
pub const ROLE_KEY_PREFIX: &str = "relay:role:";

/// Storage key under which a session's role binding is persisted.
pub fn role_storage_key(token: &SessionToken) -> String {
    format!("{}{}", ROLE_KEY_PREFIX, token)
}
