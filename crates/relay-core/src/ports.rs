//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `relay-core` (pure Rust).
//! Implementations live in `relay-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use relay_types::{
    message::{ChatMessage, Role},
    session::SessionToken,
    suggestion::Suggestion,
    RelayError, Result,
};

// ─── Live subscriptions ──────────────────────────────────────

/// Payload of one live delivery: a full ordered snapshot, or the listener's
/// failure. Consumers never receive deltas and never merge partial state.
pub type Snapshot<T> = std::result::Result<Vec<T>, RelayError>;

/// Handler invoked once per snapshot delivery.
pub type SnapshotHandler<T> = Box<dyn Fn(Snapshot<T>)>;

/// Disposable handle for a live channel subscription.
///
/// `unsubscribe` is idempotent; dropping the handle also cancels. Callers
/// must cancel before establishing a replacement subscription on role
/// change, so no channel ever has two active listeners.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

// ─── Store Port ──────────────────────────────────────────────

/// The real-time document store: hierarchical per-session collections for
/// messages and suggestions, server-assigned monotonic write timestamps,
/// full-snapshot push subscriptions, and atomic batch replacement.
#[async_trait(?Send)]
pub trait StorePort {
    /// Append a message and return its store-assigned id.
    /// `text` must already be trimmed and non-empty; the empty-input no-op
    /// lives in [`crate::controller::MessageSender`].
    async fn append_message(
        &self,
        token: &SessionToken,
        role: Role,
        text: &str,
    ) -> Result<String>;

    /// Subscribe to the session's message log. The handler receives the
    /// full ordered snapshot immediately and again on every change.
    fn subscribe_messages(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<ChatMessage>,
    ) -> Subscription;

    /// Subscribe to the session's suggestion set, ordered by creation time.
    fn subscribe_suggestions(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<Suggestion>,
    ) -> Subscription;

    /// Delete the whole current suggestion set and insert `texts` in one
    /// atomic batch, tagged with the triggering manager message.
    async fn replace_suggestions(
        &self,
        token: &SessionToken,
        texts: &[String],
        source_message_id: &str,
    ) -> Result<()>;

    /// Delete all suggestions for the session. Idempotent on an empty set.
    async fn clear_suggestions(&self, token: &SessionToken) -> Result<()>;

    /// Name of this backend (for logging/debug).
    fn backend_name(&self) -> &str;
}

// ─── Role Store Port ─────────────────────────────────────────

/// Client-local persistent (token → role) binding. At most one role per
/// session per browser profile; not shared across devices.
///
/// Synchronous: the browser adapter sits on localStorage, and adapters
/// degrade to in-memory state when persistence is unavailable.
pub trait RoleStorePort {
    fn role(&self, token: &SessionToken) -> Option<Role>;
    fn set_role(&self, token: &SessionToken, role: Role);
    fn clear_role(&self, token: &SessionToken);
}

// ─── Suggestion Service Port ─────────────────────────────────

/// The AI drafting service. Returns the model's raw text output, which is
/// expected (but not guaranteed) to contain a JSON array of short strings.
#[async_trait(?Send)]
pub trait SuggestionServicePort {
    async fn draft_replies(&self, manager_text: &str) -> Result<String>;
}
