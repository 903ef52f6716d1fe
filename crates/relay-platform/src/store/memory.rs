//! In-memory store backend.
//!
//! Authoritative reference for the store semantics: strictly monotonic
//! write timestamps per page, full ordered snapshots delivered on
//! subscribe and after every mutation, and wholesale atomic suggestion
//! replacement. Local to one page load — both roles only see each other
//! here when driven from the same page (demos, tests).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use relay_core::ports::{SnapshotHandler, StorePort, Subscription};
use relay_types::message::{ChatMessage, Role};
use relay_types::session::SessionToken;
use relay_types::suggestion::Suggestion;
use relay_types::Result;

pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, SessionData>,
    next_sub: u64,
    last_ts: i64,
}

#[derive(Default)]
struct SessionData {
    messages: Vec<ChatMessage>,
    suggestions: Vec<Suggestion>,
    message_subs: HashMap<u64, SnapshotHandler<ChatMessage>>,
    suggestion_subs: HashMap<u64, SnapshotHandler<Suggestion>>,
}

impl Inner {
    fn session(&mut self, token: &SessionToken) -> &mut SessionData {
        self.sessions.entry(token.as_str().to_string()).or_default()
    }

    /// Server-side write time: wall clock, bumped to stay strictly
    /// increasing so snapshot order never flips between reads.
    fn next_timestamp(&mut self) -> i64 {
        let now = js_sys::Date::now() as i64;
        self.last_ts = now.max(self.last_ts + 1);
        self.last_ts
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Deliver the current message snapshot to every listener.
    /// Handlers only enqueue events, so holding the borrow is fine.
    fn notify_messages(&self, token: &SessionToken) {
        let mut inner = self.inner.borrow_mut();
        let session = inner.session(token);
        let snapshot = session.messages.clone();
        for handler in session.message_subs.values() {
            handler(Ok(snapshot.clone()));
        }
    }

    fn notify_suggestions(&self, token: &SessionToken) {
        let mut inner = self.inner.borrow_mut();
        let session = inner.session(token);
        let snapshot = session.suggestions.clone();
        for handler in session.suggestion_subs.values() {
            handler(Ok(snapshot.clone()));
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl StorePort for MemoryStore {
    async fn append_message(
        &self,
        token: &SessionToken,
        role: Role,
        text: &str,
    ) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        {
            let mut inner = self.inner.borrow_mut();
            let timestamp_ms = inner.next_timestamp();
            inner.session(token).messages.push(ChatMessage {
                id: id.clone(),
                text: text.to_string(),
                role,
                timestamp_ms,
            });
        }
        self.notify_messages(token);
        Ok(id)
    }

    fn subscribe_messages(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<ChatMessage>,
    ) -> Subscription {
        let key = {
            let mut inner = self.inner.borrow_mut();
            inner.next_sub += 1;
            let key = inner.next_sub;
            let session = inner.session(token);
            // Initial full snapshot, like the live store's first push.
            handler(Ok(session.messages.clone()));
            session.message_subs.insert(key, handler);
            key
        };

        let inner = Rc::clone(&self.inner);
        let session_key = token.as_str().to_string();
        Subscription::new(move || {
            if let Some(session) = inner.borrow_mut().sessions.get_mut(&session_key) {
                session.message_subs.remove(&key);
            }
        })
    }

    fn subscribe_suggestions(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<Suggestion>,
    ) -> Subscription {
        let key = {
            let mut inner = self.inner.borrow_mut();
            inner.next_sub += 1;
            let key = inner.next_sub;
            let session = inner.session(token);
            handler(Ok(session.suggestions.clone()));
            session.suggestion_subs.insert(key, handler);
            key
        };

        let inner = Rc::clone(&self.inner);
        let session_key = token.as_str().to_string();
        Subscription::new(move || {
            if let Some(session) = inner.borrow_mut().sessions.get_mut(&session_key) {
                session.suggestion_subs.remove(&key);
            }
        })
    }

    async fn replace_suggestions(
        &self,
        token: &SessionToken,
        texts: &[String],
        source_message_id: &str,
    ) -> Result<()> {
        {
            let mut inner = self.inner.borrow_mut();
            let mut fresh = Vec::with_capacity(texts.len());
            for text in texts {
                let created_at_ms = inner.next_timestamp();
                fresh.push(Suggestion {
                    id: uuid::Uuid::new_v4().to_string(),
                    text: text.clone(),
                    source_message_id: source_message_id.to_string(),
                    created_at_ms,
                });
            }
            // Single swap: listeners never observe a partially replaced set.
            inner.session(token).suggestions = fresh;
        }
        self.notify_suggestions(token);
        Ok(())
    }

    async fn clear_suggestions(&self, token: &SessionToken) -> Result<()> {
        self.inner.borrow_mut().session(token).suggestions.clear();
        self.notify_suggestions(token);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
