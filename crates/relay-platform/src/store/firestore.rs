//! Firestore REST store adapter.
//!
//! Documents live under `sessions/{token}/messages` and
//! `sessions/{token}/suggestions`. All writes go through the `:commit`
//! endpoint so the server assigns timestamps (REQUEST_TIME transform) and
//! the delete-all+insert suggestion replacement is one atomic batch.
//!
//! The REST surface has no push listen channel, so live subscriptions are
//! polling loops on a gloo-timers interval. Each poll delivers the full
//! ordered snapshot; unchanged snapshots are not re-delivered. A failed
//! poll reports the error once and stops the listener — no automatic
//! retry, the user reloads.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use serde::Deserialize;
use serde_json::{json, Value};
use wasm_bindgen_futures::spawn_local;

use relay_core::ports::{Snapshot, SnapshotHandler, StorePort, Subscription};
use relay_types::config::StoreConfig;
use relay_types::message::{ChatMessage, Role};
use relay_types::session::SessionToken;
use relay_types::suggestion::Suggestion;
use relay_types::{RelayError, Result};

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1";

#[derive(Clone)]
pub struct FirestoreStore {
    config: StoreConfig,
}

impl FirestoreStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Resource name root, e.g. `projects/p/databases/(default)/documents`.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.config.project_id
        )
    }

    fn collection_url(&self, token: &SessionToken, collection: &str) -> String {
        format!(
            "{}/{}/sessions/{}/{}?key={}&pageSize=300",
            FIRESTORE_HOST,
            self.documents_root(),
            token,
            collection,
            self.config.api_key
        )
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/{}:commit?key={}",
            FIRESTORE_HOST,
            self.documents_root(),
            self.config.api_key
        )
    }

    /// Document resource name for a to-be-created child document.
    fn doc_name(&self, token: &SessionToken, collection: &str, id: &str) -> String {
        format!(
            "{}/sessions/{}/{}/{}",
            self.documents_root(),
            token,
            collection,
            id
        )
    }

    async fn list(&self, url: &str) -> Result<ListResponse> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(RelayError::Store(format!(
                "list failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RelayError::Serialization(e.to_string()))
    }

    /// Exhaustive listing. `documents.list` pages in resource-name order,
    /// so a single page is an arbitrary subset once the collection outgrows
    /// the page size; every fetch follows `nextPageToken` to the end.
    async fn list_all(&self, base_url: &str) -> Result<Vec<FsDocument>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let url = match &page_token {
                Some(token) => format!("{}&pageToken={}", base_url, token),
                None => base_url.to_string(),
            };
            let mut listing = self.list(&url).await?;
            documents.append(&mut listing.documents);
            match listing.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => return Ok(documents),
            }
        }
    }

    /// One atomic batch. A batch with no writes is a no-op.
    async fn commit(&self, writes: Vec<Value>) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }

        let response = Request::post(&self.commit_url())
            .header("Content-Type", "application/json")
            .json(&json!({ "writes": writes }))
            .map_err(|e| RelayError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Store(format!(
                "commit failed: HTTP {}: {}",
                response.status(),
                body
            )));
        }

        Ok(())
    }

    async fn fetch_messages(&self, token: &SessionToken) -> Result<Vec<ChatMessage>> {
        let documents = self.list_all(&self.collection_url(token, "messages")).await?;
        let mut messages: Vec<ChatMessage> = documents.iter().filter_map(parse_message).collect();
        // Ascending by server timestamp; id breaks ties so two reads never
        // observe a different relative order.
        messages.sort_by(|a, b| {
            (a.timestamp_ms, a.id.as_str()).cmp(&(b.timestamp_ms, b.id.as_str()))
        });
        Ok(messages)
    }

    async fn fetch_suggestions(&self, token: &SessionToken) -> Result<Vec<Suggestion>> {
        let documents = self
            .list_all(&self.collection_url(token, "suggestions"))
            .await?;
        let mut suggestions: Vec<Suggestion> =
            documents.iter().filter_map(parse_suggestion).collect();
        suggestions.sort_by(|a, b| {
            (a.created_at_ms, a.id.as_str()).cmp(&(b.created_at_ms, b.id.as_str()))
        });
        Ok(suggestions)
    }

    /// Resource names of all current suggestion documents.
    async fn suggestion_doc_names(&self, token: &SessionToken) -> Result<Vec<String>> {
        let documents = self
            .list_all(&self.collection_url(token, "suggestions"))
            .await?;
        Ok(documents.into_iter().map(|d| d.name).collect())
    }
}

#[async_trait(?Send)]
impl StorePort for FirestoreStore {
    async fn append_message(
        &self,
        token: &SessionToken,
        role: Role,
        text: &str,
    ) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let write = json!({
            "update": {
                "name": self.doc_name(token, "messages", &id),
                "fields": {
                    "text": { "stringValue": text },
                    "role": { "stringValue": role.as_str() },
                }
            },
            "updateTransforms": [
                { "fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME" }
            ],
            "currentDocument": { "exists": false }
        });
        self.commit(vec![write]).await?;
        Ok(id)
    }

    fn subscribe_messages(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<ChatMessage>,
    ) -> Subscription {
        let store = self.clone();
        let token = token.clone();
        poll_subscription(self.config.poll_interval_ms, handler, move || {
            let store = store.clone();
            let token = token.clone();
            async move { store.fetch_messages(&token).await }
        })
    }

    fn subscribe_suggestions(
        &self,
        token: &SessionToken,
        handler: SnapshotHandler<Suggestion>,
    ) -> Subscription {
        let store = self.clone();
        let token = token.clone();
        poll_subscription(self.config.poll_interval_ms, handler, move || {
            let store = store.clone();
            let token = token.clone();
            async move { store.fetch_suggestions(&token).await }
        })
    }

    async fn replace_suggestions(
        &self,
        token: &SessionToken,
        texts: &[String],
        source_message_id: &str,
    ) -> Result<()> {
        let mut writes: Vec<Value> = self
            .suggestion_doc_names(token)
            .await?
            .into_iter()
            .map(|name| json!({ "delete": name }))
            .collect();

        for text in texts {
            let id = uuid::Uuid::new_v4().to_string();
            writes.push(json!({
                "update": {
                    "name": self.doc_name(token, "suggestions", &id),
                    "fields": {
                        "text": { "stringValue": text },
                        "sourceMessageId": { "stringValue": source_message_id },
                    }
                },
                "updateTransforms": [
                    { "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" }
                ],
                "currentDocument": { "exists": false }
            }));
        }

        self.commit(writes).await
    }

    async fn clear_suggestions(&self, token: &SessionToken) -> Result<()> {
        let writes: Vec<Value> = self
            .suggestion_doc_names(token)
            .await?
            .into_iter()
            .map(|name| json!({ "delete": name }))
            .collect();
        self.commit(writes).await
    }

    fn backend_name(&self) -> &str {
        "firestore"
    }
}

// ─── Polling subscription ────────────────────────────────────

/// Fetch-and-deliver loop behind a cancellable Subscription. Delivers the
/// first snapshot immediately, then one per interval when the data changed.
/// A fetch failure reports the error once and tears the interval down.
pub fn poll_subscription<T, F, Fut>(
    interval_ms: u32,
    handler: SnapshotHandler<T>,
    fetch: F,
) -> Subscription
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>>> + 'static,
{
    let handler: Rc<dyn Fn(Snapshot<T>)> = handler.into();
    let fetch = Rc::new(fetch);
    let active = Rc::new(Cell::new(true));
    let last: Rc<RefCell<Option<Vec<T>>>> = Rc::new(RefCell::new(None));
    let interval: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    let tick = {
        let handler = Rc::clone(&handler);
        let fetch = Rc::clone(&fetch);
        let active = Rc::clone(&active);
        let last = Rc::clone(&last);
        let interval = Rc::clone(&interval);
        move || {
            if !active.get() {
                return;
            }
            let handler = Rc::clone(&handler);
            let fetch = Rc::clone(&fetch);
            let active = Rc::clone(&active);
            let last = Rc::clone(&last);
            let interval = Rc::clone(&interval);
            spawn_local(async move {
                let outcome = fetch().await;
                if !active.get() {
                    // Unsubscribed while the request was in flight.
                    return;
                }
                match outcome {
                    Ok(items) => {
                        let changed = last.borrow().as_ref() != Some(&items);
                        if changed {
                            *last.borrow_mut() = Some(items.clone());
                            handler(Ok(items));
                        }
                    }
                    Err(e) => {
                        // Listener is dead from here on; user reloads.
                        // Dropping the interval stops the periodic ticks.
                        active.set(false);
                        interval.borrow_mut().take();
                        handler(Err(e));
                    }
                }
            });
        }
    };

    tick();
    *interval.borrow_mut() = Some(Interval::new(interval_ms, tick));

    Subscription::new(move || {
        active.set(false);
        interval.borrow_mut().take();
    })
}

// ─── Wire format ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FsDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct FsDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FsValue>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FsValue {
    string_value: Option<String>,
    timestamp_value: Option<String>,
}

impl FsDocument {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    fn string(&self, field: &str) -> Option<&str> {
        self.fields.get(field)?.string_value.as_deref()
    }

    fn timestamp_ms(&self, field: &str) -> Option<i64> {
        let raw = self.fields.get(field)?.timestamp_value.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.timestamp_millis())
    }
}

/// Malformed documents (concurrent writers, missing transform results) are
/// skipped rather than failing the whole snapshot.
fn parse_message(doc: &FsDocument) -> Option<ChatMessage> {
    let role = Role::parse(&doc.string("role")?.to_lowercase())?;
    Some(ChatMessage {
        id: doc.id().to_string(),
        text: doc.string("text")?.to_string(),
        role,
        timestamp_ms: doc.timestamp_ms("timestamp")?,
    })
}

fn parse_suggestion(doc: &FsDocument) -> Option<Suggestion> {
    Some(Suggestion {
        id: doc.id().to_string(),
        text: doc.string("text")?.to_string(),
        source_message_id: doc.string("sourceMessageId")?.to_string(),
        created_at_ms: doc.timestamp_ms("createdAt")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    fn doc(value: serde_json::Value) -> FsDocument {
        serde_json::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn parses_message_document() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/sessions/abc123/messages/m1",
            "fields": {
                "text": { "stringValue": "hello" },
                "role": { "stringValue": "Manager" },
                "timestamp": { "timestampValue": "1970-01-01T00:00:01.250Z" }
            }
        }));

        let msg = parse_message(&d).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.text, "hello");
        // Mixed-case role strings from other writers still parse.
        assert_eq!(msg.role, Role::Manager);
        assert_eq!(msg.timestamp_ms, 1_250);
    }

    #[wasm_bindgen_test]
    fn message_with_unknown_role_is_skipped() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/sessions/abc123/messages/m1",
            "fields": {
                "text": { "stringValue": "hello" },
                "role": { "stringValue": "admin" },
                "timestamp": { "timestampValue": "1970-01-01T00:00:01Z" }
            }
        }));
        assert!(parse_message(&d).is_none());
    }

    #[wasm_bindgen_test]
    fn message_without_timestamp_is_skipped() {
        // A concurrent writer's doc before its transform result lands.
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/sessions/abc123/messages/m1",
            "fields": {
                "text": { "stringValue": "hello" },
                "role": { "stringValue": "worker" }
            }
        }));
        assert!(parse_message(&d).is_none());
    }

    #[wasm_bindgen_test]
    fn timestamp_offset_normalizes_to_utc_millis() {
        let d = doc(json!({
            "name": "x/m1",
            "fields": {
                "timestamp": { "timestampValue": "1970-01-01T01:00:00+01:00" }
            }
        }));
        assert_eq!(d.timestamp_ms("timestamp"), Some(0));
    }

    #[wasm_bindgen_test]
    fn parses_suggestion_document_with_source_tag() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/sessions/abc123/suggestions/s9",
            "fields": {
                "text": { "stringValue": "On it." },
                "sourceMessageId": { "stringValue": "m7" },
                "createdAt": { "timestampValue": "1970-01-01T00:00:02Z" }
            }
        }));

        let suggestion = parse_suggestion(&d).unwrap();
        assert_eq!(suggestion.id, "s9");
        assert_eq!(suggestion.text, "On it.");
        assert_eq!(suggestion.source_message_id, "m7");
        assert_eq!(suggestion.created_at_ms, 2_000);
    }

    #[wasm_bindgen_test]
    fn document_id_is_resource_name_tail() {
        let d = doc(json!({ "name": "a/b/c/doc-id", "fields": {} }));
        assert_eq!(d.id(), "doc-id");
    }

    #[wasm_bindgen_test]
    fn list_response_carries_next_page_token() {
        let listing: ListResponse = serde_json::from_value(json!({
            "documents": [],
            "nextPageToken": "tok-1"
        }))
        .unwrap();
        assert_eq!(listing.next_page_token.as_deref(), Some("tok-1"));

        let last_page: ListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(last_page.next_page_token.is_none());
        assert!(last_page.documents.is_empty());
    }
}
