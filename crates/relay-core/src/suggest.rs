//! Suggestion generation protocol: call the drafting service, parse its
//! output fail-open, and replace the session's suggestion set wholesale.

use std::rc::Rc;

use relay_types::message::Role;
use relay_types::session::SessionToken;
use relay_types::suggestion::MAX_SUGGESTIONS;

use crate::ports::{StorePort, SuggestionServicePort};

/// Fixed instruction sent with every drafting request.
pub const DRAFT_INSTRUCTION: &str = "You draft short friendly quick replies for a \
digital worker controlled by a human. Suggest 2 or 3 options. If clarification \
is needed, suggest a follow-up question. Keep each reply under 15 words. \
Return a JSON array of strings only.";

/// Parse the model's raw output into candidate reply strings.
///
/// Fail-open: anything that is not a JSON array yields an empty list.
/// Non-string and empty-after-trim entries are dropped; the result is
/// capped at [`MAX_SUGGESTIONS`].
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    let parsed: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to parse suggestions JSON: {}", e);
            return Vec::new();
        }
    };

    let Some(items) = parsed.as_array() else {
        log::warn!("Suggestion output is not a JSON array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Runs the generate → parse → replace protocol for one manager message.
///
/// Invoked with at-least-once semantics whenever a manager message is
/// appended. Each run replaces the whole suggestion set atomically, so the
/// visible set is always one run's output; there is deliberately no guard
/// against concurrent duplicate runs (which run wins is unspecified).
pub struct SuggestionGenerator {
    service: Rc<dyn SuggestionServicePort>,
    store: Rc<dyn StorePort>,
}

impl SuggestionGenerator {
    pub fn new(service: Rc<dyn SuggestionServicePort>, store: Rc<dyn StorePort>) -> Self {
        Self { service, store }
    }

    /// Draft replies for `manager_text` and replace the session's
    /// suggestion set, tagged with `source_message_id`.
    ///
    /// Generation failures degrade to an empty set (which still clears any
    /// stale suggestions from an earlier message); only the final store
    /// write surfaces as an error to the caller's log.
    pub async fn run(&self, token: &SessionToken, source_message_id: &str, manager_text: &str) {
        let text = manager_text.trim();
        if text.is_empty() {
            return;
        }

        let drafts = match self.service.draft_replies(text).await {
            Ok(raw) => parse_suggestions(&raw),
            Err(e) => {
                log::error!("Suggestion service call failed: {}", e);
                Vec::new()
            }
        };

        match self
            .store
            .replace_suggestions(token, &drafts, source_message_id)
            .await
        {
            Ok(()) => log::info!(
                "Suggestions updated: session={} count={}",
                token,
                drafts.len()
            ),
            Err(e) => log::error!("Failed to write suggestions: {}", e),
        }
    }

    /// Whether a just-appended message should trigger generation.
    pub fn triggers(role: Role) -> bool {
        role == Role::Manager
    }
}
