//! UI-level state that drives rendering.
//! This is a read-only projection of the session channels, updated each
//! frame by draining the EventBus, plus the client-local response timer.

use relay_core::timer::ResponseTimer;
use relay_types::event::RelayEvent;
use relay_types::message::{ChatMessage, Role};
use relay_types::suggestion::Suggestion;

/// State visible to UI panels.
pub struct UiState {
    /// Locally bound role; None until the picker has run.
    pub role: Option<Role>,
    /// Latest full message snapshot, ascending by timestamp.
    pub messages: Vec<ChatMessage>,
    /// Latest suggestion snapshot; rendered only in the worker view.
    pub suggestions: Vec<Suggestion>,
    /// "Manager is waiting" state machine, fed by message snapshots.
    pub timer: ResponseTimer,
    /// Composer field content.
    pub input_text: String,
    /// Status line text.
    pub status_text: String,
    /// Set when the store config is a placeholder; disables the composer
    /// permanently and shows a static banner.
    pub config_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            role: None,
            messages: Vec::new(),
            suggestions: Vec::new(),
            timer: ResponseTimer::new(),
            input_text: String::new(),
            status_text: "Live".to_string(),
            config_error: None,
        }
    }

    /// Apply drained events. `now_ms` anchors any Pending transition the
    /// new message snapshot causes.
    pub fn process_events(&mut self, events: Vec<RelayEvent>, now_ms: i64) {
        for event in events {
            match event {
                RelayEvent::MessagesChanged { messages } => {
                    self.timer.observe(&messages, now_ms);
                    self.messages = messages;
                }
                RelayEvent::SuggestionsChanged { suggestions } => {
                    self.suggestions = suggestions;
                }
                RelayEvent::SubscriptionError { channel, message } => {
                    self.status_text =
                        format!("{} channel offline — reload to retry", channel.label());
                    log::error!("{} listener down: {}", channel.label(), message);
                }
            }
        }
    }

    /// The composer is writable only with a bound role and a working config.
    pub fn composer_enabled(&self) -> bool {
        self.config_error.is_none() && self.role.is_some()
    }

    /// Worker-only surfaces: pills and the pending line.
    pub fn is_worker_view(&self) -> bool {
        self.role == Some(Role::Worker)
    }

    /// Local clear before the delete-all request is even sent; the store's
    /// own empty snapshot confirms it later.
    pub fn clear_suggestions_optimistically(&mut self) {
        self.suggestions.clear();
    }

    /// Take the composer text for sending: trim, clear the field, and for
    /// the worker also drop the local pill view ahead of the store
    /// round-trip. Freehand sends and pill clicks leave no stale pills.
    pub fn take_composer_text(&mut self) -> String {
        let text = self.input_text.trim().to_string();
        self.input_text.clear();
        if self.is_worker_view() {
            self.clear_suggestions_optimistically();
        }
        text
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
