#[cfg(test)]
mod tests {
    use crate::state::*;
    use relay_core::timer::TimerState;
    use relay_types::event::{ChannelKind, RelayEvent};
    use relay_types::message::{ChatMessage, Role};
    use relay_types::suggestion::Suggestion;

    fn msg(id: &str, role: Role, ts: i64) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            text: format!("text of {}", id),
            role,
            timestamp_ms: ts,
        }
    }

    fn pill(id: &str, text: &str, source: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            text: text.to_string(),
            source_message_id: source.to_string(),
            created_at_ms: 0,
        }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.role, None);
        assert!(state.messages.is_empty());
        assert!(state.suggestions.is_empty());
        assert_eq!(*state.timer.state(), TimerState::Idle);
        assert!(state.input_text.is_empty());
        assert_eq!(state.status_text, "Live");
        assert!(state.config_error.is_none());
        assert!(!state.composer_enabled());
    }

    #[test]
    fn test_composer_needs_role_and_config() {
        let mut state = UiState::new();
        assert!(!state.composer_enabled());

        state.role = Some(Role::Manager);
        assert!(state.composer_enabled());

        state.config_error = Some("store is not configured".to_string());
        assert!(!state.composer_enabled());
    }

    #[test]
    fn test_process_message_snapshot_feeds_timer() {
        let mut state = UiState::new();
        state.role = Some(Role::Worker);

        state.process_events(
            vec![RelayEvent::MessagesChanged {
                messages: vec![msg("m1", Role::Manager, 5)],
            }],
            1_000,
        );

        assert_eq!(state.messages.len(), 1);
        assert_eq!(
            *state.timer.state(),
            TimerState::Pending {
                message_id: "m1".to_string(),
                started_at_ms: 1_000,
            }
        );
    }

    #[test]
    fn test_process_worker_reply_stops_timer() {
        let mut state = UiState::new();
        state.role = Some(Role::Worker);

        state.process_events(
            vec![RelayEvent::MessagesChanged {
                messages: vec![msg("m1", Role::Manager, 5)],
            }],
            1_000,
        );
        state.process_events(
            vec![RelayEvent::MessagesChanged {
                messages: vec![msg("m1", Role::Manager, 5), msg("w1", Role::Worker, 6)],
            }],
            2_000,
        );

        assert_eq!(*state.timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_process_suggestion_snapshot_replaces_set() {
        let mut state = UiState::new();
        state.role = Some(Role::Worker);

        state.process_events(
            vec![RelayEvent::SuggestionsChanged {
                suggestions: vec![pill("s1", "Sure!", "m1"), pill("s2", "On it.", "m1")],
            }],
            0,
        );
        assert_eq!(state.suggestions.len(), 2);

        // Snapshots replace, never merge.
        state.process_events(
            vec![RelayEvent::SuggestionsChanged {
                suggestions: vec![pill("s3", "Done.", "m2")],
            }],
            0,
        );
        assert_eq!(state.suggestions.len(), 1);
        assert_eq!(state.suggestions[0].source_message_id, "m2");
    }

    #[test]
    fn test_subscription_error_updates_status_only() {
        let mut state = UiState::new();
        state.role = Some(Role::Worker);
        state.messages = vec![msg("m1", Role::Manager, 5)];

        state.process_events(
            vec![RelayEvent::SubscriptionError {
                channel: ChannelKind::Messages,
                message: "listen failed".to_string(),
            }],
            0,
        );

        // A dead listener degrades to stale data, never to a cleared chat.
        assert_eq!(state.messages.len(), 1);
        assert!(state.status_text.contains("messages channel offline"));
    }

    #[test]
    fn test_optimistic_clear() {
        let mut state = UiState::new();
        state.suggestions = vec![pill("s1", "Sure!", "m1")];
        state.clear_suggestions_optimistically();
        assert!(state.suggestions.is_empty());
        // Idempotent on an already-empty set.
        state.clear_suggestions_optimistically();
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_freehand_worker_send_clears_pills_locally() {
        let mut state = UiState::new();
        state.role = Some(Role::Worker);
        state.suggestions = vec![pill("s1", "Sure!", "m1"), pill("s2", "On it.", "m1")];
        state.input_text = "  typing my own reply  ".to_string();

        let text = state.take_composer_text();

        assert_eq!(text, "typing my own reply");
        assert!(state.input_text.is_empty());
        // Stale pills go away immediately, not at the next snapshot.
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_manager_composer_text_leaves_suggestions_alone() {
        let mut state = UiState::new();
        state.role = Some(Role::Manager);
        state.suggestions = vec![pill("s1", "Sure!", "m1")];
        state.input_text = "please do the thing".to_string();

        let text = state.take_composer_text();

        assert_eq!(text, "please do the thing");
        assert_eq!(state.suggestions.len(), 1);
    }

    #[test]
    fn test_worker_view_flag() {
        let mut state = UiState::new();
        assert!(!state.is_worker_view());
        state.role = Some(Role::Manager);
        assert!(!state.is_worker_view());
        state.role = Some(Role::Worker);
        assert!(state.is_worker_view());
    }
}
