#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::event::*;
    use crate::message::*;
    use crate::session::*;
    use crate::suggestion::*;

    // ─── Role Tests ──────────────────────────────────────────

    #[test]
    fn test_role_wire_form_round_trip() {
        assert_eq!(Role::parse(Role::Manager.as_str()), Some(Role::Manager));
        assert_eq!(Role::parse(Role::Worker.as_str()), Some(Role::Worker));
    }

    #[test]
    fn test_role_parse_unknown() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Manager"), None); // wire form is lowercase
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!(serde_json::to_string(&Role::Worker).unwrap(), "\"worker\"");
        let r: Role = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(r, Role::Worker);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Manager.label(), "Manager");
        assert_eq!(Role::Worker.label(), "Digital Worker");
    }

    // ─── ChatMessage Tests ───────────────────────────────────

    #[test]
    fn test_message_is_mine_by_role_equality() {
        let msg = ChatMessage {
            id: "m1".to_string(),
            text: "hello".to_string(),
            role: Role::Manager,
            timestamp_ms: 1,
        };
        assert!(msg.is_mine(Role::Manager));
        assert!(!msg.is_mine(Role::Worker));
    }

    #[test]
    fn test_message_serde_round_trip() {
        let msg = ChatMessage {
            id: "m1".to_string(),
            text: "draft the email".to_string(),
            role: Role::Worker,
            timestamp_ms: 1234,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    // ─── SessionToken Tests ──────────────────────────────────

    #[test]
    fn test_session_token_mint_is_unique() {
        let a = SessionToken::mint();
        let b = SessionToken::mint();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_session_token_display() {
        let t = SessionToken::new("abc123");
        assert_eq!(t.to_string(), "abc123");
        assert_eq!(t.as_str(), "abc123");
    }

    #[test]
    fn test_role_storage_key_derives_from_token() {
        let t = SessionToken::new("abc123");
        assert_eq!(role_storage_key(&t), "relay:role:abc123");
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_store_config_is_placeholder() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackendType::Firestore);
        assert!(!config.is_configured());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let config = StoreConfig {
            backend: StoreBackendType::Memory,
            ..StoreConfig::default()
        };
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_firestore_backend_with_real_credentials() {
        let config = StoreConfig {
            backend: StoreBackendType::Firestore,
            project_id: "relay-prod".to_string(),
            api_key: "AIza-something".to_string(),
            poll_interval_ms: 2_000,
        };
        assert!(config.is_configured());
    }

    #[test]
    fn test_suggest_config_defaults() {
        let config = SuggestConfig::default();
        assert_eq!(config.base_url(), SuggestConfig::DEFAULT_API_BASE);
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.max_output_tokens, 120);
    }

    #[test]
    fn test_suggest_config_custom_base() {
        let config = SuggestConfig {
            api_base: Some("https://llm.internal".to_string()),
            ..SuggestConfig::default()
        };
        assert_eq!(config.base_url(), "https://llm.internal");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_channel_kind_labels() {
        assert_eq!(ChannelKind::Messages.label(), "messages");
        assert_eq!(ChannelKind::Suggestions.label(), "suggestions");
    }

    #[test]
    fn test_relay_event_serializes() {
        let event = RelayEvent::SuggestionsChanged {
            suggestions: vec![Suggestion {
                id: "s1".to_string(),
                text: "On it.".to_string(),
                source_message_id: "m1".to_string(),
                created_at_ms: 10,
            }],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SuggestionsChanged"));
    }

    #[test]
    fn test_max_suggestions_cap() {
        assert_eq!(MAX_SUGGESTIONS, 3);
    }
}
