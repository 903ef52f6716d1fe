//! WASM-target tests for relay-core.
//!
//! Runs the timer state machine, subscription handle, and suggestion
//! parsing under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use relay_core::event_bus::EventBus;
use relay_core::ports::Subscription;
use relay_core::suggest::parse_suggestions;
use relay_core::timer::{ResponseTimer, TimerState};

use relay_types::event::RelayEvent;
use relay_types::message::{ChatMessage, Role};

use std::cell::RefCell;
use std::rc::Rc;

fn msg(id: &str, role: Role, ts: i64) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        text: format!("text of {}", id),
        role,
        timestamp_ms: ts,
    }
}

// ─── EventBus ────────────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(RelayEvent::SuggestionsChanged {
        suggestions: Vec::new(),
    });
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
    assert!(!bus.has_pending());
}

// ─── Subscription ────────────────────────────────────────

#[wasm_bindgen_test]
fn subscription_unsubscribe_is_idempotent() {
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let mut sub = Subscription::new(move || *counter.borrow_mut() += 1);

    sub.unsubscribe();
    sub.unsubscribe();
    drop(sub);

    assert_eq!(*count.borrow(), 1);
}

// ─── ResponseTimer ───────────────────────────────────────

#[wasm_bindgen_test]
fn timer_pending_then_idle_on_worker_reply() {
    let mut timer = ResponseTimer::new();

    timer.observe(&[msg("m1", Role::Manager, 5)], 1_000);
    assert!(timer.is_pending());

    timer.observe(
        &[msg("m1", Role::Manager, 5), msg("w1", Role::Worker, 6)],
        2_000,
    );
    assert_eq!(*timer.state(), TimerState::Idle);
}

#[wasm_bindgen_test]
fn timer_anchor_survives_repeat_snapshots() {
    let mut timer = ResponseTimer::new();
    let snapshot = vec![msg("m1", Role::Manager, 5)];
    timer.observe(&snapshot, 1_000);
    timer.observe(&snapshot, 6_000);
    assert_eq!(timer.elapsed_ms(6_000), Some(5_000));
}

// ─── parse_suggestions ───────────────────────────────────

#[wasm_bindgen_test]
fn parse_suggestions_fail_open() {
    assert!(parse_suggestions("garbage").is_empty());
    assert!(parse_suggestions(r#"{"not": "an array"}"#).is_empty());
    assert_eq!(
        parse_suggestions(r#"["a", 2, " b ", "", "c", "d"]"#),
        vec!["a", "b", "c"]
    );
}
