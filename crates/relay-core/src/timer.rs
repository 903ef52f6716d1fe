//! Response-pending timer — a client-local state machine tracking
//! "the manager is waiting on the operator".
//!
//! Recomputed from every message snapshot; shown only in the worker view.
//! The elapsed anchor is the local wall clock at the recomputation that
//! entered Pending, not the message's own server timestamp. That makes the
//! display reset on reload and differ between simultaneous viewers; the
//! behavior is intentional and must not be re-anchored silently.

use relay_types::message::{ChatMessage, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Pending {
        /// Id of the unanswered manager message being tracked.
        message_id: String,
        /// Local wall clock (ms) when this pending id was first observed.
        started_at_ms: i64,
    },
}

pub struct ResponseTimer {
    state: TimerState,
}

impl ResponseTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TimerState::Pending { .. })
    }

    /// Recompute from a full ordered message snapshot.
    ///
    /// Idle when there is no manager message, or when a worker message's
    /// timestamp is strictly greater than the latest manager message's.
    /// Otherwise Pending; the anchor only moves when the tracked message
    /// id changes.
    pub fn observe(&mut self, messages: &[ChatMessage], now_ms: i64) {
        let latest_manager = latest_with_role(messages, Role::Manager);
        let latest_worker = latest_with_role(messages, Role::Worker);

        let Some(manager) = latest_manager else {
            self.state = TimerState::Idle;
            return;
        };

        if let Some(worker) = latest_worker {
            if worker.timestamp_ms > manager.timestamp_ms {
                self.state = TimerState::Idle;
                return;
            }
        }

        match &self.state {
            TimerState::Pending { message_id, .. } if message_id == &manager.id => {
                // Same unanswered message: keep the anchor.
            }
            _ => {
                self.state = TimerState::Pending {
                    message_id: manager.id.clone(),
                    started_at_ms: now_ms,
                };
            }
        }
    }

    /// Elapsed wall-clock time since the anchor, or None when Idle.
    pub fn elapsed_ms(&self, now_ms: i64) -> Option<i64> {
        match &self.state {
            TimerState::Idle => None,
            TimerState::Pending { started_at_ms, .. } => Some((now_ms - started_at_ms).max(0)),
        }
    }

    /// Forced back to Idle on teardown.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}

impl Default for ResponseTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Greatest-timestamp message with the given role. Ties resolve to the
/// later entry in snapshot order, which is stable across deliveries.
fn latest_with_role(messages: &[ChatMessage], role: Role) -> Option<&ChatMessage> {
    let mut best: Option<&ChatMessage> = None;
    for msg in messages.iter().filter(|m| m.role == role) {
        match best {
            Some(current) if msg.timestamp_ms < current.timestamp_ms => {}
            _ => best = Some(msg),
        }
    }
    best
}
