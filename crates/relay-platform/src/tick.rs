//! Periodic tick used to refresh the pending-timer display.
//!
//! Wraps `gloo_timers::callback::Interval`, which clears the underlying
//! JS interval when dropped. The app holds a `TickTimer` only while the
//! response timer is Pending; dropping it on state change or view teardown
//! cancels the periodic work.

use gloo_timers::callback::Interval;

pub struct TickTimer {
    _interval: Interval,
}

impl TickTimer {
    /// Default cadence for the elapsed-time display.
    pub const ONE_SECOND_MS: u32 = 1_000;

    pub fn start(period_ms: u32, mut on_tick: impl FnMut() + 'static) -> Self {
        Self {
            _interval: Interval::new(period_ms, move || on_tick()),
        }
    }
}
