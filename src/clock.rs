/// Millisecond time sources and the timers paced against them.
///
/// Each timer is a plain "more than `period` since the last firing" check.
/// There is no catch-up: after a stall a timer fires once, and its reference
/// point jumps to `now`.

use std::cell::Cell;
use std::time::Instant;

use crate::config::Rules;
use crate::entities::GameState;

pub trait TimeSource {
    /// Milliseconds since an arbitrary fixed origin.  Never decreases.
    fn now_ms(&self) -> u64;
}

/// Wall-clock source backed by `Instant`, starting at zero.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        // never step backwards
        self.now.set(self.now.get().max(ms));
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── Timers ───────────────────────────────────────────────────────────────────

/// True once strictly more than `period` ms have passed since `since`.
pub fn elapsed_past(since: u64, now: u64, period: u64) -> bool {
    now.saturating_sub(since) > period
}

/// Whether the formation is due for its next step.  Stamps the move time
/// when it is.
pub fn take_move_slot(state: &mut GameState, now: u64, rules: &Rules) -> bool {
    if elapsed_past(state.formation.last_move_ms, now, rules.alien_move_interval_ms) {
        state.formation.last_move_ms = now;
        true
    } else {
        false
    }
}

/// Flip the alien sprite frame on its own interval.
pub fn advance_animation(state: &mut GameState, now: u64, rules: &Rules) {
    let f = &mut state.formation;
    if elapsed_past(f.last_frame_ms, now, rules.animation_interval_ms) {
        f.last_frame_ms = now;
        f.animation_frame = 1 - f.animation_frame;
    }
}

/// Retire the explosion once its lifetime is over.
pub fn age_explosion(state: &mut GameState, now: u64, rules: &Rules) {
    let e = &mut state.explosion;
    if e.active && elapsed_past(e.started_at, now, rules.explosion_duration_ms) {
        e.active = false;
    }
}
