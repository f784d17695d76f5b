/// The per-tick update.
///
/// `tick` takes an immutable reference to the current `GameState` and
/// returns a brand-new one together with a `TickReport`.  The round reset
/// on a win or a loss happens here, at the top of the update, and is
/// visible to the caller through `TickReport::outcome`.

use tracing::info;

use crate::clock;
use crate::combat;
use crate::config::Rules;
use crate::entities::{Explosion, GameState};
use crate::formation::{self, StepResult};
use crate::input::Intents;

/// How a tick ended the round, if it did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundOutcome {
    #[default]
    None,
    /// The last alive alien was destroyed.
    Win,
    /// An alien reached the floor band.
    Loss,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: RoundOutcome,
    /// Whether the fire intent spawned a projectile.
    pub fired: bool,
    pub kills: u32,
    pub points: u32,
    /// Score the round ended on, when `outcome` is not `None`.
    pub final_score: u32,
}

/// Advance the simulation by one tick at time `now`.
///
/// `intents.fire` is consumed by this call whether or not a projectile
/// slot was free; the caller clears it afterwards.
pub fn tick(
    state: &GameState,
    intents: &Intents,
    now: u64,
    rules: &Rules,
) -> (GameState, TickReport) {
    let mut next = *state;
    let mut report = TickReport::default();

    let outcome = step(&mut next, intents, now, rules, &mut report);
    if outcome == RoundOutcome::None {
        return (next, report);
    }

    report.outcome = outcome;
    report.final_score = next.score;
    info!(?outcome, score = next.score, "round over");
    (restart(&next, now, rules), report)
}

/// Start a fresh round, keeping the explosion that ended the old one on
/// screen.
pub fn restart(state: &GameState, now: u64, rules: &Rules) -> GameState {
    GameState {
        explosion: state.explosion,
        ..GameState::new(rules, now)
    }
}

fn step(
    state: &mut GameState,
    intents: &Intents,
    now: u64,
    rules: &Rules,
    report: &mut TickReport,
) -> RoundOutcome {
    // ── 1. Input ─────────────────────────────────────────────────────────────
    combat::move_player(state, intents, rules);
    if intents.fire {
        report.fired = combat::fire(state, rules);
    }

    // ── 2. Projectiles & hits ────────────────────────────────────────────────
    combat::advance_projectiles(state, now, rules);
    let hits = combat::resolve_hits(state, now, rules);
    report.kills = hits.kills;
    report.points = hits.points;
    if state.aliens_alive == 0 {
        return RoundOutcome::Win;
    }

    // ── 3. Formation ─────────────────────────────────────────────────────────
    if clock::take_move_slot(state, now, rules) {
        if let StepResult::Landed { x, y, .. } = formation::step(state, rules) {
            state.explosion = Explosion::at(x, y, now);
            return RoundOutcome::Loss;
        }
    }

    // ── 4. Timers ────────────────────────────────────────────────────────────
    clock::advance_animation(state, now, rules);
    clock::age_explosion(state, now, rules);

    RoundOutcome::None
}
