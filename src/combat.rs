/// Player movement, firing, projectile flight and projectile-vs-alien hits.
///
/// These helpers mutate a working copy of the round; `compute::tick` is the
/// only caller and hands out the finished state.

use tracing::{debug, trace};

use crate::config::Rules;
use crate::entities::{Explosion, GameState};
use crate::input::Intents;

/// Apply the movement intents, clamped to the field.
pub fn move_player(state: &mut GameState, intents: &Intents, rules: &Rules) {
    let mut x = state.player.x;
    if intents.move_left {
        x -= rules.player_step;
    }
    if intents.move_right {
        x += rules.player_step;
    }
    state.player.x = x.clamp(0, rules.player_max_x());
}

/// Spawn a projectile in the first free slot, just above the player's
/// centre.  Returns `false` (and spawns nothing) when every slot is busy.
pub fn fire(state: &mut GameState, rules: &Rules) -> bool {
    let x = state.player.x + rules.player_width / 2;
    match state.projectiles.iter_mut().find(|p| !p.active) {
        Some(slot) => {
            slot.x = x;
            slot.y = rules.muzzle_y();
            slot.active = true;
            true
        }
        None => {
            trace!("fire intent dropped: no free projectile slot");
            false
        }
    }
}

/// Move every active projectile up.  One that leaves the top of the field
/// is retired with an explosion at the top edge.
pub fn advance_projectiles(state: &mut GameState, now: u64, rules: &Rules) {
    for p in state.projectiles.iter_mut().filter(|p| p.active) {
        p.y -= rules.projectile_step;
        if p.y < 0 {
            p.active = false;
            state.explosion = Explosion::at(p.x, 0, now);
        }
    }
}

/// Tally of one hit-test pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hits {
    pub kills: u32,
    pub points: u32,
}

/// Test every active projectile against every alive alien, both in storage
/// order.  A projectile destroys at most one alien.
pub fn resolve_hits(state: &mut GameState, now: u64, rules: &Rules) -> Hits {
    let mut hits = Hits::default();

    for p in state.projectiles.iter_mut().filter(|p| p.active) {
        let Some((index, alien)) = state
            .aliens
            .iter_mut()
            .enumerate()
            .find(|(_, a)| a.alive && a.contains(p.x, p.y, rules))
        else {
            continue;
        };

        alien.alive = false;
        p.active = false;
        state.explosion = Explosion::at(p.x, p.y, now);
        state.aliens_alive -= 1;

        let points = alien.kind.points();
        state.score += points;
        hits.kills += 1;
        hits.points += points;
        debug!(index, kind = ?alien.kind, points, "alien destroyed");
    }

    hits
}
