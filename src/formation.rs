/// Alien formation movement.
///
/// The grid either translates sideways or, when any alive alien is at the
/// edge of the field, drops one step and reverses for the next interval.

use crate::config::Rules;
use crate::entities::{Direction, GameState};

/// Result of one formation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Advanced,
    Descended,
    /// An alien reached the floor band.  `(x, y)` is where it touched down.
    Landed { index: usize, x: i32, y: i32 },
}

/// True if any alive alien is within the edge margin in the current
/// direction of travel.
pub fn edge_hit(state: &GameState, rules: &Rules) -> bool {
    let right_limit = rules.screen_width - rules.edge_margin;
    state.alive_aliens().any(|a| match state.formation.direction {
        Direction::Right => a.x + rules.alien_width >= right_limit,
        Direction::Left => a.x <= rules.edge_margin,
    })
}

/// Move every alive alien once, in storage order.
///
/// The first alien whose lower edge reaches the floor ends the step
/// immediately: aliens after it are left where they were and the direction
/// is not flipped.
pub fn step(state: &mut GameState, rules: &Rules) -> StepResult {
    let descend = edge_hit(state, rules);
    let dx = state.formation.direction.sign() * rules.alien_step;
    let floor = rules.floor_y();

    for (index, alien) in state.aliens.iter_mut().enumerate() {
        if !alien.alive {
            continue;
        }
        if descend {
            alien.y += rules.alien_descent;
        } else {
            alien.x += dx;
        }
        if alien.y + rules.alien_height >= floor {
            return StepResult::Landed {
                index,
                x: alien.x + rules.alien_width / 2,
                y: floor,
            };
        }
    }

    if descend {
        state.formation.direction = state.formation.direction.flipped();
        StepResult::Descended
    } else {
        StepResult::Advanced
    }
}
