//! Fixed-timestep invaders simulation for a 128×64 monochrome screen.
//!
//! `compute::tick` is the whole game: it takes the current `GameState`, the
//! player's `Intents` and a millisecond timestamp and returns the next
//! state.  Everything else in the crate feeds it or draws it.

pub mod clock;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod formation;
pub mod input;
pub mod sprites;
