//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `tick` per frame, constants expressed per tick
//! - All state owned by `GameState`, passed in explicitly
//! - Stable iteration order (roster order)

pub mod clock;
pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use clock::FixedClock;
pub use collision::{handle_attacks, handle_player_collisions, resolve_solid};
pub use input::{InputState, Key};
pub use rect::{Rect, intersects};
pub use state::{
    Enemy, Facing, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player,
};
pub use tick::{Command, apply, key_down, key_up, restart, tick};
