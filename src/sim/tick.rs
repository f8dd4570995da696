//! Simulation tick and input commands
//!
//! One call to [`tick`] advances the world by one frame's worth of movement.
//! Key presses and restart are applied between ticks through [`apply`].

use super::collision::{handle_attacks, handle_player_collisions};
use super::input::Key;
use super::state::{Facing, GameEvent, GamePhase, GameState, Player};
use crate::consts::*;

/// External commands a host feeds into the simulation between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    KeyDown(Key),
    KeyUp(Key),
    Restart,
}

/// Apply one host command to the state.
///
/// `Command::Restart` resets the run in any phase (a host menu action);
/// the restart key only does so after game over.
pub fn apply(state: &mut GameState, command: Command) {
    match command {
        Command::KeyDown(key) => key_down(state, key),
        Command::KeyUp(key) => key_up(state, key),
        Command::Restart => restart(state),
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) {
    // Nothing moves once the run is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    update_player(state);
    for enemy in &mut state.enemies {
        enemy.patrol();
    }
    handle_attacks(state);
    handle_player_collisions(state);
}

/// Movement, floor/screen clamps and timers for the player
fn update_player(state: &mut GameState) {
    let input = &state.input;
    let player = &mut state.player;

    player.vel.x = 0.0;
    if input.is_held(Key::Left) {
        player.vel.x = -player.speed;
        player.facing = Facing::Left;
    }
    // Checked second so right wins when both are held
    if input.is_held(Key::Right) {
        player.vel.x = player.speed;
        player.facing = Facing::Right;
    }

    player.vel.y += player.gravity;
    player.pos += player.vel;

    let floor = GROUND_LEVEL - player.size.y;
    if player.pos.y > floor {
        player.pos.y = floor;
        player.vel.y = 0.0;
        if player.is_jumping {
            state.events.push(GameEvent::Landed);
        }
        player.is_jumping = false;
    }

    // Left edge wins if the player is wider than the canvas
    player.pos.x = player.pos.x.min(CANVAS_WIDTH - player.size.x).max(0.0);

    player.cooldown_timer = player.cooldown_timer.saturating_sub(1);

    if player.is_attacking {
        player.attack_timer = player.attack_timer.saturating_sub(1);
        if player.attack_timer == 0 {
            player.is_attacking = false;
            // Next swing may hit the survivors again
            for enemy in &mut state.enemies {
                enemy.just_hit = false;
            }
        }
    }

    if player.is_invincible {
        player.invincibility_timer = player.invincibility_timer.saturating_sub(1);
        if player.invincibility_timer == 0 {
            player.is_invincible = false;
        }
    }
}

/// Handle a key press.
///
/// While playing only gameplay keys are recognized; after game over only
/// restart is.
pub fn key_down(state: &mut GameState, key: Key) {
    match state.phase {
        GamePhase::GameOver => {
            if key == Key::Restart {
                restart(state);
            }
        }
        GamePhase::Playing => {
            if !key.is_gameplay() {
                return;
            }
            state.input.press(key);

            match key {
                Key::Jump => {
                    // Jump fires once per press, not while held
                    if state.player.jump() {
                        state.input.release(Key::Jump);
                    }
                }
                Key::Attack => {
                    state.player.start_attack();
                }
                _ => {}
            }
        }
    }
}

/// Handle a key release (in any phase)
pub fn key_up(state: &mut GameState, key: Key) {
    state.input.release(key);
}

/// Start a fresh run: respawn the player and enemies, keep the level
pub fn restart(state: &mut GameState) {
    state.player = Player::spawn(&state.tuning);
    state.respawn_enemies();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Restarted);
    log::info!("Game restarted");
}
