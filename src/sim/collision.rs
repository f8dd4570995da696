//! Combat and collision resolution
//!
//! Runs after movement each tick: attack swings first, then contact between
//! the player's body and enemies/obstacles.

use glam::Vec2;

use super::rect::{Rect, intersects};
use super::state::{GameEvent, GamePhase, GameState, Player};

/// Apply the player's active swing to every enemy it touches.
///
/// Each enemy can be damaged at most once per swing; the `just_hit` guard is
/// cleared when the swing ends.
pub fn handle_attacks(state: &mut GameState) {
    if !state.player.is_attacking {
        return;
    }

    let hitbox = state.player.attack_box();

    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        if !enemy.is_alive() || enemy.just_hit {
            continue;
        }
        if intersects(&hitbox, &enemy.bounds()) {
            enemy.health -= 1;
            enemy.just_hit = true;
            log::debug!("Enemy hit! Health: {}", enemy.health);
            state.events.push(GameEvent::EnemyHit {
                index,
                health: enemy.health,
            });
        }
    }
}

/// Resolve the player's body against enemies and obstacles
pub fn handle_player_collisions(state: &mut GameState) {
    let knockback = state.tuning.knockback_speed;

    // Dead enemies still patrol and still hurt on contact
    for enemy in &state.enemies {
        if state.player.is_invincible || !intersects(&state.player.bounds(), &enemy.bounds()) {
            continue;
        }

        state.player.take_hit();
        log::debug!("Player hit by enemy! Current Health: {}", state.player.health);
        state.events.push(GameEvent::PlayerHurt {
            health: state.player.health,
        });

        state.player.vel.x = if state.player.pos.x < enemy.pos.x {
            -knockback
        } else {
            knockback
        };

        if state.player.is_dead() && state.phase != GamePhase::GameOver {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
            log::info!("Game over");
        }
    }

    for obstacle in &state.obstacles {
        // Non-solid obstacles are decoration only
        if !obstacle.solid {
            continue;
        }
        let bounds = obstacle.bounds();
        if !intersects(&state.player.bounds(), &bounds) {
            continue;
        }
        let was_airborne = state.player.is_jumping;
        if resolve_solid(&mut state.player, &bounds) && was_airborne {
            state.events.push(GameEvent::Landed);
        }
    }
}

/// Push the player out of a solid box along the axis of least overlap.
///
/// Returns true if the player ended up standing on top of the box.
pub fn resolve_solid(player: &mut Player, solid: &Rect) -> bool {
    let overlap: Vec2 = player.bounds().overlap(solid);

    if overlap.x < overlap.y {
        player.pos.x += if player.pos.x < solid.x {
            -overlap.x
        } else {
            overlap.x
        };
        return false;
    }

    player.pos.y += if player.pos.y < solid.y {
        -overlap.y
    } else {
        overlap.y
    };

    if player.pos.y < solid.y {
        player.vel.y = 0.0;
        player.is_jumping = false;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_LEVEL;
    use crate::sim::state::{Facing, ObstacleKind};

    /// Level with no obstacles and a single enemy standing at `enemy_x`
    fn arena(enemy_x: f32) -> GameState {
        let mut state = GameState::default();
        state.obstacles.clear();
        state.enemies.truncate(1);
        state.enemies[0].pos.x = enemy_x;
        state
    }

    #[test]
    fn test_attack_ignored_when_not_attacking() {
        let mut state = arena(130.0);
        handle_attacks(&mut state);
        assert_eq!(state.enemies[0].health, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_attack_hits_enemy_in_front() {
        // Player spans 50..110, hitbox 120..220 facing right
        let mut state = arena(150.0);
        state.player.start_attack();
        handle_attacks(&mut state);
        assert_eq!(state.enemies[0].health, 0);
        assert!(state.enemies[0].just_hit);
        assert_eq!(
            state.events,
            vec![GameEvent::EnemyHit { index: 0, health: 0 }]
        );
    }

    #[test]
    fn test_attack_misses_enemy_behind() {
        let mut state = arena(150.0);
        state.player.facing = Facing::Left;
        state.player.start_attack();
        handle_attacks(&mut state);
        assert_eq!(state.enemies[0].health, 1);
    }

    #[test]
    fn test_attack_hits_once_per_swing() {
        let mut state = arena(150.0);
        state.enemies[0].health = 3;
        state.player.start_attack();
        for _ in 0..10 {
            handle_attacks(&mut state);
        }
        assert_eq!(state.enemies[0].health, 2);
    }

    #[test]
    fn test_enemy_contact_damages_and_grants_invincibility() {
        let mut state = arena(80.0);
        handle_player_collisions(&mut state);
        assert_eq!(state.player.health, 9);
        assert!(state.player.is_invincible);
        // Player is left of the enemy, pushed left
        assert_eq!(state.player.vel.x, -5.0);

        // Still overlapping but invincible
        handle_player_collisions(&mut state);
        assert_eq!(state.player.health, 9);
    }

    #[test]
    fn test_knockback_away_from_enemy_on_the_left() {
        let mut state = arena(20.0);
        handle_player_collisions(&mut state);
        assert_eq!(state.player.vel.x, 5.0);
    }

    #[test]
    fn test_dead_enemy_still_hurts() {
        let mut state = arena(80.0);
        state.enemies[0].health = 0;
        handle_player_collisions(&mut state);
        assert_eq!(state.player.health, 9);
    }

    #[test]
    fn test_last_hit_ends_the_run() {
        let mut state = arena(80.0);
        state.player.health = 1;
        handle_player_collisions(&mut state);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_spike_has_no_effect() {
        let mut state = arena(700.0);
        state.obstacles.push(crate::sim::Obstacle::new(ObstacleKind::Spike, 60.0));
        let before = state.player.pos;
        handle_player_collisions(&mut state);
        assert_eq!(state.player.pos, before);
        assert_eq!(state.player.health, 10);
    }

    #[test]
    fn test_solid_pushes_out_sideways() {
        // Crate at 100..140; player 50..110 overlaps by 10 horizontally
        let mut state = arena(700.0);
        state.obstacles.push(crate::sim::Obstacle::new(ObstacleKind::Crate, 100.0));
        handle_player_collisions(&mut state);
        assert_eq!(state.player.pos.x, 40.0);
        assert_eq!(state.player.pos.y, GROUND_LEVEL - 80.0);
    }

    #[test]
    fn test_landing_on_top_of_solid() {
        let mut state = arena(700.0);
        let crate_box = crate::sim::Obstacle::new(ObstacleKind::Crate, 60.0);
        let top = crate_box.pos.y;
        state.obstacles.push(crate_box);

        // Falling onto the crate: 5px into its top
        state.player.pos = Vec2::new(50.0, top - 80.0 + 5.0);
        state.player.vel.y = 6.0;
        state.player.is_jumping = true;

        handle_player_collisions(&mut state);
        assert_eq!(state.player.pos.y, top - 80.0);
        assert!(state.player.pos.y < top);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(!state.player.is_jumping);
        assert_eq!(state.events, vec![GameEvent::Landed]);
    }

    #[test]
    fn test_resolve_from_below_keeps_velocity() {
        let mut player = Player::spawn(&crate::Tuning::default());
        let ceiling = Rect::new(0.0, 100.0, 200.0, 40.0);
        player.pos = Vec2::new(50.0, 135.0);
        player.vel.y = -8.0;
        player.is_jumping = true;

        assert!(!resolve_solid(&mut player, &ceiling));
        assert_eq!(player.pos.y, 140.0);
        assert_eq!(player.vel.y, -8.0);
        assert!(player.is_jumping);
    }
}
