//! Data-driven game balance
//!
//! Every gameplay constant is expressed per simulation tick. Defaults match the
//! shipped level; a JSON document can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::sim::ObstacleKind;

/// Spawn data for one patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyFixture {
    pub x: f32,
    pub patrol_start: f32,
    pub patrol_end: f32,
}

/// Placement of one static obstacle (sits on the ground)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFixture {
    pub kind: ObstacleKind,
    pub x: f32,
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: Vec2,
    pub player_spawn_x: f32,
    /// Horizontal speed while a direction key is held (px/tick)
    pub player_speed: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    pub max_health: i32,
    /// Ticks of contact-damage immunity after being hit
    pub invincibility_ticks: u32,
    /// Horizontal velocity applied away from an enemy on contact
    pub knockback_speed: f32,

    // === Attack ===
    /// Gap between the player's leading edge and the hitbox
    pub attack_offset: Vec2,
    pub attack_size: Vec2,
    pub attack_ticks: u32,
    pub attack_cooldown_ticks: u32,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub enemies: Vec<EnemyFixture>,

    // === Level ===
    pub obstacles: Vec<ObstacleFixture>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: Vec2::new(60.0, 80.0),
            player_spawn_x: 50.0,
            player_speed: 5.0,
            gravity: 0.5,
            jump_impulse: -12.0,
            max_health: 10,
            invincibility_ticks: 60,
            knockback_speed: 5.0,

            attack_offset: Vec2::new(10.0, 10.0),
            attack_size: Vec2::new(100.0, 50.0),
            attack_ticks: 15,
            attack_cooldown_ticks: 30,

            enemy_size: Vec2::new(50.0, 60.0),
            enemy_speed: 1.0,
            enemy_health: 1,
            enemies: vec![
                EnemyFixture { x: 300.0, patrol_start: 250.0, patrol_end: 450.0 },
                EnemyFixture { x: 600.0, patrol_start: 550.0, patrol_end: 750.0 },
            ],

            obstacles: vec![
                ObstacleFixture { kind: ObstacleKind::Spike, x: 200.0 },
                ObstacleFixture { kind: ObstacleKind::Crate, x: 400.0 },
                ObstacleFixture { kind: ObstacleKind::Stone, x: 700.0 },
                ObstacleFixture { kind: ObstacleKind::Spike, x: 500.0 },
            ],
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 7.5, "max_health": 3 }"#).unwrap();
        assert_eq!(tuning.player_speed, 7.5);
        assert_eq!(tuning.max_health, 3);
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.enemies.len(), 2);
    }

    #[test]
    fn test_fixture_override() {
        let json = r#"{
            "enemies": [{ "x": 100.0, "patrol_start": 80.0, "patrol_end": 300.0 }],
            "obstacles": [{ "kind": "Crate", "x": 250.0 }]
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.enemies.len(), 1);
        assert_eq!(tuning.obstacles[0].kind, ObstacleKind::Crate);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(Tuning::load_or_default("/definitely/not/here.json"), Tuning::default());
    }
}
