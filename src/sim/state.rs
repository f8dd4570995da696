//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context. Hosts own it and pass it by
//! reference into `tick` and the input handlers; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::{EnemyFixture, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health exhausted; waiting for restart
    GameOver,
}

/// Horizontal facing of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Something notable that happened since the host last drained events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Attack hitbox connected with the enemy at `index`
    EnemyHit { index: usize, health: i32 },
    /// Player took contact damage
    PlayerHurt { health: i32 },
    /// Player touched down on the ground or on top of a solid obstacle
    Landed,
    GameOver,
    Restarted,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub facing: Facing,
    pub is_jumping: bool,

    pub is_attacking: bool,
    /// Ticks left in the current swing (nonzero only while attacking)
    pub attack_timer: u32,
    pub attack_ticks: u32,
    /// Ticks until another swing may start
    pub cooldown_timer: u32,
    pub attack_cooldown: u32,
    pub attack_offset: Vec2,
    pub attack_size: Vec2,

    pub max_health: i32,
    pub health: i32,

    pub is_invincible: bool,
    /// Ticks of immunity left (nonzero only while invincible)
    pub invincibility_timer: u32,
    pub invincibility_ticks: u32,
}

impl Player {
    /// Fresh player standing on the ground at the spawn point
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_spawn_x, GROUND_LEVEL - tuning.player_size.y),
            vel: Vec2::ZERO,
            size: tuning.player_size,
            speed: tuning.player_speed,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            facing: Facing::Right,
            is_jumping: false,
            is_attacking: false,
            attack_timer: 0,
            attack_ticks: tuning.attack_ticks,
            cooldown_timer: 0,
            attack_cooldown: tuning.attack_cooldown_ticks,
            attack_offset: tuning.attack_offset,
            attack_size: tuning.attack_size,
            max_health: tuning.max_health,
            health: tuning.max_health,
            is_invincible: false,
            invincibility_timer: 0,
            invincibility_ticks: tuning.invincibility_ticks,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Absolute attack hitbox, placed outside whichever side the player faces
    pub fn attack_box(&self) -> Rect {
        let x = match self.facing {
            Facing::Right => self.pos.x + self.size.x + self.attack_offset.x,
            Facing::Left => self.pos.x - self.attack_size.x - self.attack_offset.x,
        };
        Rect::new(
            x,
            self.pos.y + self.attack_offset.y,
            self.attack_size.x,
            self.attack_size.y,
        )
    }

    /// Start a jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping {
            return false;
        }
        self.vel.y = self.jump_impulse;
        self.is_jumping = true;
        true
    }

    /// Start a swing if not mid-swing and off cooldown
    pub fn start_attack(&mut self) -> bool {
        if self.is_attacking || self.cooldown_timer > 0 {
            return false;
        }
        self.is_attacking = true;
        self.attack_timer = self.attack_ticks;
        self.cooldown_timer = self.attack_cooldown;
        true
    }

    /// Take one point of contact damage and become briefly invincible
    pub fn take_hit(&mut self) {
        self.health = (self.health - 1).max(0);
        self.is_invincible = true;
        self.invincibility_timer = self.invincibility_ticks;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub patrol_start: f32,
    pub patrol_end: f32,
    /// 1.0 moving right, -1.0 moving left
    pub direction: f32,
    /// Already damaged by the current swing
    pub just_hit: bool,
}

impl Enemy {
    pub fn spawn(fixture: &EnemyFixture, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(fixture.x, GROUND_LEVEL - tuning.enemy_size.y),
            size: tuning.enemy_size,
            speed: tuning.enemy_speed,
            health: tuning.enemy_health,
            patrol_start: fixture.patrol_start,
            patrol_end: fixture.patrol_end,
            direction: 1.0,
            just_hit: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Advance one tick of patrol, turning around at either end of the range
    pub fn patrol(&mut self) {
        self.pos.x += self.speed * self.direction;

        if self.direction > 0.0 && self.pos.x + self.size.x > self.patrol_end {
            self.direction = -1.0;
            self.pos.x = self.patrol_end - self.size.x;
        } else if self.direction < 0.0 && self.pos.x < self.patrol_start {
            self.direction = 1.0;
            self.pos.x = self.patrol_start;
        }

        // Enemies have no vertical motion; keep them on the ground
        self.pos.y = GROUND_LEVEL - self.size.y;
    }
}

/// Obstacle types, each a fixed cell of the obstacle sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Decorative, can be walked through
    Spike,
    Crate,
    Stone,
}

impl ObstacleKind {
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Spike => Vec2::new(30.0, 30.0),
            ObstacleKind::Crate | ObstacleKind::Stone => Vec2::new(40.0, 40.0),
        }
    }

    pub fn is_solid(&self) -> bool {
        !matches!(self, ObstacleKind::Spike)
    }

    /// Top-left of this kind's cell in the sprite sheet
    pub fn sheet_origin(&self) -> Vec2 {
        match self {
            ObstacleKind::Spike => Vec2::new(0.0, 0.0),
            ObstacleKind::Crate => Vec2::new(40.0, 0.0),
            ObstacleKind::Stone => Vec2::new(0.0, 40.0),
        }
    }
}

/// A static level obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub solid: bool,
    /// Source rectangle in the obstacle sprite sheet
    pub sheet_src: Rect,
}

impl Obstacle {
    /// Obstacle resting on the ground at `x`
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(x, GROUND_LEVEL - size.y),
            size,
            solid: kind.is_solid(),
            sheet_src: Rect::from_pos_size(kind.sheet_origin(), size),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Built once; never changes after construction
    pub obstacles: Vec<Obstacle>,
    pub input: InputState,
    /// Events queued by ticks and commands, kept until drained
    pub events: Vec<GameEvent>,
    /// Simulation ticks run since construction
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        let obstacles = tuning
            .obstacles
            .iter()
            .map(|o| Obstacle::new(o.kind, o.x))
            .collect();

        Self {
            phase: GamePhase::Playing,
            player: Player::spawn(&tuning),
            enemies: spawn_enemies(&tuning),
            obstacles,
            input: InputState::default(),
            events: Vec::new(),
            time_ticks: 0,
            tuning,
        }
    }

    /// Rebuild the enemy roster from the level fixtures
    pub fn respawn_enemies(&mut self) {
        self.enemies = spawn_enemies(&self.tuning);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

fn spawn_enemies(tuning: &Tuning) -> Vec<Enemy> {
    tuning
        .enemies
        .iter()
        .map(|fixture| Enemy::spawn(fixture, tuning))
        .collect()
}
