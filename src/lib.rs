//! Brawler - A single-screen side-scrolling action game
//!
//! Core modules:
//! - `sim`: Simulation (player controller, patrol AI, combat, game state)
//! - `render`: Drawing interface the simulation exposes its state through
//! - `assets`: Sprite roles and the load-complete latch
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod assets;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Errors raised while loading tuning or settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration constants
pub mod consts {
    /// Simulation rate the per-tick constants are tuned against
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions (world-to-screen mapping is identity)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Height of the ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Y coordinate of the ground surface
    pub const GROUND_LEVEL: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;
}
