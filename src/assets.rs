//! Sprite assets and load tracking
//!
//! The game must not start ticking until every sprite has loaded. Hosts call
//! [`LoadLatch::mark_loaded`] from their load callbacks and start the loop
//! the one time it reports completion.

use serde::{Deserialize, Serialize};

/// Role a loaded image plays in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRole {
    Background,
    /// Sprite sheet with one cell per obstacle kind
    Obstacles,
    Ground,
    Player,
    Enemy,
}

impl AssetRole {
    pub const ALL: [AssetRole; 5] = [
        AssetRole::Background,
        AssetRole::Obstacles,
        AssetRole::Ground,
        AssetRole::Player,
        AssetRole::Enemy,
    ];

    /// Image file served next to the page
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetRole::Background => "sky_background.png",
            AssetRole::Obstacles => "obstacles.png",
            AssetRole::Ground => "ground_texture.png",
            AssetRole::Player => "warrior.png",
            AssetRole::Enemy => "enemy.png",
        }
    }

    fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Countdown latch keyed by asset role
#[derive(Debug, Clone)]
pub struct LoadLatch {
    total: usize,
    loaded: u32,
}

impl Default for LoadLatch {
    fn default() -> Self {
        Self::new(AssetRole::ALL.len())
    }
}

impl LoadLatch {
    pub fn new(total: usize) -> Self {
        Self { total, loaded: 0 }
    }

    /// Record that `role` finished loading.
    ///
    /// Returns true exactly once: when the last outstanding asset arrives.
    /// Repeated signals for the same role are ignored.
    pub fn mark_loaded(&mut self, role: AssetRole) -> bool {
        if self.loaded & role.bit() != 0 {
            log::warn!("Duplicate load signal for {:?}", role);
            return false;
        }
        self.loaded |= role.bit();
        log::debug!("Loaded {} ({}/{})", role.file_name(), self.count(), self.total);

        if self.count() == self.total {
            log::info!("All images loaded, starting game...");
            return true;
        }
        false
    }

    pub fn count(&self) -> usize {
        self.loaded.count_ones() as usize
    }

    pub fn is_ready(&self) -> bool {
        self.count() >= self.total
    }
}
