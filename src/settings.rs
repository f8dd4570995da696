//! Presentation preferences
//!
//! These only change what gets drawn, never the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Display settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Overlays ===
    /// Draw the attack hitbox while a swing is active
    pub show_attack_box: bool,
    /// Draw the health bar in the top-left corner
    pub show_health_bar: bool,

    // === Effects ===
    /// Blink the player sprite while invincible
    pub invincibility_flash: bool,
    /// Blink half-period in milliseconds
    pub flash_period_ms: u32,

    // === Accessibility ===
    /// Reduced motion (no blinking)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_attack_box: true,
            show_health_bar: true,
            invincibility_flash: true,
            flash_period_ms: 100,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective invincibility blink (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.invincibility_flash && !self.reduced_motion && self.flash_period_ms > 0
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_flash() {
        let mut settings = Settings::default();
        assert!(settings.effective_flash());
        settings.reduced_motion = true;
        assert!(!settings.effective_flash());
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "show_attack_box": false }"#).unwrap();
        assert!(!settings.show_attack_box);
        assert!(settings.show_health_bar);
        assert_eq!(settings.flash_period_ms, 100);
    }
}
