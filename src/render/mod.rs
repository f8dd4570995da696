//! Rendering interface
//!
//! The simulation never draws. Each frame a host hands [`draw_frame`] a
//! read-only borrow of the [`GameState`] and something implementing
//! [`Surface`]; world coordinates map 1:1 to canvas pixels.

mod recording;

pub use recording::{DrawCmd, RecordingSurface};

use glam::Vec2;

use crate::assets::AssetRole;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Facing, GamePhase, GameState, Rect};

/// RGBA, each channel 0.0..=1.0
pub type Color = [f32; 4];

/// Colors for HUD and overlays
pub mod colors {
    use super::Color;

    pub const ATTACK_BOX: Color = [1.0, 0.0, 0.0, 0.3];
    pub const HEALTH_BACK: Color = [0.333, 0.333, 0.333, 1.0];
    pub const HEALTH_FILL: Color = [0.0, 1.0, 0.0, 1.0];
    pub const HEALTH_BORDER: Color = [0.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.7];
    pub const GAME_OVER_TEXT: Color = [1.0, 0.0, 0.0, 1.0];
    pub const HINT_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Health bar placement
pub const HEALTH_BAR: Rect = Rect::new(10.0, 10.0, 150.0, 20.0);

/// Drawing operations a host must provide
pub trait Surface {
    /// Erase the whole canvas
    fn clear(&mut self);

    /// Natural pixel size of a loaded sprite
    fn sprite_size(&self, role: AssetRole) -> Vec2;

    /// Draw a sprite (or the `src` cell of it) stretched into `dst`
    fn draw_sprite(&mut self, role: AssetRole, src: Option<Rect>, dst: Rect, flip_x: bool, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draw text horizontally centered on `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
}

/// Draw one complete frame of the current state
pub fn draw_frame(state: &GameState, settings: &Settings, surface: &mut impl Surface, time_ms: f64) {
    surface.clear();
    draw_scenery(state, surface);
    draw_actors(state, settings, surface, time_ms);

    if settings.show_attack_box && state.player.is_attacking {
        surface.fill_rect(state.player.attack_box(), colors::ATTACK_BOX);
    }

    if settings.show_health_bar {
        draw_health_bar(state, surface);
    }

    if state.phase == GamePhase::GameOver {
        draw_game_over(surface);
    }
}

fn draw_scenery(state: &GameState, surface: &mut impl Surface) {
    surface.draw_sprite(
        AssetRole::Background,
        None,
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        false,
        1.0,
    );

    // Tile the ground texture across the width
    let tile_w = match surface.sprite_size(AssetRole::Ground).x {
        w if w > 0.0 => w,
        _ => CANVAS_WIDTH,
    };
    let tiles = (CANVAS_WIDTH / tile_w).ceil() as u32;
    for i in 0..tiles {
        let dst = Rect::new(i as f32 * tile_w, GROUND_LEVEL, tile_w, CANVAS_HEIGHT - GROUND_LEVEL);
        surface.draw_sprite(AssetRole::Ground, None, dst, false, 1.0);
    }

    for obstacle in &state.obstacles {
        surface.draw_sprite(
            AssetRole::Obstacles,
            Some(obstacle.sheet_src),
            obstacle.bounds(),
            false,
            1.0,
        );
    }
}

fn draw_actors(state: &GameState, settings: &Settings, surface: &mut impl Surface, time_ms: f64) {
    let player = &state.player;
    let alpha = if player.is_invincible && settings.effective_flash() && flash_phase(time_ms, settings.flash_period_ms) {
        0.5
    } else {
        1.0
    };
    surface.draw_sprite(
        AssetRole::Player,
        None,
        player.bounds(),
        player.facing == Facing::Left,
        alpha,
    );

    for enemy in &state.enemies {
        surface.draw_sprite(AssetRole::Enemy, None, enemy.bounds(), enemy.direction < 0.0, 1.0);
    }
}

/// True during the dimmed half of the invincibility blink
fn flash_phase(time_ms: f64, period_ms: u32) -> bool {
    (time_ms / period_ms as f64).floor() as i64 % 2 == 0
}

fn draw_health_bar(state: &GameState, surface: &mut impl Surface) {
    let player = &state.player;
    let fraction = if player.max_health > 0 {
        (player.health as f32 / player.max_health as f32).max(0.0)
    } else {
        0.0
    };

    surface.fill_rect(HEALTH_BAR, colors::HEALTH_BACK);
    surface.fill_rect(
        Rect { w: HEALTH_BAR.w * fraction, ..HEALTH_BAR },
        colors::HEALTH_FILL,
    );
    surface.stroke_rect(HEALTH_BAR, colors::HEALTH_BORDER);
}

fn draw_game_over(surface: &mut impl Surface) {
    surface.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), colors::OVERLAY);

    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.draw_text("GAME OVER", center - Vec2::new(0.0, 40.0), 48.0, colors::GAME_OVER_TEXT);
    surface.draw_text("Press R to restart", center + Vec2::new(0.0, 40.0), 24.0, colors::HINT_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{self, Key};

    fn render(state: &GameState, settings: &Settings, time_ms: f64) -> Vec<DrawCmd> {
        let mut surface = RecordingSurface::new();
        draw_frame(state, settings, &mut surface, time_ms);
        surface.into_commands()
    }

    fn sprites(cmds: &[DrawCmd], role: AssetRole) -> Vec<&DrawCmd> {
        cmds.iter()
            .filter(|c| matches!(c, DrawCmd::Sprite { role: r, .. } if *r == role))
            .collect()
    }

    #[test]
    fn test_frame_order() {
        let state = GameState::default();
        let cmds = render(&state, &Settings::default(), 0.0);

        assert_eq!(cmds[0], DrawCmd::Clear);
        assert!(matches!(cmds[1], DrawCmd::Sprite { role: AssetRole::Background, .. }));
        assert_eq!(sprites(&cmds, AssetRole::Obstacles).len(), 4);
        assert_eq!(sprites(&cmds, AssetRole::Player).len(), 1);
        assert_eq!(sprites(&cmds, AssetRole::Enemy).len(), 2);
        // Health bar is last: back, fill, border
        assert!(matches!(cmds.last(), Some(DrawCmd::StrokeRect { .. })));
    }

    #[test]
    fn test_ground_tiles_cover_width() {
        let state = GameState::default();
        let mut surface = RecordingSurface::new().with_sprite_size(AssetRole::Ground, Vec2::new(128.0, 50.0));
        draw_frame(&state, &Settings::default(), &mut surface, 0.0);
        let tiles = sprites(surface.commands(), AssetRole::Ground);
        // ceil(800 / 128)
        assert_eq!(tiles.len(), 7);
        match tiles[6] {
            DrawCmd::Sprite { dst, .. } => {
                assert_eq!(dst.x, 768.0);
                assert_eq!(dst.y, GROUND_LEVEL);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_left_facing_player_is_flipped() {
        let mut state = GameState::default();
        sim::key_down(&mut state, Key::Left);
        sim::tick(&mut state);
        let cmds = render(&state, &Settings::default(), 0.0);
        assert!(matches!(
            sprites(&cmds, AssetRole::Player)[0],
            DrawCmd::Sprite { flip_x: true, .. }
        ));
    }

    #[test]
    fn test_attack_box_only_while_attacking() {
        let mut state = GameState::default();
        let is_attack_fill = |c: &DrawCmd| matches!(c, DrawCmd::FillRect { color, .. } if *color == colors::ATTACK_BOX);

        let cmds = render(&state, &Settings::default(), 0.0);
        assert!(!cmds.iter().any(is_attack_fill));

        sim::key_down(&mut state, Key::Attack);
        let cmds = render(&state, &Settings::default(), 0.0);
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::FillRect { rect, .. } if *rect == state.player.attack_box())));

        let settings = Settings { show_attack_box: false, ..Settings::default() };
        let cmds = render(&state, &settings, 0.0);
        assert!(!cmds.iter().any(is_attack_fill));
    }

    #[test]
    fn test_health_bar_fill_tracks_health() {
        let mut state = GameState::default();
        state.player.health = 4;
        let cmds = render(&state, &Settings::default(), 0.0);
        let fill = cmds.iter().find_map(|c| match c {
            DrawCmd::FillRect { rect, color } if *color == colors::HEALTH_FILL => Some(*rect),
            _ => None,
        });
        assert_eq!(fill.map(|r| r.w), Some(60.0));
    }

    #[test]
    fn test_invincible_player_blinks() {
        let mut state = GameState::default();
        state.player.is_invincible = true;
        state.player.invincibility_timer = 30;
        let alpha_at = |t: f64| match sprites(&render(&state, &Settings::default(), t), AssetRole::Player)[0] {
            DrawCmd::Sprite { alpha, .. } => *alpha,
            _ => unreachable!(),
        };
        assert_eq!(alpha_at(50.0), 0.5);
        assert_eq!(alpha_at(150.0), 1.0);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        let cmds = render(&state, &Settings::default(), 0.0);
        let texts: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["GAME OVER", "Press R to restart"]);
    }
}
