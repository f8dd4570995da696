//! Brawler entry point
//!
//! Browser builds run the game on a Canvas 2D surface. Native builds run a
//! scripted headless session and print a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use brawler::assets::{AssetRole, LoadLatch};
    use brawler::consts::*;
    use brawler::render::{self, Color, Surface};
    use brawler::sim::{self, Command, FixedClock, GameState, Key, Rect};
    use brawler::{Settings, Tuning};

    fn css(color: Color) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3]
        )
    }

    /// Canvas 2D implementation of the drawing interface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: Vec<(AssetRole, HtmlImageElement)>,
    }

    impl CanvasSurface {
        fn image(&self, role: AssetRole) -> Option<&HtmlImageElement> {
            self.images.iter().find(|(r, _)| *r == role).map(|(_, img)| img)
        }
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self) {
            self.ctx
                .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
        }

        fn sprite_size(&self, role: AssetRole) -> Vec2 {
            self.image(role)
                .map(|img| Vec2::new(img.natural_width() as f32, img.natural_height() as f32))
                .unwrap_or(Vec2::ZERO)
        }

        fn draw_sprite(&mut self, role: AssetRole, src: Option<Rect>, dst: Rect, flip_x: bool, alpha: f32) {
            let Some(img) = self.image(role) else {
                return;
            };

            self.ctx.save();
            self.ctx.set_global_alpha(alpha as f64);
            // Mirror around x = 0 and draw at the negated right edge
            let dx = if flip_x {
                let _ = self.ctx.scale(-1.0, 1.0);
                -(dst.x + dst.w)
            } else {
                dst.x
            };

            let result = match src {
                Some(s) => self
                    .ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        img,
                        s.x as f64,
                        s.y as f64,
                        s.w as f64,
                        s.h as f64,
                        dx as f64,
                        dst.y as f64,
                        dst.w as f64,
                        dst.h as f64,
                    ),
                None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    dx as f64,
                    dst.y as f64,
                    dst.w as f64,
                    dst.h as f64,
                ),
            };
            if let Err(e) = result {
                log::warn!("drawImage failed for {:?}: {:?}", role, e);
            }
            self.ctx.restore();
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ctx.set_fill_style_str(&css(color));
            self.ctx
                .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        }

        fn stroke_rect(&mut self, rect: Rect, color: Color) {
            self.ctx.set_stroke_style_str(&css(color));
            self.ctx
                .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        }

        fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
            self.ctx.set_font(&format!("{}px Arial", size));
            self.ctx.set_text_align("center");
            self.ctx.set_fill_style_str(&css(color));
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        surface: CanvasSurface,
        latch: LoadLatch,
        clock: FixedClock,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks for this frame, then draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            for _ in 0..self.clock.advance(dt) {
                sim::tick(&mut self.state);
                for event in self.state.drain_events() {
                    log::debug!("{:?}", event);
                }
            }

            render::draw_frame(&self.state, &self.settings, &mut self.surface, time);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Brawler starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let mut images = Vec::with_capacity(AssetRole::ALL.len());
        for role in AssetRole::ALL {
            images.push((role, HtmlImageElement::new()?));
        }

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(Tuning::default()),
            settings: Settings::default(),
            surface: CanvasSurface {
                ctx,
                images: images.clone(),
            },
            latch: LoadLatch::default(),
            clock: FixedClock::new(),
            last_time: 0.0,
        }));

        // The loop starts once every image has loaded
        for (role, img) in images {
            let onload = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let ready = game.borrow_mut().latch.mark_loaded(role);
                    if ready {
                        request_animation_frame(game.clone());
                    }
                })
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::error!("Failed to load {}; game cannot start", role.file_name());
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            img.set_src(role.file_name());
        }

        setup_keyboard(&window, game)?;
        Ok(())
    }

    fn key_of(event: &KeyboardEvent) -> Option<Key> {
        Key::from_code(&event.code()).or_else(|| Key::from_code(&event.key()))
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_of(&event) {
                    event.prevent_default();
                    sim::apply(&mut game.borrow_mut().state, Command::KeyDown(key));
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = key_of(&event) {
                sim::apply(&mut game.borrow_mut().state, Command::KeyUp(key));
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brawler (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => brawler::Tuning::load_or_default(path),
        None => brawler::Tuning::default(),
    };

    let report = demo::run(tuning);
    println!("\nHeadless session finished:");
    println!("  ticks run:      {}", report.ticks);
    println!("  enemy hits:     {}", report.enemy_hits);
    println!("  damage taken:   {}", report.damage_taken);
    println!("  game over:      {}", report.game_over);
    println!("  frames drawn:   {}", report.frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless session: walks right, jumps and swings until the run ends
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use brawler::Settings;
    use brawler::Tuning;
    use brawler::render::{self, RecordingSurface};
    use brawler::sim::{self, Command, GameEvent, GamePhase, GameState, Key};

    const MAX_TICKS: u64 = 3000;

    /// (tick, command) pairs fed in before that tick runs
    const SCRIPT: &[(u64, Command)] = &[
        (0, Command::KeyDown(Key::Right)),
        (18, Command::KeyDown(Key::Jump)),
        (40, Command::KeyDown(Key::Attack)),
        (41, Command::KeyUp(Key::Attack)),
        (60, Command::KeyDown(Key::Jump)),
        (90, Command::KeyDown(Key::Attack)),
        (91, Command::KeyUp(Key::Attack)),
        (120, Command::KeyUp(Key::Right)),
    ];

    #[derive(Debug, Default)]
    pub struct Report {
        pub ticks: u64,
        pub enemy_hits: u32,
        pub damage_taken: u32,
        pub game_over: bool,
        pub frames: u64,
    }

    pub fn run(tuning: Tuning) -> Report {
        let mut state = GameState::new(tuning);
        let settings = Settings::default();
        let mut surface = RecordingSurface::new();
        let mut report = Report::default();

        while report.ticks < MAX_TICKS {
            for (_, command) in SCRIPT.iter().filter(|(t, _)| *t == report.ticks) {
                sim::apply(&mut state, *command);
            }

            sim::tick(&mut state);
            report.ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyHit { index, health } => {
                        report.enemy_hits += 1;
                        log::info!("Enemy {} hit (health {})", index, health);
                    }
                    GameEvent::PlayerHurt { health } => {
                        report.damage_taken += 1;
                        log::info!("Player hurt (health {})", health);
                    }
                    other => log::debug!("{:?}", other),
                }
            }

            render::draw_frame(&state, &settings, &mut surface, report.ticks as f64 * 1000.0 / 60.0);
            report.frames += 1;

            if state.phase == GamePhase::GameOver {
                report.game_over = true;
                break;
            }
        }

        if report.game_over {
            sim::apply(&mut state, Command::KeyDown(Key::Restart));
            log::info!(
                "Restarted: health {}/{}, {} enemies",
                state.player.health,
                state.player.max_health,
                state.enemies.len()
            );
        }
        report
    }
}
