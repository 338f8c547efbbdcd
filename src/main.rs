//! Hop Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent, TouchEvent};

    use hop_dash::assets::{AssetManifest, SpriteSet, launch};
    use hop_dash::audio::AudioManager;
    use hop_dash::input::{InputSource, JumpLatch};
    use hop_dash::platform::web::{ImageLoader, time_seed, window_viewport};
    use hop_dash::renderer::{CanvasSurface, draw_frame};
    use hop_dash::sim::Viewport;
    use hop_dash::tuning::TuningError;
    use hop_dash::{FrameOutcome, Game, Settings};

    /// Game instance holding all state
    struct App {
        game: Game,
        sprites: SpriteSet<HtmlImageElement>,
        surface: CanvasSurface,
        audio: AudioManager,
        jump: JumpLatch,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// One frame: step, sound, draw. Returns the step outcome.
        fn frame(&mut self) -> FrameOutcome {
            self.audio.ensure_music();
            let (outcome, events) = self.game.frame(&mut self.jump);
            self.audio.handle_events(&events);
            draw_frame(self.game.state(), &self.sprites, &mut self.surface);
            outcome
        }

        fn resize(&mut self, viewport: Viewport) {
            size_canvas(&self.canvas, viewport);
            self.game.resize(viewport);
        }

        /// Start a new run after game over; input from the old run is dropped
        fn restart(&mut self) {
            self.audio.stop_music();
            self.jump.take_jump();
            self.game.restart(time_seed());
        }
    }

    fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hop Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let viewport = window_viewport().unwrap_or(Viewport::new(800.0, 600.0));
        size_canvas(&canvas, viewport);

        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            alert("Your browser does not support the 2D canvas.");
            return;
        };

        let settings = Settings::load();
        let manifest = AssetManifest::default();
        let audio = AudioManager::new(&manifest, &settings);
        let jump = JumpLatch::new();

        // Listeners go in before loading so early presses aren't lost
        setup_input_handlers(&canvas, jump.clone());

        let started = launch(&ImageLoader, &manifest, |sprites| -> Result<_, TuningError> {
            let seed = time_seed();
            let game = Game::new(seed, settings.tuning(), viewport, sprites.obstacles.len())?;
            Ok(Rc::new(RefCell::new(App {
                game,
                sprites,
                surface,
                audio,
                jump,
                canvas,
            })))
        })
        .await;

        let app = match started {
            Ok(Ok(app)) => app,
            Ok(Err(err)) => {
                log::error!("Invalid tuning: {}", err);
                alert(&err.to_string());
                return;
            }
            Err(err) => {
                alert(&err.to_string());
                return;
            }
        };

        setup_resize_handler(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Hop Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, jump: JumpLatch) {
        // Touch start (jump)
        {
            let jump = jump.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                jump.request();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" || event.key() == " " {
                    event.prevent_default();
                    jump.request();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(viewport) = window_viewport() {
                app.borrow_mut().resize(viewport);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let outcome = app.borrow_mut().frame();

        match outcome {
            FrameOutcome::Continue => request_animation_frame(app),
            FrameOutcome::GameOver { score } => {
                // This run is over; the next frame belongs to a fresh one
                alert(&format!("Game Over! Obstacles passed: {}", score));
                app.borrow_mut().restart();
                request_animation_frame(app);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use hop_dash::game::autopilot;
    use hop_dash::sim::Viewport;
    use hop_dash::{Game, Tuning};
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Hop Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(err) => {
                    log::error!("Failed to load tuning from {}: {}", path, err);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = match Game::new(seed, tuning, Viewport::new(1230.0, 670.0), 3) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Invalid tuning: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Five minutes at 60 fps
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    let mut frames = 0;
    while frames < MAX_FRAMES {
        let mut input = {
            let jump = autopilot(game.state());
            move || jump
        };
        if let (hop_dash::FrameOutcome::GameOver { score }, _) = game.frame(&mut input) {
            println!("Game Over! Obstacles passed: {}", score);
            return ExitCode::SUCCESS;
        }
        frames += 1;
    }

    println!("Survived {} frames, obstacles passed: {}", frames, game.score());
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
