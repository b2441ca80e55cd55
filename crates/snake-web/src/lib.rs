//! Browser bridge for the snake engine.
//!
//! The host page calls `snake_init` once with a canvas id, then forwards
//! surface sizes (`snake_resize`) and taps (`snake_pointer`). Frames are
//! driven from Rust through `requestAnimationFrame`.
//!
//! ```ignore
//! import init, { snake_init, snake_resize, snake_pointer } from "./snake_web.js";
//! await init();
//! snake_init("snake-canvas", null);
//! snake_resize(rect.width, rect.height);
//! container.addEventListener("click", e => snake_pointer(e.clientX, e.clientY));
//! ```

pub mod canvas;
pub mod error;
pub mod frame_loop;
pub mod runner;

use std::cell::RefCell;

use snake_engine::GameConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

pub use canvas::Canvas2dRenderer;
pub use error::WebError;
pub use frame_loop::FrameLoop;
pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
    static FRAME_LOOP: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Result<R, WebError> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f).ok_or(WebError::NotInitialized),
        Err(_) => Err(WebError::Js("runner is busy".to_string())),
    })
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, WebError> {
    let document = web_sys::window()
        .ok_or(WebError::NoWindow)?
        .document()
        .ok_or(WebError::NoDocument)?;
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| WebError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| WebError::NotACanvas(canvas_id.to_string()))
}

/// Fill in a food seed from `entropy` in `[0, 1)` unless the host chose one.
fn seed_if_unset(mut config: GameConfig, entropy: f64) -> GameConfig {
    if config.seed.is_none() {
        config.seed = Some((entropy * (1u64 << 53) as f64) as u64);
    }
    config
}

fn load_config(config_json: Option<String>) -> GameConfig {
    match config_json.as_deref().map(GameConfig::from_json) {
        None => GameConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("snake: ignoring config ({err}), using defaults");
            GameConfig::default()
        }
    }
}

/// Set up the game on `<canvas id=canvas_id>` and start the frame loop.
/// Calling it again replaces the previous game.
#[wasm_bindgen]
pub fn snake_init(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    snake_destroy();
    let canvas = find_canvas(canvas_id)?;
    let config = seed_if_unset(load_config(config_json), js_sys::Math::random());
    let runner = GameRunner::new(canvas, config)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    snake_start()?;
    log::info!("snake: initialized on #{canvas_id}");
    Ok(())
}

/// Report the surface size in CSS pixels. Zero sizes are accepted and defer
/// the first round until a real size arrives.
#[wasm_bindgen]
pub fn snake_resize(width: f64, height: f64) -> Result<(), JsValue> {
    Ok(with_runner(|r| r.resize(width, height))?)
}

/// Forward a click/tap at client coordinates.
#[wasm_bindgen]
pub fn snake_pointer(client_x: f64, client_y: f64) -> Result<(), JsValue> {
    Ok(with_runner(|r| r.pointer(client_x, client_y))?)
}

/// Start (or resume) the frame loop.
#[wasm_bindgen]
pub fn snake_start() -> Result<(), JsValue> {
    with_runner(|r| r.start())?;
    let already_running = FRAME_LOOP.with(|cell| cell.borrow().as_ref().is_some_and(FrameLoop::is_active));
    if already_running {
        return Ok(());
    }
    let frame_loop = FrameLoop::start(|now| {
        if let Err(err) = with_runner(|r| r.frame(now)) {
            log::warn!("snake: skipped frame: {err}");
        }
    })?;
    FRAME_LOOP.with(|cell| {
        *cell.borrow_mut() = Some(frame_loop);
    });
    Ok(())
}

/// Stop the frame loop, cancelling the pending frame.
#[wasm_bindgen]
pub fn snake_stop() {
    FRAME_LOOP.with(|cell| cell.borrow_mut().take());
    let _ = with_runner(|r| r.stop());
}

/// Tear everything down, e.g. when the hosting component unmounts.
#[wasm_bindgen]
pub fn snake_destroy() {
    snake_stop();
    RUNNER.with(|cell| cell.borrow_mut().take());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn snake_score() -> u32 {
    with_runner(|r| r.score()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn snake_is_game_over() -> bool {
    with_runner(|r| r.is_game_over()).unwrap_or(false)
}

/// Events since the last call, 4 floats each: kind, a, b, c.
/// Kinds: 1 = score (a = score), 2 = game over (a = score),
/// 3 = round started (a = cols, b = rows).
#[wasm_bindgen]
pub fn snake_take_events() -> Vec<f32> {
    with_runner(|r| r.take_events()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_config(None), GameConfig::default());
    }

    #[test]
    fn bad_config_falls_back() {
        assert_eq!(load_config(Some("{".to_string())), GameConfig::default());
    }

    #[test]
    fn good_config_is_used() {
        let config = load_config(Some(r#"{ "food_reward": 5 }"#.to_string()));
        assert_eq!(config.food_reward, 5);
    }

    #[test]
    fn unset_seed_comes_from_entropy() {
        let a = seed_if_unset(GameConfig::default(), 0.25);
        let b = seed_if_unset(GameConfig::default(), 0.75);
        assert_eq!(a.seed, Some(1u64 << 51));
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn host_seed_is_kept() {
        let config = load_config(Some(r#"{ "seed": 7 }"#.to_string()));
        assert_eq!(seed_if_unset(config, 0.5).seed, Some(7));
    }

    #[test]
    fn exports_require_init() {
        assert!(matches!(with_runner(|r| r.score()), Err(WebError::NotInitialized)));
        assert_eq!(snake_score(), 0);
        assert!(!snake_is_game_over());
        assert!(snake_take_events().is_empty());
    }
}
