use snake_engine::{GameConfig, GameEvent, GameState, InputEvent, Renderer, SnakeGame};
use web_sys::HtmlCanvasElement;

use crate::canvas::Canvas2dRenderer;
use crate::error::WebError;

/// Wires the snake game to a canvas.
///
/// The exports in `lib.rs` keep one runner in a `thread_local!` because
/// wasm-bindgen cannot export a struct holding DOM handles by reference.
/// Host calls only queue input; the game applies it at the start of the next
/// animation frame.
pub struct GameRunner {
    game: SnakeGame,
    renderer: Canvas2dRenderer,
}

impl GameRunner {
    pub fn new(canvas: HtmlCanvasElement, config: GameConfig) -> Result<Self, WebError> {
        let renderer = Canvas2dRenderer::new(canvas, config.palette())?;
        log::info!("snake: painting with {}", renderer.backend());
        Ok(Self {
            game: SnakeGame::new(config),
            renderer,
        })
    }

    /// New surface size in CSS pixels. The backing store follows immediately;
    /// the game re-derives its grid on the next frame.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = width.max(0.0).floor() as u32;
        let height = height.max(0.0).floor() as u32;
        self.renderer.resize(width, height);
        self.game.push_input(InputEvent::Resize { width, height });
    }

    /// Pointer or touch at client (viewport) coordinates.
    pub fn pointer(&mut self, client_x: f64, client_y: f64) {
        let (x, y) = self.renderer.to_surface(client_x, client_y);
        self.game.push_input(InputEvent::PointerDown { x, y });
    }

    /// Run one animation frame.
    pub fn frame(&mut self, now: f64) {
        if let Err(err) = self.game.frame(now, &mut self.renderer) {
            log::error!("snake: frame failed: {err}");
        }
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    pub fn stop(&mut self) {
        self.game.stop();
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.game.state() == Some(GameState::GameOver)
    }

    /// Drain pending events as a flat float buffer, 4 floats per event.
    pub fn take_events(&mut self) -> Vec<f32> {
        let events = self.game.take_events();
        bytemuck::cast_slice::<GameEvent, f32>(&events).to_vec()
    }
}
