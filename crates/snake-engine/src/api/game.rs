use std::collections::VecDeque;

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::{FrameSnapshot, GameEvent, GameState};
use crate::core::grid::{cell_size, grid_extent, Cell, GridExtent};
use crate::core::time::TickTimer;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::draw_list::DrawList;
use crate::renderer::traits::{FrameData, Renderer};
use crate::systems::movement::{Engine, TickOutcome};
use crate::systems::render::build_draw_list;

/// Drawing surface size in pixels, as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

/// What a resize did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Surface too small to hold a round. Any running round is dropped and
    /// play waits for a usable size.
    Deferred,
    /// First usable size: the first round was created.
    Started,
    /// Grid extent changed: the round was thrown away and a fresh one started.
    Reset,
    /// Same grid extent: only the surface size was updated.
    Unchanged,
}

/// Summary of one frame, mostly for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Logic outcome if a tick ran this frame.
    pub tick: Option<TickOutcome>,
    /// Whether a frame was painted.
    pub painted: bool,
}

/// The game clock: owns the engine and dispatches the two per-frame stages.
///
/// One host frame callback drives everything. Each frame drains queued input,
/// runs the logic stage (which only ticks once the current interval has
/// elapsed), then runs the render stage, which reads a snapshot and never
/// mutates the round.
pub struct SnakeGame {
    config: GameConfig,
    /// `None` until a usable surface size has been seen.
    engine: Option<Engine>,
    surface: Surface,
    cell_size: u32,
    timer: TickTimer,
    input: InputQueue,
    events: Vec<GameEvent>,
    draw_list: DrawList,
    running: bool,
}

impl SnakeGame {
    /// Create a game with `config`. An invalid config is logged and replaced
    /// by the defaults.
    pub fn new(config: GameConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("rejecting game config ({err}), using defaults");
                GameConfig::default()
            }
        };
        Self {
            config,
            engine: None,
            surface: Surface::default(),
            cell_size: 0,
            timer: TickTimer::new(),
            input: InputQueue::new(),
            events: Vec::with_capacity(8),
            draw_list: DrawList::new(),
            running: true,
        }
    }

    /// Queue a host event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply a new surface size now. Recomputes cell size and grid extent;
    /// a changed extent resets the round.
    pub fn resize(&mut self, width: u32, height: u32) -> ResizeOutcome {
        self.surface = Surface { width, height };
        if width == 0 || height == 0 {
            log::debug!("surface not sized yet ({width}x{height}), deferring");
            return self.defer();
        }

        let size = cell_size(width, height, &self.config);
        let extent = grid_extent(width, height, size);
        if !extent.fits_spawn(self.config.initial_length) {
            log::debug!("grid {}x{} too small for a round, deferring", extent.cols, extent.rows);
            return self.defer();
        }
        self.cell_size = size;

        let outcome = match self.engine.as_mut() {
            None => {
                self.engine = Some(Engine::new(extent, self.config.clone()));
                ResizeOutcome::Started
            }
            Some(engine) if engine.extent() != extent => {
                engine.reset(extent);
                ResizeOutcome::Reset
            }
            Some(_) => return ResizeOutcome::Unchanged,
        };

        self.timer.reset();
        self.events.push(GameEvent::round_started(extent.cols, extent.rows));
        log::info!(
            "round started on {}x{} grid, cell {}px ({:?})",
            extent.cols,
            extent.rows,
            size,
            outcome
        );
        outcome
    }

    /// The old grid no longer matches the surface, so its round cannot go on.
    fn defer(&mut self) -> ResizeOutcome {
        if self.engine.take().is_some() {
            log::info!("surface collapsed, round dropped until a usable size arrives");
        }
        self.cell_size = 0;
        self.timer.reset();
        ResizeOutcome::Deferred
    }

    /// Handle a tap at surface coordinates. Restarts when the round is over,
    /// otherwise steers. Returns true if it changed anything.
    pub fn pointer(&mut self, x: f32, y: f32) -> bool {
        let cell_size = self.cell_size;
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        match engine.state() {
            GameState::GameOver => {
                if !engine.restart() {
                    return false;
                }
                let extent = engine.extent();
                self.timer.reset();
                self.events.push(GameEvent::round_started(extent.cols, extent.rows));
                log::info!("restarted");
                true
            }
            GameState::Playing => engine.steer(Vec2::new(x, y), cell_size).is_some(),
        }
    }

    /// Run one host frame: input, logic stage, render stage.
    /// A stopped game ignores frames entirely.
    pub fn frame<R: Renderer>(&mut self, now: f64, renderer: &mut R) -> Result<FrameReport, R::Error> {
        if !self.running {
            return Ok(FrameReport::default());
        }

        for event in self.input.drain() {
            match event {
                InputEvent::Resize { width, height } => {
                    self.resize(width, height);
                }
                InputEvent::PointerDown { x, y } => {
                    self.pointer(x, y);
                }
            }
        }

        let tick = self.maybe_advance_logic(now);
        let painted = self.render_frame(renderer)?;
        Ok(FrameReport { tick, painted })
    }

    /// Logic stage: tick if the interval has elapsed since the last tick.
    pub fn maybe_advance_logic(&mut self, now: f64) -> Option<TickOutcome> {
        let engine = self.engine.as_mut()?;
        if engine.state() != GameState::Playing || engine.round().is_empty() {
            return None;
        }
        if !self.timer.ready(now, engine.tick_interval()) {
            return None;
        }

        let outcome = engine.tick();
        match outcome {
            TickOutcome::Grew { score } => self.events.push(GameEvent::score(score)),
            TickOutcome::Died { final_score, .. } => self.events.push(GameEvent::game_over(final_score)),
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
        Some(outcome)
    }

    /// Render stage: paint the current snapshot. Returns false when there is
    /// nothing to paint yet.
    pub fn render_frame<R: Renderer>(&mut self, renderer: &mut R) -> Result<bool, R::Error> {
        let Some(engine) = self.engine.as_ref() else {
            return Ok(false);
        };
        let round = engine.round();
        let snapshot = FrameSnapshot {
            snake: &round.snake,
            food: round.food,
            score: round.score,
            state: engine.state(),
            cell_size: self.cell_size,
            surface_width: self.surface.width,
            surface_height: self.surface.height,
        };
        build_draw_list(&snapshot, &self.config, &mut self.draw_list);
        renderer.draw(&FrameData::new(&self.draw_list, self.surface.width, self.surface.height))?;
        Ok(true)
    }

    /// Resume frame processing. The tick timer re-arms on the next frame so
    /// time spent stopped does not count toward a tick.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.timer.reset();
        }
    }

    /// Stop processing frames. Queued input stays queued.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hand over every event produced since the last call, oldest first.
    /// Events from direct `resize`/`pointer` calls are kept until taken.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Read-only accessors ----

    /// Score of the active round, for labels outside the canvas.
    pub fn score(&self) -> u32 {
        self.engine.as_ref().map_or(0, Engine::score)
    }

    /// `None` until the first round has started.
    pub fn state(&self) -> Option<GameState> {
        self.engine.as_ref().map(Engine::state)
    }

    pub fn snake(&self) -> Option<&VecDeque<Cell>> {
        self.engine.as_ref().map(|e| &e.round().snake)
    }

    pub fn food(&self) -> Option<Cell> {
        self.engine.as_ref().and_then(|e| e.round().food)
    }

    pub fn extent(&self) -> Option<GridExtent> {
        self.engine.as_ref().map(Engine::extent)
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Events not yet taken.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::{DrawCommand, Paint};
    use std::convert::Infallible;

    /// Keeps the last frame's commands.
    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last: Vec<DrawCommand>,
        size: (u32, u32),
    }

    impl Renderer for Recorder {
        type Error = Infallible;

        fn backend(&self) -> &'static str {
            "recorder"
        }

        fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), Infallible> {
            self.frames += 1;
            self.last = frame.commands.to_vec();
            self.size = (frame.width, frame.height);
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    /// 400x400 surface: cell 16px, 25x25 grid, head at (12,12).
    fn started() -> SnakeGame {
        let mut game = SnakeGame::default();
        assert_eq!(game.resize(400, 400), ResizeOutcome::Started);
        game
    }

    fn head(game: &SnakeGame) -> Cell {
        *game.snake().unwrap().front().unwrap()
    }

    fn place_food(game: &mut SnakeGame, food: Cell) {
        let engine = game.engine.as_mut().unwrap();
        let mut round = engine.round().clone();
        round.food = Some(food);
        engine.load_round(round);
    }

    #[test]
    fn unsized_surface_defers_start() {
        let mut game = SnakeGame::default();
        let mut r = Recorder::default();
        assert_eq!(game.resize(0, 300), ResizeOutcome::Deferred);
        assert!(game.state().is_none());
        let report = game.frame(0.0, &mut r).unwrap();
        assert!(!report.painted);
        assert_eq!(r.frames, 0);
        assert!(!game.pointer(10.0, 10.0));

        assert_eq!(game.resize(400, 400), ResizeOutcome::Started);
        assert_eq!(game.state(), Some(GameState::Playing));
        assert_eq!(game.cell_size(), 16);
        assert_eq!(game.extent(), Some(GridExtent::new(25, 25)));
    }

    #[test]
    fn logic_ticks_at_interval_while_render_runs_every_frame() {
        let mut game = started();
        let mut r = Recorder::default();
        let start = head(&game);

        // 60 Hz frames over 320 ms: ticks at 150 and 300 only.
        let mut ticks = 0;
        let mut now = 1000.0;
        while now <= 1320.0 {
            if game.frame(now, &mut r).unwrap().tick.is_some() {
                ticks += 1;
            }
            now += 10.0;
        }
        assert_eq!(ticks, 2);
        assert_eq!(r.frames, 33);
        assert_eq!(head(&game), start.offset(2, 0));
    }

    #[test]
    fn render_stage_does_not_mutate() {
        let mut game = started();
        let mut r = Recorder::default();
        let before = game.snake().cloned();
        for _ in 0..5 {
            game.render_frame(&mut r).unwrap();
        }
        assert_eq!(game.snake().cloned(), before);
        assert_eq!(r.frames, 5);
        assert!(matches!(
            r.last[0],
            DrawCommand::FillRect {
                paint: Paint::Background,
                ..
            }
        ));
    }

    #[test]
    fn queued_pointer_steers_before_the_tick() {
        let mut game = started();
        let mut r = Recorder::default();
        place_food(&mut game, Cell::new(0, 0));
        game.frame(0.0, &mut r).unwrap();

        let center = Cell::new(12, 12).center(16);
        game.push_input(InputEvent::PointerDown {
            x: center.x,
            y: center.y + 100.0,
        });
        let report = game.frame(150.0, &mut r).unwrap();

        assert_eq!(report.tick, Some(TickOutcome::Moved));
        assert_eq!(head(&game), Cell::new(12, 13));
    }

    #[test]
    fn death_then_tap_restarts_with_preloaded_round() {
        let mut game = started();
        let mut r = Recorder::default();
        game.frame(0.0, &mut r).unwrap();

        // Drive right into the wall: head starts at col 12 of 25.
        let mut now = 0.0;
        let died = loop {
            now += 150.0;
            if let Some(TickOutcome::Died { final_score, .. }) = game.frame(now, &mut r).unwrap().tick {
                break final_score;
            }
            assert!(now < 10_000.0, "never hit the wall");
        };
        assert_eq!(game.state(), Some(GameState::GameOver));
        assert!(game.events().contains(&GameEvent::game_over(died)));
        assert!(r.last.iter().any(|c| matches!(c, DrawCommand::FillText { text, .. } if text == "GAME OVER")));

        let preloaded = game.engine().unwrap().next_round().cloned().unwrap();
        // Frames while over do not move anything.
        let frozen = game.snake().cloned();
        game.frame(now + 1000.0, &mut r).unwrap();
        assert_eq!(game.snake().cloned(), frozen);

        assert!(game.pointer(0.0, 0.0));
        assert_eq!(game.state(), Some(GameState::Playing));
        assert_eq!(game.score(), 0);
        assert_eq!(game.engine().unwrap().round(), &preloaded);
        assert_eq!(game.snake().unwrap().len(), 3);
        assert_eq!(head(&game), Cell::new(12, 12));

        // First frame of the new round only re-arms the timer.
        assert_eq!(game.frame(now + 2000.0, &mut r).unwrap().tick, None);
        assert!(game.frame(now + 2150.0, &mut r).unwrap().tick.is_some());
    }

    #[test]
    fn resize_with_new_extent_resets_round() {
        let mut game = started();
        let mut r = Recorder::default();
        game.frame(0.0, &mut r).unwrap();
        game.frame(150.0, &mut r).unwrap();
        assert_eq!(head(&game), Cell::new(13, 12));

        // Same extent: nothing changes.
        assert_eq!(game.resize(405, 410), ResizeOutcome::Unchanged);
        assert_eq!(head(&game), Cell::new(13, 12));

        game.push_input(InputEvent::Resize { width: 800, height: 600 });
        game.frame(200.0, &mut r).unwrap();
        assert_eq!(game.extent(), Some(GridExtent::new(40, 30)));
        assert_eq!(game.cell_size(), 20);
        assert_eq!(head(&game), Cell::new(20, 15));
        assert!(game.events().contains(&GameEvent::round_started(40, 30)));
    }

    #[test]
    fn stopped_game_ignores_frames() {
        let mut game = started();
        let mut r = Recorder::default();
        game.frame(0.0, &mut r).unwrap();
        game.stop();
        assert!(!game.is_running());
        let report = game.frame(500.0, &mut r).unwrap();
        assert_eq!(report, FrameReport::default());
        assert_eq!(r.frames, 1);

        game.start();
        // Re-armed: no catch-up tick right after starting.
        assert_eq!(game.frame(5000.0, &mut r).unwrap().tick, None);
        assert_eq!(r.frames, 2);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let config = GameConfig {
            min_tick_ms: 500.0,
            ..GameConfig::default()
        };
        let game = SnakeGame::new(config);
        assert_eq!(game.config(), &GameConfig::default());
    }

    #[test]
    fn eating_emits_score_event() {
        let mut game = started();
        let mut r = Recorder::default();
        game.frame(0.0, &mut r).unwrap();
        let next = head(&game).offset(1, 0);
        place_food(&mut game, next);
        game.take_events();

        let report = game.frame(150.0, &mut r).unwrap();
        assert_eq!(report.tick, Some(TickOutcome::Grew { score: 10 }));
        assert_eq!(game.score(), 10);
        assert_eq!(game.take_events(), vec![GameEvent::score(10)]);
        assert!(game.events().is_empty());
    }

    #[test]
    fn direct_resize_event_survives_the_next_frame() {
        let mut game = SnakeGame::default();
        let mut r = Recorder::default();
        game.resize(400, 400);
        game.frame(0.0, &mut r).unwrap();
        game.frame(16.0, &mut r).unwrap();
        assert_eq!(game.take_events(), vec![GameEvent::round_started(25, 25)]);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn collapsing_surface_drops_the_round() {
        let mut game = started();
        let mut r = Recorder::default();
        game.frame(0.0, &mut r).unwrap();

        // 40px wide holds only two 15px cells, too few for the spawn snake.
        assert_eq!(game.resize(40, 400), ResizeOutcome::Deferred);
        assert!(game.state().is_none());
        assert!(game.extent().is_none());
        assert_eq!(game.cell_size(), 0);
        let report = game.frame(150.0, &mut r).unwrap();
        assert_eq!(report.tick, None);
        assert!(!report.painted);
        assert!(!game.pointer(10.0, 10.0));

        // A usable size starts a fresh round again.
        assert_eq!(game.resize(800, 600), ResizeOutcome::Started);
        assert_eq!(head(&game), Cell::new(20, 15));
    }

    #[test]
    fn zero_size_after_start_also_drops_the_round() {
        let mut game = started();
        assert_eq!(game.resize(0, 0), ResizeOutcome::Deferred);
        assert!(game.engine().is_none());
    }
}
