//! Per-round state and the factory that builds a fresh round.

use std::collections::VecDeque;

use crate::api::config::GameConfig;
use crate::core::grid::{is_occupied, Cell, GridExtent};
use crate::core::rng::Rng;
use crate::input::direction::{Direction, DirectionBuffer};

/// Everything that belongs to one round: body, food, score, speed and the
/// direction slots. Replaced wholesale on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Head first, tail last.
    pub snake: VecDeque<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    /// Milliseconds between logic ticks.
    pub tick_interval: f64,
    pub directions: DirectionBuffer,
}

impl RoundState {
    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }
}

/// Build a new round: a horizontal snake of `config.initial_length` cells with
/// its head at the grid center, moving right, plus freshly placed food.
///
/// The head column is pushed right when the center is too close to the left
/// edge for the body to fit.
pub fn fresh_round(extent: GridExtent, config: &GameConfig, rng: &mut Rng) -> RoundState {
    let length = config.initial_length.max(1);
    let center = extent.center();
    let head = Cell::new(center.col.max(length as i32 - 1), center.row);
    let snake: VecDeque<Cell> = (0..length as i32).map(|i| head.offset(-i, 0)).collect();
    let food = spawn_food(extent, &snake, rng, config.food_placement_attempts);

    RoundState {
        snake,
        food,
        score: 0,
        tick_interval: config.initial_tick_ms,
        directions: DirectionBuffer::new(Direction::Right),
    }
}

/// Place food on a random cell not covered by `body`.
///
/// Returns `None` only when the body covers every cell. When `attempts`
/// random tries all land on the body, the last try is returned even though it
/// collides; a placement is always produced without scanning the grid.
pub fn spawn_food<'a, B>(extent: GridExtent, body: B, rng: &mut Rng, attempts: u32) -> Option<Cell>
where
    B: IntoIterator<Item = &'a Cell> + Copy,
{
    let area = extent.area();
    if area == 0 || body.into_iter().count() >= area {
        return None;
    }

    let mut candidate = rng.next_cell(extent);
    for _ in 1..attempts.max(1) {
        if !is_occupied(candidate, body) {
            return Some(candidate);
        }
        candidate = rng.next_cell(extent);
    }
    if is_occupied(candidate, body) {
        log::warn!(
            "food placement gave up after {} attempts, accepting ({}, {})",
            attempts,
            candidate.col,
            candidate.row
        );
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_round_is_centered_and_moving_right() {
        let config = GameConfig::default();
        let mut rng = Rng::new(1);
        let round = fresh_round(GridExtent::new(20, 20), &config, &mut rng);

        let body: Vec<Cell> = round.snake.iter().copied().collect();
        assert_eq!(body, vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);
        assert_eq!(round.score, 0);
        assert_eq!(round.tick_interval, 150.0);
        assert_eq!(round.directions.current(), Direction::Right);
        assert_eq!(round.directions.pending(), Direction::Right);
    }

    #[test]
    fn fresh_round_food_is_valid() {
        let config = GameConfig::default();
        let extent = GridExtent::new(12, 7);
        for seed in 1..50 {
            let mut rng = Rng::new(seed);
            let round = fresh_round(extent, &config, &mut rng);
            let food = round.food.unwrap();
            assert!(extent.contains(food));
            assert!(!is_occupied(food, &round.snake));
        }
    }

    #[test]
    fn fresh_round_fits_narrow_grid() {
        let config = GameConfig::default();
        let mut rng = Rng::new(3);
        let extent = GridExtent::new(4, 1);
        let round = fresh_round(extent, &config, &mut rng);
        assert!(round.snake.iter().all(|c| extent.contains(*c)));
        assert_eq!(round.head(), Some(Cell::new(2, 0)));
    }

    #[test]
    fn food_finds_the_only_free_cell() {
        let extent = GridExtent::new(2, 2);
        let body = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)];
        let mut rng = Rng::new(11);
        assert_eq!(spawn_food(extent, &body, &mut rng, 1000), Some(Cell::new(1, 1)));
    }

    #[test]
    fn food_is_absent_on_a_full_grid() {
        let extent = GridExtent::new(2, 1);
        let body = [Cell::new(0, 0), Cell::new(1, 0)];
        let mut rng = Rng::new(5);
        assert_eq!(spawn_food(extent, &body, &mut rng, 1000), None);
    }

    #[test]
    fn exhausted_attempts_accept_last_candidate() {
        // One free cell out of 400 and a single attempt: whatever the roll,
        // a cell inside the grid comes back.
        let extent = GridExtent::new(20, 20);
        let body: Vec<Cell> = (0..20)
            .flat_map(|c| (0..20).map(move |r| Cell::new(c, r)))
            .filter(|c| *c != Cell::new(19, 19))
            .collect();
        let mut rng = Rng::new(2);
        let food = spawn_food(extent, &body, &mut rng, 1).unwrap();
        assert!(extent.contains(food));
    }
}
