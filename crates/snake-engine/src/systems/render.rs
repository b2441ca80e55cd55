use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::{FrameSnapshot, GameState};
use crate::renderer::draw_list::{DrawCommand, DrawList, Paint, TextStyle};

/// Alpha of the body segment next to the tail end of the fade.
const BODY_MIN_ALPHA: f32 = 0.4;

/// Alpha for body segment `index` (1 = neck) of a snake `len` cells long.
/// Fades from nearly opaque behind the head toward `BODY_MIN_ALPHA` at the tail.
pub fn body_alpha(index: usize, len: usize) -> f32 {
    let progress = index as f32 / len.max(1) as f32;
    BODY_MIN_ALPHA + (1.0 - progress) * (1.0 - BODY_MIN_ALPHA)
}

/// Build the paint commands for one frame from a snapshot.
/// Order: clear, snake head to tail, food, then the game-over overlay.
pub fn build_draw_list(snapshot: &FrameSnapshot<'_>, config: &GameConfig, list: &mut DrawList) {
    list.clear();

    let surface = Vec2::new(snapshot.surface_width as f32, snapshot.surface_height as f32);
    let cell = Vec2::splat(snapshot.cell_size as f32);

    list.push(DrawCommand::FillRect {
        origin: Vec2::ZERO,
        size: surface,
        paint: Paint::Background,
        alpha: 1.0,
        glow: 0.0,
    });

    let len = snapshot.snake.len();
    for (index, segment) in snapshot.snake.iter().enumerate() {
        let (alpha, glow) = if index == 0 {
            (1.0, config.head_glow as f32)
        } else {
            (body_alpha(index, len), 0.0)
        };
        list.push(DrawCommand::FillRect {
            origin: segment.origin(snapshot.cell_size),
            size: cell,
            paint: Paint::Snake,
            alpha,
            glow,
        });
    }

    if let Some(food) = snapshot.food {
        list.push(DrawCommand::FillRect {
            origin: food.origin(snapshot.cell_size),
            size: cell,
            paint: Paint::Food,
            alpha: 1.0,
            glow: config.food_glow as f32,
        });
    }

    if snapshot.state == GameState::GameOver {
        push_game_over(list, surface, snapshot.score, config.overlay_alpha as f32);
    }
}

fn push_game_over(list: &mut DrawList, surface: Vec2, score: u32, overlay_alpha: f32) {
    list.push(DrawCommand::FillRect {
        origin: Vec2::ZERO,
        size: surface,
        paint: Paint::Background,
        alpha: overlay_alpha,
        glow: 0.0,
    });

    let center = surface * 0.5;
    let lines = [
        ("GAME OVER".to_string(), -40.0, TextStyle::Title),
        (format!("Score: {score}"), 20.0, TextStyle::Body),
        ("Tap/Click to restart".to_string(), 60.0, TextStyle::Hint),
    ];
    for (text, dy, style) in lines {
        list.push(DrawCommand::FillText {
            text,
            center: center + Vec2::new(0.0, dy),
            style,
            paint: Paint::Snake,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Cell;
    use std::collections::VecDeque;

    fn snake() -> VecDeque<Cell> {
        [Cell::new(3, 1), Cell::new(2, 1), Cell::new(1, 1), Cell::new(0, 1)]
            .into_iter()
            .collect()
    }

    fn snapshot(snake: &VecDeque<Cell>, state: GameState) -> FrameSnapshot<'_> {
        FrameSnapshot {
            snake,
            food: Some(Cell::new(5, 5)),
            score: 70,
            state,
            cell_size: 20,
            surface_width: 400,
            surface_height: 300,
        }
    }

    fn rects(list: &DrawList) -> Vec<(Vec2, Paint, f32, f32)> {
        list.iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { origin, paint, alpha, glow, .. } => Some((*origin, *paint, *alpha, *glow)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn playing_frame_layout() {
        let body = snake();
        let mut list = DrawList::new();
        build_draw_list(&snapshot(&body, GameState::Playing), &GameConfig::default(), &mut list);

        let rects = rects(&list);
        // clear + 4 segments + food
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], (Vec2::ZERO, Paint::Background, 1.0, 0.0));
        assert_eq!(rects[1], (Vec2::new(60.0, 20.0), Paint::Snake, 1.0, 15.0));
        assert_eq!(rects[5], (Vec2::new(100.0, 100.0), Paint::Food, 1.0, 10.0));
        assert!(list.iter().all(|c| !matches!(c, DrawCommand::FillText { .. })));
    }

    #[test]
    fn body_fades_toward_the_tail() {
        let body = snake();
        let mut list = DrawList::new();
        build_draw_list(&snapshot(&body, GameState::Playing), &GameConfig::default(), &mut list);

        let alphas: Vec<f32> = rects(&list)[2..5].iter().map(|r| r.2).collect();
        assert!(alphas.windows(2).all(|w| w[0] > w[1]), "alphas {alphas:?}");
        assert!(alphas.iter().all(|a| *a >= BODY_MIN_ALPHA && *a < 1.0));
    }

    #[test]
    fn game_over_adds_overlay_and_text() {
        let body = snake();
        let mut list = DrawList::new();
        build_draw_list(&snapshot(&body, GameState::GameOver), &GameConfig::default(), &mut list);

        let texts: Vec<(&str, Vec2, TextStyle)> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, center, style, .. } => Some((text.as_str(), *center, *style)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("GAME OVER", Vec2::new(200.0, 110.0), TextStyle::Title),
                ("Score: 70", Vec2::new(200.0, 170.0), TextStyle::Body),
                ("Tap/Click to restart", Vec2::new(200.0, 210.0), TextStyle::Hint),
            ]
        );
        let overlay = rects(&list).last().copied().unwrap();
        assert_eq!(overlay, (Vec2::ZERO, Paint::Background, 0.8, 0.0));
    }

    #[test]
    fn missing_food_draws_no_food_rect() {
        let body = snake();
        let mut snap = snapshot(&body, GameState::Playing);
        snap.food = None;
        let mut list = DrawList::new();
        build_draw_list(&snap, &GameConfig::default(), &mut list);
        assert!(rects(&list).iter().all(|r| r.1 != Paint::Food));
    }
}
