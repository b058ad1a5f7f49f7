//! One step of the play loop
//!
//! The app layer runs `advance_frame`, renders, then `update` and `check`.
//! `tick` bundles the three for headless use.

use super::geometry::Body;
use super::state::{GameMode, GameState};

/// A single paddle step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
}

/// Bump the frame counter
pub fn advance_frame(state: &mut GameState) {
    state.frames += 1;
}

/// Spawn, move, then score and prune exited obstacles
pub fn update(state: &mut GameState) {
    if state.frames % state.rules.spawn_interval == 0 {
        state.spawn_obstacle();
    }

    for obstacle in state.obstacles.iter_mut() {
        obstacle.update();
    }
    state.player.update();

    // retain keeps spawn order and visits every entry exactly once
    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.has_exited());
    let exited = (before - state.obstacles.len()) as u64;
    if exited > 0 {
        state.score += exited;
        log::debug!("{} obstacle(s) dodged, score {}", exited, state.score);
    }
}

/// End the game if any obstacle touches the paddle. Returns true on a hit.
pub fn check(state: &mut GameState) -> bool {
    let hit = state
        .obstacles
        .iter()
        .any(|o| o.is_colliding(&state.player));
    if hit {
        state.mode = GameMode::Ended;
        log::info!("Paddle hit at frame {}, final score {}", state.frames, state.score);
    }
    hit
}

/// Advance a playing game by one tick without rendering
pub fn tick(state: &mut GameState) {
    if state.mode != GameMode::Playing {
        return;
    }
    advance_frame(state);
    update(state);
    check(state);
}

/// Move the paddle one step. Ignored unless the game is running.
pub fn apply_move(state: &mut GameState, mv: Move) -> bool {
    if state.mode != GameMode::Playing {
        return false;
    }
    let step = state.player.step(state.rules.step_divisor);
    match mv {
        Move::Up => state.player.move_by(-step),
        Move::Down => state.player.move_by(step),
    }
    true
}
