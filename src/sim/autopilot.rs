//! Demo-mode player
//!
//! Looks at the obstacles about to reach the paddle and steps away from the
//! most urgent one. Good enough to keep a headless run alive for a while,
//! not meant to be unbeatable.

use super::geometry::Body;
use super::state::GameState;
use super::tick::Move;

/// How far ahead (in ticks) an obstacle counts as a threat
const LOOKAHEAD_TICKS: f64 = 40.0;

/// Pick a step for this tick, or `None` to stay put
pub fn suggest(state: &GameState) -> Option<Move> {
    let paddle = state.player.bounds();
    let margin = state.player.step(state.rules.step_divisor);

    let threat = state
        .obstacles
        .iter()
        .filter_map(|o| {
            let b = o.bounds();
            let gap = (b.x - paddle.right()).max(0.0);
            let eta = gap / o.speed();
            let in_lane = b.bottom() >= paddle.y - margin && b.y <= paddle.bottom() + margin;
            (in_lane && eta <= LOOKAHEAD_TICKS).then_some((eta, b))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, b)| b)?;

    let threat_mid = threat.y + threat.h / 2.0;
    let paddle_mid = paddle.y + paddle.h / 2.0;
    let at_top = paddle.y <= 0.0;
    let at_bottom = paddle.bottom() >= state.field.height();

    if threat_mid >= paddle_mid {
        if at_top {
            Some(Move::Down)
        } else {
            Some(Move::Up)
        }
    } else if at_bottom {
        Some(Move::Up)
    } else {
        Some(Move::Down)
    }
}
