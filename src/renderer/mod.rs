//! 2D rendering module
//!
//! Scene drawing is written against the small `Canvas` trait so the same
//! code paints the browser canvas and fills a `DisplayList` in tests and
//! headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod display_list;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use display_list::{DisplayList, DrawCommand};

use crate::settings::Palette;
use crate::sim::{GameMode, GameState, Obstacle, Player};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Hanging,
    Middle,
}

impl TextBaseline {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
        }
    }
}

/// Everything needed to place a line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub color: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Squeeze the text to fit this width
    pub max_width: Option<f64>,
}

/// Drawing surface primitives
pub trait Canvas {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

/// Something that knows how to paint itself
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas, palette: &Palette);
}

impl Drawable for Player {
    fn draw(&self, canvas: &mut dyn Canvas, palette: &Palette) {
        canvas.fill_rect(self.x(), self.y(), self.width(), self.height(), &palette.player);
    }
}

impl Drawable for Obstacle {
    fn draw(&self, canvas: &mut dyn Canvas, palette: &Palette) {
        let center = self.center();
        canvas.fill_circle(center.x, center.y, self.radius(), &palette.obstacle);
    }
}

/// Background, paddle, obstacles in spawn order, then the score
pub fn draw_scene(canvas: &mut dyn Canvas, state: &GameState, palette: &Palette) {
    let (w, h) = (state.field.width(), state.field.height());
    canvas.fill_rect(0.0, 0.0, w, h, &palette.background);

    state.player.draw(canvas, palette);
    for obstacle in &state.obstacles {
        obstacle.draw(canvas, palette);
    }

    let style = TextStyle {
        font: palette.score_font.clone(),
        color: palette.score.clone(),
        align: TextAlign::End,
        baseline: TextBaseline::Hanging,
        max_width: None,
    };
    canvas.fill_text(&state.score.to_string(), w, 0.0, &style);

    if state.mode == GameMode::Paused {
        draw_pause_overlay(canvas, state, palette);
    }
}

fn draw_pause_overlay(canvas: &mut dyn Canvas, state: &GameState, palette: &Palette) {
    let (w, h) = (state.field.width(), state.field.height());
    let style = TextStyle {
        font: palette.score_font.clone(),
        color: palette.pause_text.clone(),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        max_width: Some(w),
    };
    canvas.fill_text("Paused", w / 2.0, h / 2.0, &style);
}

/// Message shown while waiting for a key after a loss
pub fn game_over_message(score: u64) -> String {
    format!("You lost with {score} points")
}

/// Full-screen loss message with the final score
pub fn draw_game_over(canvas: &mut dyn Canvas, state: &GameState, palette: &Palette) {
    let (w, h) = (state.field.width(), state.field.height());
    canvas.fill_rect(0.0, 0.0, w, h, &palette.end_background);

    let style = TextStyle {
        font: palette.end_font.clone(),
        color: palette.end_text.clone(),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        max_width: Some(w),
    };
    canvas.fill_text(&game_over_message(state.score), w / 2.0, h / 2.0, &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Playfield, Rules};

    fn state() -> GameState {
        let field = Playfield::new(500, 400).unwrap();
        let mut state = GameState::new(field, Rules::default(), 1);
        state.init();
        state.obstacles.push(Obstacle::new(10, 300.0, 40.0, 4.0, 10.0, field));
        state.obstacles.push(Obstacle::new(11, 200.0, 90.0, 6.0, 10.0, field));
        state.score = 7;
        state
    }

    #[test]
    fn test_scene_draw_order() {
        let palette = Palette::default();
        let mut list = DisplayList::default();
        draw_scene(&mut list, &state(), &palette);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 5);
        assert_eq!(
            cmds[0],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 500.0,
                h: 400.0,
                color: "white".into(),
            }
        );
        assert_eq!(
            cmds[1],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 16.0,
                h: 80.0,
                color: "green".into(),
            }
        );
        assert_eq!(
            cmds[2],
            DrawCommand::Circle {
                cx: 304.0,
                cy: 44.0,
                radius: 4.0,
                color: "red".into(),
            }
        );
        assert!(matches!(&cmds[3], DrawCommand::Circle { cx, .. } if *cx == 206.0));
        match &cmds[4] {
            DrawCommand::Text { text, x, y, style } => {
                assert_eq!(text, "7");
                assert_eq!((*x, *y), (500.0, 0.0));
                assert_eq!(style.align, TextAlign::End);
                assert_eq!(style.baseline, TextBaseline::Hanging);
                assert_eq!(style.font, "30px Comic Sans MS");
            }
            other => panic!("expected score text, got {other:?}"),
        }
    }

    #[test]
    fn test_paused_scene_has_overlay() {
        let palette = Palette::default();
        let mut state = state();
        state.toggle_pause();
        let mut list = DisplayList::default();
        draw_scene(&mut list, &state, &palette);
        assert_eq!(list.texts().last().map(String::as_str), Some("Paused"));
    }

    #[test]
    fn test_game_over_screen() {
        let palette = Palette::default();
        let mut list = DisplayList::default();
        draw_game_over(&mut list, &state(), &palette);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(&cmds[0], DrawCommand::Rect { color, .. } if color == "black"));
        match &cmds[1] {
            DrawCommand::Text { text, x, y, style } => {
                assert_eq!(text, "You lost with 7 points");
                assert_eq!((*x, *y), (250.0, 200.0));
                assert_eq!(style.max_width, Some(500.0));
                assert_eq!(style.color, "red");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }
}
