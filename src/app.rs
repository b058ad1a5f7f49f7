//! Application mode machine
//!
//! The host feeds three kinds of events in: timer ticks, key presses and
//! window blur. Each handler runs to completion, draws whatever the new mode
//! needs, and tells the host what to do with the tick timer. Between events
//! the app is "suspended" on exactly one kind of event, see `Awaiting`.

use crate::error::ConfigError;
use crate::keys;
use crate::renderer::{Canvas, draw_game_over, draw_scene};
use crate::settings::Settings;
use crate::sim::{self, GameMode, GameState, Move, Playfield};

/// What the host should do with its interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave it as it is
    Keep,
    /// Start firing `on_tick` every `period_ms`
    Start { period_ms: u32 },
    /// Cancel it
    Stop,
}

/// Result of handling one host event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub timer: TimerCommand,
    /// The key was used; the host should suppress its default action
    pub consumed: bool,
}

impl Response {
    fn ignored() -> Self {
        Self {
            timer: TimerCommand::Keep,
            consumed: false,
        }
    }

    fn with_timer(mut self, timer: TimerCommand) -> Self {
        if timer != TimerCommand::Keep {
            self.timer = timer;
        }
        self
    }
}

/// The event the app is currently waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
    /// Not started yet
    Nothing,
    /// Play loop running
    Tick,
    /// Game over or paused; a key press moves things along
    KeyPress,
}

pub struct App {
    state: GameState,
    settings: Settings,
    awaiting: Awaiting,
    timer_running: bool,
}

impl App {
    /// Build the app for a canvas of the given size. `fallback_seed` is used
    /// when the settings do not pin one.
    pub fn new(
        settings: Settings,
        field: Playfield,
        fallback_seed: u64,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let rules = settings.rules();
        rules.check_playfield(&field)?;

        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!(
            "Playfield {}x{}, {} Hz, seed {}",
            field.width(),
            field.height(),
            settings.tick_hz,
            seed
        );

        Ok(Self {
            state: GameState::new(field, rules, seed),
            settings,
            awaiting: Awaiting::Nothing,
            timer_running: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn awaiting(&self) -> Awaiting {
        self.awaiting
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    /// Entry dispatch, called once the host is ready
    pub fn start(&mut self, canvas: &mut dyn Canvas) -> Response {
        self.dispatch(canvas)
    }

    /// Run the current mode until it needs to wait for an event
    fn dispatch(&mut self, canvas: &mut dyn Canvas) -> Response {
        loop {
            match self.state.mode {
                GameMode::Init => {
                    self.state.init();
                    log::info!("New game started");
                }
                GameMode::Reload => {
                    self.state.mode = GameMode::Init;
                }
                GameMode::Playing => {
                    self.awaiting = Awaiting::Tick;
                    draw_scene(canvas, &self.state, &self.settings.palette);
                    if self.timer_running {
                        return Response::ignored();
                    }
                    self.timer_running = true;
                    return Response::ignored().with_timer(TimerCommand::Start {
                        period_ms: self.settings.tick_period_ms(),
                    });
                }
                GameMode::Paused => {
                    self.awaiting = Awaiting::KeyPress;
                    draw_scene(canvas, &self.state, &self.settings.palette);
                    return Response::ignored();
                }
                GameMode::Ended => {
                    self.awaiting = Awaiting::KeyPress;
                    draw_game_over(canvas, &self.state, &self.settings.palette);
                    if let Ok(json) = serde_json::to_string(&self.state) {
                        log::debug!("Final state: {}", json);
                    }
                    return Response::ignored();
                }
            }
        }
    }

    /// Stop the timer and hand control back to the dispatcher
    fn leave_play_loop(&mut self, canvas: &mut dyn Canvas) -> Response {
        self.timer_running = false;
        let response = self.dispatch(canvas);
        Response {
            timer: TimerCommand::Stop,
            ..response
        }
    }

    /// One timer tick: count, draw, update, check
    pub fn on_tick(&mut self, canvas: &mut dyn Canvas) -> Response {
        if self.awaiting != Awaiting::Tick || self.state.mode != GameMode::Playing {
            // A tick that raced the timer cancellation
            return Response::ignored();
        }

        sim::advance_frame(&mut self.state);
        draw_scene(canvas, &self.state, &self.settings.palette);
        sim::update(&mut self.state);
        sim::check(&mut self.state);

        if self.state.mode != GameMode::Playing {
            return self.leave_play_loop(canvas);
        }
        Response::ignored()
    }

    /// Keyboard input, `code` as in `KeyboardEvent.code`
    pub fn on_key(&mut self, code: &str, canvas: &mut dyn Canvas) -> Response {
        match (self.awaiting, self.state.mode) {
            (Awaiting::Tick, GameMode::Playing) => match code {
                keys::ARROW_UP | keys::ARROW_DOWN => {
                    let mv = if code == keys::ARROW_UP {
                        Move::Up
                    } else {
                        Move::Down
                    };
                    sim::apply_move(&mut self.state, mv);
                    draw_scene(canvas, &self.state, &self.settings.palette);
                    Response {
                        consumed: true,
                        ..Response::ignored()
                    }
                }
                keys::PAUSE | keys::ESCAPE => {
                    self.state.toggle_pause();
                    log::info!("Paused at frame {}", self.state.frames);
                    Response {
                        consumed: true,
                        ..self.leave_play_loop(canvas)
                    }
                }
                _ => Response::ignored(),
            },
            (Awaiting::KeyPress, GameMode::Paused) => match code {
                keys::PAUSE | keys::ESCAPE => {
                    self.state.toggle_pause();
                    log::info!("Resumed");
                    Response {
                        consumed: true,
                        ..self.dispatch(canvas)
                    }
                }
                _ => Response::ignored(),
            },
            (Awaiting::KeyPress, GameMode::Ended) => {
                log::info!("Restarting after score {}", self.state.score);
                self.state.mode = GameMode::Reload;
                Response {
                    consumed: is_game_key(code),
                    ..self.dispatch(canvas)
                }
            }
            _ => Response::ignored(),
        }
    }

    /// Window lost focus: pause a running game
    pub fn on_blur(&mut self, canvas: &mut dyn Canvas) -> Response {
        if self.awaiting == Awaiting::Tick && self.state.mode == GameMode::Playing {
            self.state.toggle_pause();
            log::info!("Auto-paused (window blur)");
            return self.leave_play_loop(canvas);
        }
        Response::ignored()
    }
}

fn is_game_key(code: &str) -> bool {
    matches!(code, keys::ARROW_UP | keys::ARROW_DOWN | keys::PAUSE | keys::ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DisplayList, DrawCommand};
    use crate::sim::Obstacle;

    fn app() -> App {
        let settings = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        App::new(settings, Playfield::new(500, 500).unwrap(), 0).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = Settings {
            tick_hz: 0,
            ..Settings::default()
        };
        assert!(App::new(settings, Playfield::new(500, 500).unwrap(), 0).is_err());

        let settings = Settings {
            max_radius: 30.0,
            ..Settings::default()
        };
        let err = App::new(settings, Playfield::new(40, 500).unwrap(), 0).err();
        assert!(matches!(err, Some(ConfigError::PlayfieldTooSmall { min: 60, .. })));
    }

    #[test]
    fn test_start_enters_play_loop() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        assert_eq!(app.awaiting(), Awaiting::Nothing);
        assert_eq!(app.mode(), GameMode::Init);

        let response = app.start(&mut canvas);
        assert_eq!(response.timer, TimerCommand::Start { period_ms: 14 });
        assert_eq!(app.mode(), GameMode::Playing);
        assert_eq!(app.awaiting(), Awaiting::Tick);
        assert_eq!(app.state().seed, 7);
    }

    #[test]
    fn test_first_spawn_on_frame_fifty() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);
        for _ in 0..49 {
            app.on_tick(&mut canvas);
        }
        assert!(app.state().obstacles.is_empty());
        app.on_tick(&mut canvas);
        assert_eq!(app.state().frames, 50);
        assert_eq!(app.state().obstacles.len(), 1);
    }

    #[test]
    fn test_tick_renders_before_update() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);
        for _ in 0..50 {
            canvas.clear();
            app.on_tick(&mut canvas);
        }
        // Spawned during update, so not yet on this frame's picture
        assert_eq!(app.state().obstacles.len(), 1);
        assert_eq!(canvas.circle_count(), 0);
        canvas.clear();
        app.on_tick(&mut canvas);
        assert_eq!(canvas.circle_count(), 1);
    }

    #[test]
    fn test_arrow_keys_move_and_redraw() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);

        canvas.clear();
        let response = app.on_key("ArrowDown", &mut canvas);
        assert!(response.consumed);
        assert_eq!(response.timer, TimerCommand::Keep);
        assert_eq!(app.state().player.y(), 20.0);
        assert!(matches!(
            canvas.commands()[1],
            DrawCommand::Rect { y, .. } if y == 20.0
        ));

        let response = app.on_key("ArrowUp", &mut canvas);
        assert!(response.consumed);
        assert_eq!(app.state().player.y(), 0.0);

        canvas.clear();
        let response = app.on_key("KeyA", &mut canvas);
        assert!(!response.consumed);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_collision_stops_timer_and_shows_end_screen() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);

        let field = app.state.field;
        app.state.obstacles.push(Obstacle::new(1, 21.0, 10.0, 5.0, 10.0, field));

        let response = app.on_tick(&mut canvas);
        assert_eq!(response.timer, TimerCommand::Stop);
        assert_eq!(app.mode(), GameMode::Ended);
        assert_eq!(app.awaiting(), Awaiting::KeyPress);
        assert_eq!(
            canvas.texts().last().map(String::as_str),
            Some("You lost with 0 points")
        );

        // Late ticks change nothing
        let frames = app.state().frames;
        assert_eq!(app.on_tick(&mut canvas), Response::ignored());
        assert_eq!(app.state().frames, frames);
    }

    #[test]
    fn test_any_key_restarts_after_loss() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);
        let field = app.state.field;
        app.state.obstacles.push(Obstacle::new(1, 21.0, 10.0, 5.0, 10.0, field));
        app.state.score = 4;
        app.on_tick(&mut canvas);
        assert_eq!(app.mode(), GameMode::Ended);

        let response = app.on_key("KeyQ", &mut canvas);
        assert!(!response.consumed);
        assert_eq!(response.timer, TimerCommand::Start { period_ms: 14 });
        assert_eq!(app.mode(), GameMode::Playing);
        assert_eq!(app.awaiting(), Awaiting::Tick);
        assert_eq!(app.state().score, 0);
        assert!(app.state().obstacles.is_empty());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        app.start(&mut canvas);
        for _ in 0..10 {
            app.on_tick(&mut canvas);
        }

        let response = app.on_key("KeyP", &mut canvas);
        assert!(response.consumed);
        assert_eq!(response.timer, TimerCommand::Stop);
        assert_eq!(app.mode(), GameMode::Paused);

        // Movement is ignored while paused
        let response = app.on_key("ArrowDown", &mut canvas);
        assert!(!response.consumed);
        assert_eq!(app.state().player.y(), 0.0);
        app.on_tick(&mut canvas);
        assert_eq!(app.state().frames, 10);

        let response = app.on_key("Escape", &mut canvas);
        assert!(response.consumed);
        assert_eq!(response.timer, TimerCommand::Start { period_ms: 14 });
        assert_eq!(app.mode(), GameMode::Playing);
        app.on_tick(&mut canvas);
        assert_eq!(app.state().frames, 11);
    }

    #[test]
    fn test_blur_pauses_running_game_only() {
        let mut app = app();
        let mut canvas = DisplayList::default();
        assert_eq!(app.on_blur(&mut canvas), Response::ignored());

        app.start(&mut canvas);
        let response = app.on_blur(&mut canvas);
        assert_eq!(response.timer, TimerCommand::Stop);
        assert_eq!(app.mode(), GameMode::Paused);

        assert_eq!(app.on_blur(&mut canvas), Response::ignored());
    }
}
