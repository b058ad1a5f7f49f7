//! Headless host
//!
//! Runs the app without a window: ticks are driven by a loop instead of a
//! timer, frames land in a `DisplayList`, and the autopilot plays.

use crate::app::{App, Awaiting, TimerCommand};
use crate::error::ConfigError;
use crate::keys;
use crate::renderer::DisplayList;
use crate::settings::Settings;
use crate::sim::{GameMode, Move, Playfield, autopilot};

/// How a headless run went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Ticks delivered to the app
    pub ticks: u64,
    pub score: u64,
    pub ended: bool,
}

/// Play one game with the autopilot, for at most `max_ticks` ticks
pub fn run(
    settings: Settings,
    width: u32,
    height: u32,
    seed: u64,
    max_ticks: u64,
) -> Result<RunReport, ConfigError> {
    let field = Playfield::new(width, height)?;
    let mut app = App::new(settings, field, seed)?;
    let mut canvas = DisplayList::default();

    let mut timer_on = matches!(app.start(&mut canvas).timer, TimerCommand::Start { .. });
    let mut ticks = 0;

    while timer_on && ticks < max_ticks {
        if app.awaiting() == Awaiting::Tick {
            if let Some(mv) = autopilot::suggest(app.state()) {
                let code = match mv {
                    Move::Up => keys::ARROW_UP,
                    Move::Down => keys::ARROW_DOWN,
                };
                app.on_key(code, &mut canvas);
            }
        }

        canvas.clear();
        let response = app.on_tick(&mut canvas);
        ticks += 1;
        if response.timer == TimerCommand::Stop {
            timer_on = false;
        }
    }

    let ended = app.mode() == GameMode::Ended;
    log::info!(
        "Headless run finished after {} ticks ({} frames drawn): score {}{}",
        ticks,
        canvas.frames(),
        app.state().score,
        if ended { " (hit)" } else { "" }
    );

    Ok(RunReport {
        ticks,
        score: app.state().score,
        ended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_respects_tick_cap() {
        let report = run(Settings::default(), 500, 500, 1, 10).unwrap();
        assert_eq!(report.ticks, 10);
        assert!(!report.ended);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_run_is_deterministic() {
        let a = run(Settings::default(), 640, 480, 77, 2000).unwrap();
        let b = run(Settings::default(), 640, 480, 77, 2000).unwrap();
        assert_eq!(a, b);
        assert!(a.ticks <= 2000);
        if !a.ended {
            assert_eq!(a.ticks, 2000);
        }
    }

    #[test]
    fn test_run_rejects_empty_playfield() {
        assert!(matches!(
            run(Settings::default(), 0, 0, 1, 10),
            Err(ConfigError::EmptyPlayfield { .. })
        ));
    }
}
