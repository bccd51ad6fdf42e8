use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::Settings;
use crate::event::Input;
use crate::game::{is_quit_key, Session, State, Tick};
use crate::ui;
use crate::ui::final_score::render_final_score;

pub const TICK_RATE: Duration = Duration::from_millis(100);
pub const HIT_BLINKS: usize = 5;
pub const BLINK_INTERVAL: Duration = Duration::from_millis(160);
pub const CLOSE_COUNTDOWN: u32 = 5;
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

pub struct App {
    session: Session,
}

impl App {
    pub fn new(settings: &Settings, height: usize, width: usize) -> Self {
        let seed = settings.seed_or_now();
        Self {
            session: Session::new(settings, height, width, seed),
        }
    }

    /// Plays one session to the end, final-score screen included, and
    /// returns the score.
    pub fn run<B: Backend, I: Input>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut I,
    ) -> io::Result<u32> {
        terminal.draw(|frame| ui::render_playfield(frame, &self.session))?;

        while self.session.state() == State::Running {
            if let Some(key) = input.poll_key()? {
                self.session.handle_key(key);
            }
            match self.session.tick() {
                Tick::Survived => {
                    terminal.draw(|frame| ui::render_playfield(frame, &self.session))?;
                    input.wait(TICK_RATE);
                }
                Tick::Crashed { column } => {
                    debug!(column, "hit animation");
                    self.blink(terminal, input)?;
                }
                Tick::Quit | Tick::Finished => {}
            }
        }

        self.close_countdown(terminal, input)?;
        Ok(self.session.score())
    }

    fn blink<B: Backend, I: Input>(
        &self,
        terminal: &mut Terminal<B>,
        input: &mut I,
    ) -> io::Result<()> {
        let half = BLINK_INTERVAL / 2;
        for _ in 0..HIT_BLINKS {
            for lit in [true, false] {
                terminal.draw(|frame| ui::render_hit(frame, &self.session, lit))?;
                input.wait(half);
            }
        }
        Ok(())
    }

    fn close_countdown<B: Backend, I: Input>(
        &self,
        terminal: &mut Terminal<B>,
        input: &mut I,
    ) -> io::Result<()> {
        let score = self.session.score();
        let mut remaining = CLOSE_COUNTDOWN;
        terminal.draw(|frame| render_final_score(frame, score, remaining))?;

        loop {
            if let Some(key) = input.poll_key()? {
                if is_quit_key(&key) {
                    info!(remaining, "final screen dismissed");
                    return Ok(());
                }
            }
            if remaining == 0 {
                return Ok(());
            }
            input.wait(COUNTDOWN_STEP);
            remaining -= 1;
            debug!(remaining, "closing countdown");
            terminal.draw(|frame| render_final_score(frame, score, remaining))?;
        }
    }

    #[cfg(test)]
    fn with_session(session: Session) -> Self {
        Self { session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    use crate::event::testing::ScriptedInput;
    use crate::game::obstacles::{ObstacleField, ObstacleRow};
    use crate::ui::final_score::closing_line;

    fn seeded() -> Settings {
        Settings {
            seed: Some(9),
            ..Settings::default()
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn quit_at_once_then_countdown_runs_out() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut input = ScriptedInput::new().press_at(0, KeyCode::Char('q'));
        let mut app = App::new(&seeded(), 20, 80);

        let score = app.run(&mut terminal, &mut input).unwrap();

        assert_eq!(score, 0);
        assert_eq!(input.waits, vec![COUNTDOWN_STEP; 5]);
        // One poll in play, then one per countdown value from 5 down to 0.
        assert_eq!(input.polls(), 1 + 6);
        let lines = screen(&terminal);
        assert_eq!(lines[0], "Your final score: 0");
        assert_eq!(lines[1], "Good luck next time!");
        assert_eq!(lines[2], closing_line(0));
    }

    #[test]
    fn quit_during_countdown_closes_early() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut input = ScriptedInput::new()
            .press_at(0, KeyCode::Char('q'))
            .press_at(3, KeyCode::Char('q'));
        let mut app = App::new(&seeded(), 20, 80);

        app.run(&mut terminal, &mut input).unwrap();

        assert_eq!(input.waits, vec![COUNTDOWN_STEP; 2]);
        assert_eq!(screen(&terminal)[2], closing_line(3));
    }

    #[test]
    fn other_keys_do_not_close_the_final_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut input = ScriptedInput::new()
            .press_at(0, KeyCode::Char('q'))
            .press_at(2, KeyCode::Left)
            .press_at(4, KeyCode::Char('x'));
        let mut app = App::new(&seeded(), 20, 80);

        app.run(&mut terminal, &mut input).unwrap();

        assert_eq!(input.waits.len(), 5);
    }

    #[test]
    fn survived_ticks_score_and_pace() {
        // Twenty rows take twenty ticks to reach the ship, so three ticks are safe.
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut input = ScriptedInput::new()
            .press_at(1, KeyCode::Left)
            .press_at(3, KeyCode::Char('q'));
        let mut app = App::new(&seeded(), 20, 80);

        let score = app.run(&mut terminal, &mut input).unwrap();

        assert_eq!(score, 3);
        assert_eq!(app.session.ship().position(), 39);
        assert_eq!(&input.waits[..3], &[TICK_RATE; 3]);
        assert_eq!(&input.waits[3..], &[COUNTDOWN_STEP; 5]);
        assert_eq!(screen(&terminal)[0], "Your final score: 3");
    }

    #[test]
    fn crash_blinks_before_the_final_screen() {
        let width = 10;
        let mut rows = vec![ObstacleRow::blank(width); 4];
        rows.push((0..width).map(|c| c == 5).collect::<Vec<_>>().into());
        let field = ObstacleField::with_rows('-', width, rows, 4);
        let session = Session::with_field(&seeded(), field, 5, width);
        let mut terminal = Terminal::new(TestBackend::new(80, 5)).unwrap();
        let mut input = ScriptedInput::new();
        let mut app = App::with_session(session);

        let score = app.run(&mut terminal, &mut input).unwrap();

        assert_eq!(score, 0);
        let blink_waits = &input.waits[..2 * HIT_BLINKS];
        assert!(blink_waits.iter().all(|d| *d == BLINK_INTERVAL / 2));
        assert_eq!(&input.waits[2 * HIT_BLINKS..], &[COUNTDOWN_STEP; 5]);
        assert_eq!(screen(&terminal)[0], "Your final score: 0");
    }
}
