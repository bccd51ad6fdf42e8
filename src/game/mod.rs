pub mod obstacles;
pub mod ship;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::config::Settings;
use crate::ui::Canvas;
use obstacles::ObstacleField;
use ship::Spaceship;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    GameOver,
}

/// What a single tick did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Survived,
    Crashed { column: usize },
    Quit,
    /// The session had already ended; nothing moved.
    Finished,
}

pub struct Session {
    ship: Spaceship,
    field: ObstacleField,
    score: u32,
    state: State,
    quit: bool,
    height: usize,
    width: usize,
}

impl Session {
    pub fn new(settings: &Settings, height: usize, width: usize, seed: u64) -> Self {
        info!(
            height,
            width,
            seed,
            obstacle = %settings.obstacle_symbol,
            ship = %settings.ship_symbol,
            "session started"
        );
        Self {
            ship: Spaceship::new(settings.ship_symbol, height, width),
            field: ObstacleField::new(settings.obstacle_symbol, height, width, seed),
            score: 0,
            state: State::Running,
            quit: false,
            height,
            width,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state != State::Running {
            return;
        }
        if is_quit_key(&key) {
            info!(score = self.score, "player quit");
            self.quit = true;
            self.state = State::GameOver;
            return;
        }
        match key.code {
            KeyCode::Left => self.ship.move_by(-1),
            KeyCode::Right => self.ship.move_by(1),
            _ => {}
        }
    }

    /// Scrolls the field and scores the tick unless the ship was hit.
    pub fn tick(&mut self) -> Tick {
        if self.quit {
            return Tick::Quit;
        }
        if self.state != State::Running {
            return Tick::Finished;
        }
        if self.field.advance_and_check_collision(&self.ship) {
            let column = self.ship.position();
            info!(score = self.score, column, "ship hit an obstacle");
            self.state = State::GameOver;
            return Tick::Crashed { column };
        }
        self.score += 1;
        Tick::Survived
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn ship(&self) -> &Spaceship {
        &self.ship
    }

    /// Paints field and ship onto a fresh canvas sized to the session grid.
    pub fn canvas(&self) -> Canvas {
        let mut canvas = Canvas::new(self.height, self.width);
        self.field.render(&mut canvas);
        self.ship.render(&mut canvas);
        canvas
    }

    #[cfg(test)]
    pub fn with_field(
        settings: &Settings,
        field: ObstacleField,
        height: usize,
        width: usize,
    ) -> Self {
        let mut session = Self::new(settings, height, width, 0);
        session.field = field;
        session
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
