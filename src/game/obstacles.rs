use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::prelude::*;
use tracing::trace;

use crate::game::ship::Spaceship;
use crate::ui::Canvas;

/// Chance that any single cell of a fresh row holds an obstacle.
pub const OBSTACLE_CHANCE: f64 = 0.13;

#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleRow {
    cells: Vec<bool>,
}

impl ObstacleRow {
    #[cfg(test)]
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![false; width],
        }
    }

    pub fn is_blocked(&self, column: usize) -> bool {
        self.cells.get(column).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

#[cfg(test)]
impl From<Vec<bool>> for ObstacleRow {
    fn from(cells: Vec<bool>) -> Self {
        Self { cells }
    }
}

/// Rows of obstacles falling towards the ship, oldest (lowest on screen) first.
pub struct ObstacleField {
    symbol: char,
    height: usize,
    width: usize,
    rows: VecDeque<ObstacleRow>,
    // Columns blocked on the ship's row; all clear until the first row lands there.
    mask: Vec<bool>,
    rng: StdRng,
}

impl ObstacleField {
    pub fn new(symbol: char, height: usize, width: usize, seed: u64) -> Self {
        Self {
            symbol,
            height,
            width,
            rows: VecDeque::with_capacity(height),
            mask: vec![false; width],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate_row(&mut self) -> ObstacleRow {
        let cells = (0..self.width)
            .map(|_| self.rng.gen_bool(OBSTACLE_CHANCE))
            .collect();
        ObstacleRow { cells }
    }

    /// Scrolls every row down by one and feeds a new row in at the top.
    pub fn advance(&mut self) {
        if self.rows.len() >= self.height {
            self.rows.pop_front();
        }
        let row = self.generate_row();
        self.rows.push_back(row);
        self.refresh_mask();
    }

    fn refresh_mask(&mut self) {
        match self.rows.front() {
            Some(row) if self.rows.len() >= self.height => self.mask.clone_from(&row.cells),
            _ => self.mask.fill(false),
        }
    }

    pub fn check_collision(&self, position: usize) -> bool {
        self.mask.get(position).copied().unwrap_or(false)
    }

    /// Tests the ship against the row it sits on, scrolls, then tests against
    /// the row that scrolled onto it.
    pub fn advance_and_check_collision(&mut self, ship: &Spaceship) -> bool {
        if self.check_collision(ship.position()) {
            return true;
        }
        self.advance();
        let hit = self.check_collision(ship.position());
        trace!(rows = self.rows.len(), column = ship.position(), hit, "field advanced");
        hit
    }

    pub fn render(&self, canvas: &mut Canvas) {
        let style = Style::default().fg(Color::Rgb(220, 80, 80));
        let count = self.rows.len();
        for (i, row) in self.rows.iter().enumerate() {
            let screen_row = count - 1 - i;
            for column in 0..row.cells.len() {
                let ch = if row.is_blocked(column) { self.symbol } else { ' ' };
                canvas.put(screen_row, column, ch, style);
            }
        }
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Builds a field from rows given top of screen first.
    #[cfg(test)]
    pub fn with_rows(
        symbol: char,
        width: usize,
        rows_top_down: Vec<ObstacleRow>,
        seed: u64,
    ) -> Self {
        let height = rows_top_down.len();
        let mut field = Self::new(symbol, height, width, seed);
        field.rows = rows_top_down.into_iter().rev().collect();
        field.refresh_mask();
        field
    }
}
