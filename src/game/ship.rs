use ratatui::prelude::*;

use crate::ui::Canvas;

pub struct Spaceship {
    position: usize,
    symbol: char,
    width: usize,
    row: usize,
}

impl Spaceship {
    /// Places the ship in the middle of the bottom row of a `height` x `width` grid.
    pub fn new(symbol: char, height: usize, width: usize) -> Self {
        Self {
            position: width / 2,
            symbol,
            width,
            row: height.saturating_sub(1),
        }
    }

    /// Moves by `delta` columns. A move that would leave the grid is dropped
    /// entirely, the ship does not slide up to the edge.
    pub fn move_by(&mut self, delta: isize) {
        let Some(target) = self.position.checked_add_signed(delta) else {
            return;
        };
        if target >= self.width {
            return;
        }
        self.position = target;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn render(&self, canvas: &mut Canvas) {
        canvas.put(
            self.row,
            self.position,
            self.symbol,
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        );
    }

    /// Draws the ship in its hit state. `lit` alternates between frames of the blink.
    pub fn render_hit(&self, canvas: &mut Canvas, lit: bool) {
        let (ch, style) = if lit {
            (
                self.symbol,
                Style::default()
                    .fg(Color::Rgb(255, 80, 80))
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )
        } else {
            (' ', Style::default())
        };
        canvas.put(self.row, self.position, ch, style);
    }
}
