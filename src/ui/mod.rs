pub mod final_score;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::Session;

/// A fixed grid of styled cells addressed by (row, column), flushed to the
/// frame as one paragraph.
pub struct Canvas {
    cells: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            cells: vec![vec![(' ', Style::default()); width]; height],
        }
    }

    /// Writes one cell; anything off the grid is dropped.
    pub fn put(&mut self, row: usize, column: usize, ch: char, style: Style) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = (ch, style);
        }
    }

    pub fn text(&mut self, row: usize, column: usize, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.put(row, column + i, ch, style);
        }
    }

    #[cfg(test)]
    pub fn symbol(&self, row: usize, column: usize) -> Option<char> {
        self.cells.get(row)?.get(column).map(|(ch, _)| *ch)
    }

    #[cfg(test)]
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().map(|(ch, _)| *ch).collect()
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

pub fn score_line(score: u32) -> String {
    format!("Score: {}", score)
}

fn draw(frame: &mut Frame, canvas: Canvas) {
    frame.render_widget(Paragraph::new(canvas.into_lines()), frame.area());
}

fn score_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Field, ship and the score header drawn over the top row.
pub fn render_playfield(frame: &mut Frame, session: &Session) {
    let mut canvas = session.canvas();
    canvas.text(0, 0, &score_line(session.score()), score_style());
    draw(frame, canvas);
}

/// One frame of the hit animation: the ship shown lit or dark over the field.
pub fn render_hit(frame: &mut Frame, session: &Session, lit: bool) {
    let mut canvas = session.canvas();
    session.ship().render_hit(&mut canvas, lit);
    canvas.text(0, 0, &score_line(session.score()), score_style());
    draw(frame, canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    use crate::config::Settings;

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn text_is_clipped_to_the_grid() {
        let mut canvas = Canvas::new(2, 5);
        canvas.text(0, 2, "Score: 9", Style::default());
        canvas.put(7, 7, 'x', Style::default());
        assert_eq!(canvas.row_text(0), "  Sco");
        assert_eq!(canvas.row_text(1), "     ");
    }

    #[test]
    fn playfield_has_score_header_and_ship() {
        let settings = Settings {
            ship_symbol: '@',
            ..Settings::default()
        };
        let mut session = Session::new(&settings, 5, 20, 3);
        session.tick();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| render_playfield(frame, &session))
            .unwrap();
        assert!(row(&terminal, 0).starts_with("Score: 1"));
        assert_eq!(&row(&terminal, 4)[10..11], "@");
    }

    #[test]
    fn hit_frames_toggle_the_ship() {
        let session = Session::new(&Settings::default(), 4, 12, 3);
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        terminal
            .draw(|frame| render_hit(frame, &session, true))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(6, 3)].symbol(), "*");
        terminal
            .draw(|frame| render_hit(frame, &session, false))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(6, 3)].symbol(), " ");
    }
}
