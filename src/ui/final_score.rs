use ratatui::prelude::*;
use ratatui::widgets::*;

pub fn final_score_line(score: u32) -> String {
    format!("Your final score: {}", score)
}

pub const FAREWELL: &str = "Good luck next time!";

pub fn closing_line(seconds: u32) -> String {
    let unit = if seconds == 1 { "second" } else { "seconds" };
    format!(
        "Press 'q' to exit or this window will automatically close in {} {}.",
        seconds, unit
    )
}

pub fn render_final_score(frame: &mut Frame, score: u32, seconds_left: u32) {
    let lines = vec![
        Line::from(Span::styled(
            final_score_line(score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            FAREWELL,
            Style::default().fg(Color::Rgb(80, 200, 255)),
        )),
        Line::from(Span::styled(
            closing_line(seconds_left),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        frame.area(),
    );
}
