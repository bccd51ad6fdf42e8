mod app;
mod config;
mod event;
mod game;
mod logging;
mod ui;

use std::io;

use anyhow::{ensure, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use app::App;
use config::{parse_args, Settings, USAGE};
use event::TerminalInput;

fn main() -> Result<()> {
    logging::init()?;

    let settings = match parse_args(std::env::args_os()) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(%err, "rejected command line");
            println!("{}", USAGE);
            return Ok(());
        }
    };

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    let result = play(&mut terminal, &settings);

    let restored = restore(&mut terminal);

    let score = result?;
    restored?;
    info!(score, "game closed");
    Ok(())
}

/// Runs every teardown step, then reports the first one that failed.
fn restore(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

fn play(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, settings: &Settings) -> Result<u32> {
    let size = terminal.size().context("reading terminal size")?;
    ensure!(
        size.width > 0 && size.height > 0,
        "terminal has no room to play ({}x{})",
        size.width,
        size.height
    );

    let mut app = App::new(settings, size.height as usize, size.width as usize);
    let score = app.run(terminal, &mut TerminalInput)?;
    Ok(score)
}
