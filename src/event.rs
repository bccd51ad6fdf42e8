use std::io;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Where the game loop gets key presses and how it waits between frames.
pub trait Input {
    /// Returns the next pending key press, if any, without blocking.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Blocks for a fixed duration.
    fn wait(&mut self, duration: Duration);
}

pub struct TerminalInput;

impl Input for TerminalInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // Drain non-key events (resize, focus, releases) until a press or nothing is left.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
