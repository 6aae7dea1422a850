//! Terminal session
//!
//! Owns the raw-mode alternate screen for the lifetime of the TUI and polls
//! key presses with a bounded wait so the app loop keeps redrawing.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tracing::warn;

/// Raw-mode terminal with a redraw cadence
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Redraw at least this often while idle
    frame_interval: Duration,
    last_frame: Instant,
    active: bool,
}

impl Tui {
    pub fn new(frame_interval: Duration) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            frame_interval,
            last_frame: Instant::now(),
            active: false,
        })
    }

    /// Switch to raw mode and the alternate screen
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }

    /// Leave the alternate screen. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Wait until the next frame is due for a key press
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let wait = self
            .frame_interval
            .saturating_sub(self.last_frame.elapsed());

        let mut pressed = None;
        if event::poll(wait)? {
            // Release and repeat events arrive on some platforms
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    pressed = Some(key);
                }
            }
        }

        if self.last_frame.elapsed() >= self.frame_interval {
            self.last_frame = Instant::now();
        }
        Ok(pressed)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "terminal restore failed");
        }
    }
}
