//! Terminal User Interface (TUI) for WMI Explorer
//!
//! Three-pane terminal browser (namespaces, classes, properties) built on
//! ratatui, sharing the browse state with the GUI.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::Backend, Terminal};
use std::io;

mod app;
mod ui;

pub use app::{App, Pane};

use crate::provider::Provider;

/// Run the TUI application
pub fn run<P: Provider>(provider: P) -> Result<(), Box<dyn std::error::Error>> {
    // Load before touching the terminal so a slow provider shows nothing odd
    let mut app = App::new(provider);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main application loop. Redraws after every input event; provider calls
/// triggered by a key block until they return.
fn run_app<B: Backend, P: Provider>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        // Any key dismisses the error popup
        if app.error.is_some() {
            app.dismiss_error();
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab | KeyCode::Right => app.next_pane(),
            KeyCode::BackTab | KeyCode::Left => app.previous_pane(),
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Home => app.move_to_top(),
            KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
            KeyCode::Char('r') | KeyCode::F(5) => app.reload(),
            _ => {}
        }
    }
}
