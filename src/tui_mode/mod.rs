pub mod app;
mod helpers;
mod render_help;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    cursor::{SetCursorStyle, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::session::Session;

pub fn run_tui(session: Session) -> Result<()> {
    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let mut app = App::new(session);

    info!("TUI started");
    let result = ui::run_ui_loop(&mut terminal, &mut app);

    // restore even when the loop failed
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::BlinkingBar
    )?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(Into::into)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        Show,
        SetCursorStyle::DefaultUserShape
    )?;
    Ok(())
}
