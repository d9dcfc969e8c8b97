use super::app::{App, LogEntry, Note};
use super::helpers::{format_with_spaces, highlight_functions, wrap_text};
use super::render_help::render_help;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => handle_mouse_event(app, event),
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char('c') | KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.insert_char(c);
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_at_cursor(),
        KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => app.move_cursor_by_words(-1),
        KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => app.move_cursor_by_words(1),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => {
            app.cursor_position = 0;
            app.input_scroll = 0;
        }
        KeyCode::End => app.cursor_position = app.input.chars().count(),
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    let scroll = if app.show_help {
        &mut app.help_scroll
    } else {
        &mut app.history_scroll
    };
    match event.kind {
        MouseEventKind::ScrollDown => *scroll = scroll.saturating_add(3),
        MouseEventKind::ScrollUp => *scroll = scroll.saturating_sub(3),
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    app.terminal_too_small = area.width < MIN_TERMINAL_WIDTH || area.height < MIN_TERMINAL_HEIGHT;
    if app.terminal_too_small {
        render_resize_message(frame, area);
        return;
    }

    let [input, status, log] = match Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)])
        .split(area)[..]
    {
        [input, status, log] => [input, status, log],
        _ => return,
    };

    render_input(frame, app, input);
    render_status(frame, status);
    render_log(frame, app, log);
    app.list_height = log.height as usize;
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::styled(
            format!(
                "Need at least {}x{}, have {}x{}",
                MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::styled("Enlarge the window to continue", Style::default().fg(Color::Yellow)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" safecalc ")
        .title_alignment(Alignment::Center);

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn note_style(note: &Note) -> (&str, Style) {
    match note {
        Note::Step(text) => (text.as_str(), Style::default().fg(Color::DarkGray)),
        Note::Timing(text) => (text.as_str(), Style::default().fg(Color::Magenta)),
        Note::Listing(text) => (text.as_str(), Style::default().fg(Color::Gray)),
    }
}

fn result_span(result: &Result<String, String>) -> Span<'static> {
    match result {
        Ok(value) => Span::styled(
            value.clone(),
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        ),
        Err(e) => Span::styled(
            format!("Error: {}", e),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Lines for one log block: the wrapped input (result on its first line)
/// followed by its notes, indented.
fn entry_lines(entry: &LogEntry, selected: bool, width: usize) -> Vec<Line<'static>> {
    let input_style = Style::default().fg(if selected { Color::Yellow } else { Color::Cyan });
    let mut lines = Vec::new();

    for (idx, chunk) in wrap_text(&format_with_spaces(&entry.input), width).into_iter().enumerate() {
        let lead = if idx == 0 {
            Span::styled("> ", Style::default().fg(Color::Green))
        } else {
            Span::raw("  ")
        };
        let mut spans = vec![lead];
        spans.extend(highlight_functions(&chunk, input_style));
        if let (0, Some(result)) = (idx, &entry.result) {
            spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
            spans.push(result_span(result));
        }
        lines.push(Line::from(spans));
    }

    for note in &entry.notes {
        let (text, style) = note_style(note);
        for (idx, chunk) in wrap_text(text, width).into_iter().enumerate() {
            let indent = if idx == 0 { "    - " } else { "      " };
            lines.push(Line::styled(format!("{}{}", indent, chunk), style));
        }
    }
    lines
}

fn render_log(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Log ({} in history) ", app.session.history().len()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.log.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing yet. Type an expression and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let width = inner.width.saturating_sub(6) as usize;
    let separator = Line::styled("-".repeat(inner.width as usize), Style::default().fg(Color::DarkGray));
    let mut items: Vec<ListItem> = Vec::new();
    app.item_start_indices.clear();

    for (i, entry) in app.log.iter().enumerate() {
        if i > 0 {
            items.push(ListItem::new(separator.clone()));
        }
        app.item_start_indices.push(items.len());
        items.extend(
            entry_lines(entry, i == app.cursor_history, width)
                .into_iter()
                .map(ListItem::new),
        );
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner.height as usize);
        app.scroll_to_bottom = false;
    }

    let mut state = ListState::default()
        .with_selected(app.item_start_indices.get(app.cursor_history).copied())
        .with_offset(app.history_scroll);
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, inner, &mut state);
}

const STATUS_KEYS: &[(&str, &str)] = &[
    ("Enter", "Calculate"),
    ("Up/Down", "Recall"),
    ("PgUp/PgDn", "Scroll"),
    ("F1", "Help"),
    ("Ctrl+U", "Clear Input"),
    ("Ctrl+C", "Quit"),
];

fn render_status(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::with_capacity(STATUS_KEYS.len() * 2);
    for (key, desc) in STATUS_KEYS {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// The field scrolls horizontally; `<` and `>` mark hidden text on either side.
fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    app.adjust_input_scroll(width);

    let shown: String = app.input.chars().skip(app.input_scroll).take(width).collect();
    let before_cursor: String = shown
        .chars()
        .take(app.cursor_position.saturating_sub(app.input_scroll))
        .collect();
    frame.render_widget(Paragraph::new(format!("> {}", shown)), inner);
    frame.set_cursor(inner.x + 2 + before_cursor.width() as u16, inner.y);

    let marker = Style::default().fg(Color::DarkGray);
    if app.input_scroll > 0 {
        frame.render_widget(Paragraph::new("<").style(marker), Rect { width: 1, height: 1, ..inner });
    }
    if app.input.chars().count() > app.input_scroll + width {
        let x = inner.right().saturating_sub(1);
        frame.render_widget(Paragraph::new(">").style(marker), Rect { x, width: 1, height: 1, ..inner });
    }
}
