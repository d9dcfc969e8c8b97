use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use crate::help;

const KEYS: &[&str] = &[
    "  ← → : Move cursor left/right",
    "  Ctrl+←/→ : Move cursor by words",
    "  Home/End : Move to start/end of line",
    "  ↑ ↓ : Recall previous inputs",
    "  PgUp/PgDn : Page through the log",
    "  Mouse wheel : Scroll the log",
    "  Ctrl+U : Clear current input",
    "  F1 / Esc : Open / close this help",
];

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" safecalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);

    let mut help_text = vec![
        Line::from(Span::styled(
            "safecalc - whitelist expression calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for section in help::sections() {
        help_text.push(Line::from(Span::styled(format!("{}:", section.title), heading)));
        help_text.extend(section.lines.into_iter().map(Line::from));
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(Span::styled("Navigation:", heading)));
    help_text.extend(KEYS.iter().map(|k| Line::from(*k)));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
