use crate::format::format_result;
use crate::session::{Outcome, Session};

/// Extra lines shown under a log entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    Step(String),
    Timing(String),
    Listing(String),
}

/// One block of the on-screen log. Unlike the session history this also keeps
/// failed inputs, step traces and `history` listings.
pub struct LogEntry {
    pub input: String,
    /// `None` for command output that has no value of its own.
    pub result: Option<Result<String, String>>,
    pub notes: Vec<Note>,
}

pub struct App {
    pub session: Session,
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub log: Vec<LogEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            log: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total_chars.saturating_sub(visible_width) {
            self.input_scroll = total_chars.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.input_scroll = 0;

        match self.session.submit(&line) {
            Outcome::Empty => {}
            Outcome::Quit => self.should_quit = true,
            Outcome::Help => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            Outcome::History(entries) => {
                let notes = if entries.is_empty() {
                    vec![Note::Listing("No calculation history yet.".to_string())]
                } else {
                    entries
                        .iter()
                        .map(|(i, entry)| Note::Listing(format!("{}. {} = {}", i, entry.input, entry.result)))
                        .collect()
                };
                self.push(LogEntry {
                    input: line.trim().to_string(),
                    result: None,
                    notes,
                });
            }
            Outcome::Cleared => {
                self.log.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
            }
            Outcome::Evaluated {
                input,
                formatted,
                steps,
                detailed_mode,
                duration,
                ..
            } => {
                let mut notes = Vec::new();
                if detailed_mode {
                    notes.extend(steps.iter().enumerate().map(|(i, step)| {
                        Note::Step(format!(
                            "Step {}: {} = {}",
                            i + 1,
                            step.operation,
                            format_result(step.result)
                        ))
                    }));
                    notes.push(Note::Timing(format!(
                        "Time: {:.6} ms",
                        duration.as_secs_f64() * 1000.0
                    )));
                }
                self.push(LogEntry {
                    input,
                    result: Some(Ok(formatted)),
                    notes,
                });
            }
            Outcome::Failed { input, error } => self.push(LogEntry {
                input,
                result: Some(Err(error.to_string())),
                notes: Vec::new(),
            }),
        }
    }

    fn push(&mut self, entry: LogEntry) {
        self.log.push(entry);
        self.cursor_history = self.log.len().saturating_sub(1);
        self.scroll_to_bottom = true;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete_at_cursor();
        }
    }

    pub fn delete_at_cursor(&mut self) {
        let byte_idx = char_index_to_byte_index(&self.input, self.cursor_position);
        if let Some(c) = self.input[byte_idx..].chars().next() {
            self.input.drain(byte_idx..byte_idx + c.len_utf8());
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let input_chars: Vec<char> = self.input.chars().collect();
        let mut pos = self.cursor_position;

        if direction < 0 {
            while pos > 0 && input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
            while pos > 0 && !input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
        } else {
            let len = input_chars.len();
            while pos < len && !input_chars[pos].is_whitespace() {
                pos += 1;
            }
            while pos < len && input_chars[pos].is_whitespace() {
                pos += 1;
            }
        }
        self.cursor_position = pos;
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.log.len().saturating_sub(1) {
            self.cursor_history += 1;
        }
        self.recall_selected();
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.log.len().saturating_sub(1));
        }
        self.recall_selected();
    }

    fn recall_selected(&mut self) {
        if let Some(entry) = self.log.get(self.cursor_history) {
            self.input = entry.input.clone();
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }
}

pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Config;

    fn app() -> App {
        App::new(Session::new(Config::default()))
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
        app.submit();
    }

    #[test]
    fn submit_logs_results_and_errors() {
        let mut app = app();
        type_line(&mut app, "2 + 3 * 4");
        type_line(&mut app, "sqrt(-1)");
        assert_eq!(app.log.len(), 2);
        assert_eq!(app.log[0].result, Some(Ok("14".to_string())));
        assert!(matches!(app.log[1].result, Some(Err(_))));
        assert_eq!(app.session.history().len(), 1);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_history, 1);
    }

    #[test]
    fn commands_drive_the_screen() {
        let mut app = app();
        type_line(&mut app, "1");
        type_line(&mut app, "help");
        assert!(app.show_help);
        type_line(&mut app, "clear");
        assert!(app.log.is_empty());
        type_line(&mut app, "quit");
        assert!(app.should_quit);
    }

    #[test]
    fn history_listing_respects_the_limit() {
        let mut app = App::new(Session::new(Config {
            history_limit: 2,
            ..Config::default()
        }));
        type_line(&mut app, "history");
        assert_eq!(
            app.log[0].notes,
            vec![Note::Listing("No calculation history yet.".to_string())]
        );
        type_line(&mut app, "1 + 1");
        type_line(&mut app, "2 * 3");
        type_line(&mut app, "10 - 1");
        type_line(&mut app, "History");
        let listing = &app.log[app.log.len() - 1];
        assert_eq!(listing.input, "History");
        assert_eq!(listing.result, None);
        assert_eq!(
            listing.notes,
            vec![
                Note::Listing("1. 2 * 3 = 6".to_string()),
                Note::Listing("2. 10 - 1 = 9".to_string()),
            ]
        );
    }

    #[test]
    fn details_adds_step_notes() {
        let mut app = app();
        type_line(&mut app, "details 2 * 3 + 1");
        let notes = &app.log[0].notes;
        assert_eq!(notes[0], Note::Step("Step 1: 2 * 3 = 6".to_string()));
        assert_eq!(notes[1], Note::Step("Step 2: 6 + 1 = 7".to_string()));
        assert!(matches!(notes[2], Note::Timing(_)));
        type_line(&mut app, "2 * 3 + 1");
        assert!(app.log[1].notes.is_empty());
    }

    #[test]
    fn editing_handles_multibyte_input() {
        let mut app = app();
        for c in "2π".chars() {
            app.insert_char(c);
        }
        app.move_cursor(-1);
        app.delete_at_cursor();
        assert_eq!(app.input, "2");
        app.backspace();
        assert_eq!(app.input, "");
        app.backspace();
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn history_navigation_recalls_inputs() {
        let mut app = app();
        type_line(&mut app, "1 + 1");
        type_line(&mut app, "2 + 2");
        app.navigate_history(-1);
        assert_eq!(app.input, "1 + 1");
        app.navigate_history(1);
        assert_eq!(app.input, "2 + 2");
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn word_jumps() {
        let mut app = app();
        for c in "12 + 34".chars() {
            app.insert_char(c);
        }
        app.move_cursor_by_words(-1);
        assert_eq!(app.cursor_position, 5);
        app.move_cursor_by_words(-1);
        assert_eq!(app.cursor_position, 3);
        app.move_cursor_by_words(1);
        assert_eq!(app.cursor_position, 5);
    }
}
