use std::time::{Duration, Instant};

use tracing::debug;

use crate::calc_engine::{evaluate_traced, parse, EvalError, EvaluationTrace, Step};
use crate::cli::Config;
use crate::format::format_result;

#[derive(Clone)]
pub struct HistoryEntry {
    pub input: String,
    pub result: String,
}

/// What a single line of input amounted to.
pub enum Outcome {
    Empty,
    Quit,
    Help,
    History(Vec<(usize, HistoryEntry)>),
    Cleared,
    Evaluated {
        input: String,
        value: f64,
        formatted: String,
        steps: Vec<Step>,
        detailed_mode: bool,
        duration: Duration,
    },
    Failed {
        input: String,
        error: EvalError,
    },
}

/// Interactive state shared by the line REPL and the TUI: the configuration
/// plus the ordered history of successful calculations.
pub struct Session {
    config: Config,
    history: Vec<HistoryEntry>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            config,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn submit(&mut self, line: &str) -> Outcome {
        let input = line.trim();
        if input.is_empty() {
            return Outcome::Empty;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" => {
                debug!("quit requested");
                return Outcome::Quit;
            }
            "help" | "h" => return Outcome::Help,
            "history" => return Outcome::History(self.recent()),
            "clear" => {
                debug!(entries = self.history.len(), "history cleared");
                self.history.clear();
                return Outcome::Cleared;
            }
            _ => {}
        }

        let (detailed_mode, processed_input) = split_details(input);
        if processed_input.is_empty() {
            return Outcome::Failed {
                input: input.to_string(),
                error: EvalError::syntax("expected an expression after 'details'"),
            };
        }

        let start_time = Instant::now();
        let mut trace = EvaluationTrace::new(detailed_mode);
        let result = parse(processed_input).and_then(|expr| evaluate_traced(&expr, &mut trace));
        let duration = start_time.elapsed();

        match result {
            Ok(value) => {
                let formatted = format_result(value);
                debug!(input = processed_input, %formatted, ?duration, "evaluated");
                self.history.push(HistoryEntry {
                    input: processed_input.to_string(),
                    result: formatted.clone(),
                });
                Outcome::Evaluated {
                    input: processed_input.to_string(),
                    value,
                    formatted,
                    steps: trace.steps,
                    detailed_mode,
                    duration,
                }
            }
            Err(error) => {
                debug!(input = processed_input, kind = error.kind(), %error, "rejected");
                Outcome::Failed {
                    input: processed_input.to_string(),
                    error,
                }
            }
        }
    }

    // The last `history_limit` entries, numbered from 1.
    fn recent(&self) -> Vec<(usize, HistoryEntry)> {
        let skip = self.history.len().saturating_sub(self.config.history_limit);
        self.history[skip..]
            .iter()
            .enumerate()
            .map(|(i, entry)| (i + 1, entry.clone()))
            .collect()
    }
}

// "details 2 + 2" and "2 + 2 details" both ask for the step trace.
fn split_details(input: &str) -> (bool, &str) {
    const PREFIX: &str = "details ";
    const SUFFIX: &str = " details";

    if input.eq_ignore_ascii_case("details") {
        return (true, "");
    }
    if let Some(head) = input.get(..PREFIX.len()) {
        if head.eq_ignore_ascii_case(PREFIX) {
            return (true, input[PREFIX.len()..].trim());
        }
    }
    let split = input.len().saturating_sub(SUFFIX.len());
    if let Some(tail) = input.get(split..) {
        if tail.eq_ignore_ascii_case(SUFFIX) {
            return (true, input[..split].trim());
        }
    }
    (false, input)
}
