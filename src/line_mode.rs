use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::help;
use crate::session::{Outcome, Session};

pub fn run_line(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(session, stdin.lock(), stdout.lock())
}

/// Reads lines from `input` until `quit`/`exit` or end of input, writing
/// prompts, results and errors to `output`.
pub fn run_with<R: BufRead, W: Write>(session: &mut Session, mut input: R, mut output: W) -> Result<()> {
    info!("line REPL started");
    writeln!(output, "Safe Calculator REPL: operators, math functions, constants and history.")?;
    writeln!(output, "Type 'help' for commands, 'quit' or 'exit' to leave.")?;

    let mut buf = Vec::new();
    loop {
        write!(output, "{}", session.config().prompt)?;
        output.flush()?;

        buf.clear();
        let read = input.read_until(b'\n', &mut buf).context("failed to read input")?;
        if read == 0 {
            writeln!(output)?;
            break;
        }

        // invalid bytes become U+FFFD and fail as an unexpected character
        let line = String::from_utf8_lossy(&buf);
        let outcome = session.submit(&line);
        if let Outcome::Quit = outcome {
            break;
        }
        write_outcome(&mut output, &outcome)?;
    }

    info!(entries = session.history().len(), "line REPL finished");
    output.flush()?;
    Ok(())
}

pub fn write_outcome<W: Write>(output: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Empty | Outcome::Quit => Ok(()),
        Outcome::Help => write!(output, "{}", help::render_plain()),
        Outcome::History(entries) if entries.is_empty() => {
            writeln!(output, "No calculation history yet.")
        }
        Outcome::History(entries) => {
            writeln!(output, "\n=== Calculation History ===")?;
            for (i, entry) in entries {
                writeln!(output, "{:2}. {} = {}", i, entry.input, entry.result)?;
            }
            writeln!(output, "===========================")
        }
        Outcome::Cleared => writeln!(output, "History cleared."),
        Outcome::Evaluated {
            formatted,
            steps,
            detailed_mode,
            duration,
            ..
        } => {
            writeln!(output, "{}", formatted)?;
            if *detailed_mode {
                for (i, step) in steps.iter().enumerate() {
                    writeln!(
                        output,
                        "  Step {}: {} = {}",
                        i + 1,
                        step.operation,
                        crate::format::format_result(step.result)
                    )?;
                }
                writeln!(output, "  Time: {:.6} ms", duration.as_secs_f64() * 1000.0)?;
            }
            Ok(())
        }
        Outcome::Failed { error, .. } => writeln!(output, "Error: {}", error),
    }
}
