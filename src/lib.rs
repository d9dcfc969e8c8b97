//! safecalc: a calculator that only evaluates whitelisted arithmetic.
//!
//! The binary offers a one-shot mode (`--expr`), a line REPL, a full-screen
//! TUI and a self-test mode; all of them go through [`calc_engine`].

pub mod calc_engine;
pub mod cli;
pub mod format;
pub mod help;
pub mod line_mode;
pub mod one_shot;
pub mod self_test;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui_mode;

pub use calc_engine::{evaluate_expression, EvalError};
pub use format::format_result;
