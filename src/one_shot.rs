use std::io::{self, Write};

use tracing::debug;

use crate::calc_engine::evaluate_expression;
use crate::format::format_result;

pub const EXIT_OK: u8 = 0;
pub const EXIT_EVAL_ERROR: u8 = 1;
pub const EXIT_SELF_TEST_FAILED: u8 = 2;

/// Evaluates `expr` once, writing the result or `Error: ...` to `output`, and
/// returns the process exit status.
pub fn one_shot<W: Write>(expr: &str, output: &mut W) -> io::Result<u8> {
    match evaluate_expression(expr) {
        Ok(value) => {
            writeln!(output, "{}", format_result(value))?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            debug!(kind = e.kind(), "one-shot evaluation failed");
            writeln!(output, "Error: {}", e)?;
            Ok(EXIT_EVAL_ERROR)
        }
    }
}
