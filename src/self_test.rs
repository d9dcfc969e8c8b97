use std::io::{self, Write};

use tracing::{info, warn};

use crate::calc_engine::evaluate_expression;
use crate::format::format_result;
use crate::one_shot::{EXIT_OK, EXIT_SELF_TEST_FAILED};

const TOLERANCE: f64 = 1e-9;

pub const CASES: &[(&str, f64)] = &[
    // basic arithmetic
    ("1+2*3", 7.0),
    ("(1+2)*3", 9.0),
    ("2**3**1", 8.0),
    ("4/2", 2.0),
    ("5%2", 1.0),
    ("-3 + 7", 4.0),
    ("9//2", 4.0),
    // functions
    ("sqrt(16)", 4.0),
    ("sin(0)", 0.0),
    ("abs(-5)", 5.0),
    ("ceil(3.2)", 4.0),
    ("floor(3.8)", 3.0),
    ("round(3.7)", 4.0),
    // constants
    ("pi/pi", 1.0),
    ("e/e", 1.0),
    ("log10(100)", 2.0),
    ("exp(0)", 1.0),
    ("degrees(pi)", 180.0),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub passed: usize,
    pub failed: usize,
}

impl Report {
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.success() {
            EXIT_OK
        } else {
            EXIT_SELF_TEST_FAILED
        }
    }
}

pub fn run_self_tests() -> io::Result<Report> {
    run_cases(CASES, &mut io::stdout().lock())
}

/// Evaluates each case, printing one OK/FAIL line per case and a summary.
pub fn run_cases<W: Write>(cases: &[(&str, f64)], output: &mut W) -> io::Result<Report> {
    let mut report = Report::default();

    for &(expr, expected) in cases {
        match evaluate_expression(expr) {
            Ok(got) if (got - expected).abs() <= TOLERANCE => {
                report.passed += 1;
                writeln!(output, "OK:   {} = {}", expr, format_result(got))?;
            }
            Ok(got) => {
                report.failed += 1;
                warn!(expr, got, expected, "self-test mismatch");
                writeln!(
                    output,
                    "FAIL: {} = {} (expected {})",
                    expr,
                    format_result(got),
                    format_result(expected)
                )?;
            }
            Err(e) => {
                report.failed += 1;
                warn!(expr, error = %e, "self-test raised");
                writeln!(output, "FAIL: {} -> raised {}: {}", expr, e.kind(), e)?;
            }
        }
    }

    info!(passed = report.passed, failed = report.failed, "self-tests finished");
    writeln!(output, "{} passed, {} failed", report.passed, report.failed)?;
    writeln!(
        output,
        "{}",
        if report.success() {
            "All tests passed."
        } else {
            "Some tests failed."
        }
    )?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_cases_pass() -> io::Result<()> {
        let mut out = Vec::new();
        let report = run_cases(CASES, &mut out)?;
        assert_eq!(report, Report { passed: CASES.len(), failed: 0 });
        assert_eq!(report.exit_code(), 0);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("OK:   degrees(pi) = 180\n"));
        assert!(text.ends_with("All tests passed.\n"));
        Ok(())
    }

    #[test]
    fn failures_are_counted() -> io::Result<()> {
        let mut out = Vec::new();
        let report = run_cases(&[("1+1", 3.0), ("1/0", 0.0), ("2*2", 4.0)], &mut out)?;
        assert_eq!(report, Report { passed: 1, failed: 2 });
        assert!(!report.success());
        assert_eq!(report.exit_code(), 2);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("FAIL: 1+1 = 2 (expected 3)"));
        assert!(text.contains("FAIL: 1/0 -> raised DivisionByZero: Division by zero"));
        assert!(text.contains("1 passed, 2 failed"));
        assert!(text.ends_with("Some tests failed.\n"));
        Ok(())
    }
}
