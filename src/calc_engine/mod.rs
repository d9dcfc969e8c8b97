//! Whitelist expression evaluator.
//!
//! Input is tokenized, parsed into an [`Expr`] tree that can only name the
//! operators, functions and constants defined in [`ast`], then walked to a
//! single `f64`. Anything outside the whitelist is rejected while parsing,
//! before a single operation runs.

mod ast;
mod error;
mod eval;
mod functions;
mod parser;
mod tokens;

pub use ast::{BinaryOp, Constant, Expr, Function, UnaryOp};
pub use error::EvalError;
pub use eval::{evaluate, evaluate_traced, EvaluationTrace, Step};
pub use parser::{parse, Parser};
pub use tokens::{tokenize, Operator, Token};

/// Parses and evaluates `input` in one go.
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    let expr = parse(input)?;
    let value = evaluate(&expr)?;
    tracing::debug!(input, value, "evaluated");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() -> Result<(), EvalError> {
        assert_eq!(evaluate_expression("2 + 3 * 4")?, 14.0);
        assert_eq!(evaluate_expression("sqrt(16)")?, 4.0);
        assert_eq!(evaluate_expression("10 / 0"), Err(EvalError::DivisionByZero));
        assert!(matches!(
            evaluate_expression("sqrt(-1)"),
            Err(EvalError::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn long_sums_are_bounded() {
        let sum = vec!["1"; 200_000].join("+");
        assert!(matches!(evaluate_expression(&sum), Err(EvalError::Syntax(_))));
        assert_eq!(evaluate_expression(&vec!["1"; 2000].join("+")), Ok(2000.0));
    }

    #[test]
    fn disallowed_constructs_never_evaluate() {
        let syntax = [
            "__import__('os').system('ls')",
            "import os",
            "math.sqrt(4)",
            "(1).real",
            "[1, 2]",
            "x = 3",
            "lambda: 0",
            "1 if 1 else 2",
            "2 == 2",
            "'a' * 3",
            "open('/etc/passwd')",
            "sqrt",
        ];
        for input in syntax {
            assert!(
                matches!(evaluate_expression(input), Err(EvalError::Syntax(_))),
                "{:?} -> {:?}",
                input,
                evaluate_expression(input)
            );
        }

        let unknown = ["x", "globals()", "exec(1)", "eval(2 + 2)", "pi(1)", "nan"];
        for input in unknown {
            assert!(
                matches!(
                    evaluate_expression(input),
                    Err(EvalError::UnknownIdentifier { .. })
                ),
                "{:?} -> {:?}",
                input,
                evaluate_expression(input)
            );
        }
    }

    #[test]
    fn constants() -> Result<(), EvalError> {
        assert_eq!(evaluate_expression("pi")?, std::f64::consts::PI);
        assert_eq!(evaluate_expression("tau / pi")?, 2.0);
        assert_eq!(evaluate_expression("e / e")?, 1.0);
        assert_eq!(evaluate_expression("-inf")?, f64::NEG_INFINITY);
        Ok(())
    }
}
