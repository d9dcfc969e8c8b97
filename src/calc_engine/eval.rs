use super::ast::{Expr, UnaryOp};
use super::functions;
use super::EvalError;
use crate::format::format_result;

pub struct Step {
    pub operation: String,
    pub result: f64,
}

/// Records each reduction performed while walking a tree, for `details`.
pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

pub fn evaluate(expr: &Expr) -> Result<f64, EvalError> {
    evaluate_traced(expr, &mut EvaluationTrace::new(false))
}

pub fn evaluate_traced(expr: &Expr, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Constant(c) => {
            let value = c.value();
            trace.add_step(c.name().to_string(), value);
            Ok(value)
        }
        Expr::Unary(op, operand) => {
            let value = evaluate_traced(operand, trace)?;
            let result = match op {
                UnaryOp::Plus => value,
                UnaryOp::Minus => -value,
            };
            if matches!(op, UnaryOp::Minus) {
                trace.add_step(format!("-{}", format_result(value)), result);
            }
            Ok(result)
        }
        Expr::Binary(op, l, r) => {
            let left = evaluate_traced(l, trace)?;
            let right = evaluate_traced(r, trace)?;
            let result = functions::apply_binary(*op, left, right)?;
            trace.add_step(
                format!(
                    "{} {} {}",
                    format_result(left),
                    op.symbol(),
                    format_result(right)
                ),
                result,
            );
            Ok(result)
        }
        Expr::Call(function, args) => {
            let values = args
                .iter()
                .map(|arg| evaluate_traced(arg, trace))
                .collect::<Result<Vec<_>, _>>()?;
            let result = functions::call(*function, &values)?;

            let args_str = values
                .iter()
                .map(|v| format_result(*v))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::trace!(function = function.name(), args = %args_str, result, "call");
            trace.add_step(format!("{}({})", function.name(), args_str), result);
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::parse;

    fn eval(input: &str) -> Result<f64, EvalError> {
        evaluate(&parse(input)?)
    }

    #[test]
    fn precedence_and_grouping() -> Result<(), EvalError> {
        assert_eq!(eval("2 + 3 * 4")?, 14.0);
        assert_eq!(eval("(2 + 3) * 4")?, 20.0);
        assert_eq!(eval("-2**2")?, -4.0);
        assert_eq!(eval("2**3**2")?, 512.0);
        assert_eq!(eval("2**-1")?, 0.5);
        assert_eq!(eval("--3")?, 3.0);
        assert_eq!(eval("-3 + 7")?, 4.0);
        assert_eq!(eval("7 // 2 * 2 + 7 % 2")?, 7.0);
        Ok(())
    }

    #[test]
    fn errors_propagate_from_deep_inside() {
        assert_eq!(eval("1 + sqrt(4 / (2 - 2))"), Err(EvalError::DivisionByZero));
        assert!(matches!(eval("abs(sqrt(-1))"), Err(EvalError::Domain(_))));
        assert!(matches!(eval("inf - inf"), Err(EvalError::Domain(_))));
    }

    #[test]
    fn trace_records_reductions_in_order() -> Result<(), EvalError> {
        let expr = parse("sqrt(16) + 2 * 3")?;
        let mut trace = EvaluationTrace::new(true);
        assert_eq!(evaluate_traced(&expr, &mut trace)?, 10.0);
        let ops: Vec<&str> = trace.steps.iter().map(|s| s.operation.as_str()).collect();
        assert_eq!(ops, vec!["sqrt(16)", "2 * 3", "4 + 6"]);
        assert_eq!(trace.steps[2].result, 10.0);
        Ok(())
    }

    #[test]
    fn trace_off_records_nothing() -> Result<(), EvalError> {
        let mut trace = EvaluationTrace::new(false);
        evaluate_traced(&parse("pi * 2")?, &mut trace)?;
        assert!(trace.steps.is_empty());
        Ok(())
    }
}
