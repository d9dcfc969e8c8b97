//! The whitelisted math functions and the arithmetic operators.
//!
//! Float semantics follow the usual scripting-language conventions: `%` and
//! `//` floor towards negative infinity, `0 ** -1` is a division by zero and
//! an overflowing result from finite inputs is reported instead of silently
//! becoming infinity.

use super::ast::{BinaryOp, Function};
use super::EvalError;

pub fn apply_binary(op: BinaryOp, l: f64, r: f64) -> Result<f64, EvalError> {
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            l / r
        }
        BinaryOp::Mod => {
            if r == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            floor_mod(l, r)
        }
        BinaryOp::FloorDiv => {
            if r == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            floor_div(l, r)
        }
        BinaryOp::Pow => power(l, r)?,
    };

    if result.is_nan() {
        return Err(EvalError::domain(format!(
            "{} {} {} is undefined",
            l,
            op.symbol(),
            r
        )));
    }
    Ok(result)
}

fn floor_mod(l: f64, r: f64) -> f64 {
    let m = l % r;
    if m != 0.0 {
        if (r < 0.0) != (m < 0.0) {
            m + r
        } else {
            m
        }
    } else {
        0.0_f64.copysign(r)
    }
}

fn floor_div(l: f64, r: f64) -> f64 {
    let m = l % r;
    let mut div = (l - m) / r;
    if m != 0.0 && (r < 0.0) != (m < 0.0) {
        div -= 1.0;
    }
    if div != 0.0 {
        let floored = div.floor();
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(l / r)
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(EvalError::domain(
            "negative number cannot be raised to a fractional power",
        ));
    }
    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(EvalError::domain("result too large"));
    }
    Ok(result)
}

/// Calls `function` with already-evaluated arguments. Arity was checked by
/// the parser; a mismatch here is still reported rather than panicking.
pub fn call(function: Function, args: &[f64]) -> Result<f64, EvalError> {
    let (min, max) = function.arity();
    if args.len() < min || args.len() > max {
        return Err(EvalError::Arity {
            function: function.name(),
            expected: if min == max { "1" } else { "1 or 2" },
            got: args.len(),
        });
    }
    let x = args[0];
    let name = function.name();

    let result = match function {
        Function::Sqrt => {
            if x < 0.0 {
                return Err(domain(name, "argument must be non-negative"));
            }
            x.sqrt()
        }
        Function::Sin | Function::Cos | Function::Tan => {
            if x.is_infinite() {
                return Err(domain(name, "argument must be finite"));
            }
            match function {
                Function::Sin => x.sin(),
                Function::Cos => x.cos(),
                _ => x.tan(),
            }
        }
        Function::Asin | Function::Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(domain(name, "argument must be in [-1, 1]"));
            }
            if function == Function::Asin {
                x.asin()
            } else {
                x.acos()
            }
        }
        Function::Atan => x.atan(),
        Function::Sinh => overflow_checked(name, x, x.sinh())?,
        Function::Cosh => overflow_checked(name, x, x.cosh())?,
        Function::Tanh => x.tanh(),
        Function::Exp => overflow_checked(name, x, x.exp())?,
        Function::Log => {
            if x <= 0.0 {
                return Err(domain(name, "argument must be positive"));
            }
            match args.get(1) {
                None => x.ln(),
                Some(&base) => {
                    if base <= 0.0 {
                        return Err(domain(name, "base must be positive"));
                    }
                    if base == 1.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    x.ln() / base.ln()
                }
            }
        }
        Function::Log10 => {
            if x <= 0.0 {
                return Err(domain(name, "argument must be positive"));
            }
            x.log10()
        }
        Function::Abs => x.abs(),
        Function::Ceil | Function::Floor => {
            if !x.is_finite() {
                return Err(domain(name, "cannot convert infinity to an integer"));
            }
            if function == Function::Ceil {
                x.ceil()
            } else {
                x.floor()
            }
        }
        Function::Round => match args.get(1) {
            None => {
                if !x.is_finite() {
                    return Err(domain(name, "cannot convert infinity to an integer"));
                }
                x.round_ties_even()
            }
            Some(&ndigits) => round_to(x, ndigits)?,
        },
        Function::Degrees => x.to_degrees(),
        Function::Radians => x.to_radians(),
    };

    if result.is_nan() {
        return Err(domain(name, "result is undefined"));
    }
    Ok(result)
}

fn domain(function: &str, msg: &str) -> EvalError {
    EvalError::domain(format!("{}: {}", function, msg))
}

fn overflow_checked(function: &str, x: f64, result: f64) -> Result<f64, EvalError> {
    if result.is_infinite() && x.is_finite() {
        Err(domain(function, "result too large"))
    } else {
        Ok(result)
    }
}

fn round_to(x: f64, ndigits: f64) -> Result<f64, EvalError> {
    if ndigits.fract() != 0.0 || !ndigits.is_finite() {
        return Err(domain("round", "ndigits must be an integer"));
    }
    if !x.is_finite() || ndigits > 308.0 {
        return Ok(x);
    }
    if ndigits < -308.0 {
        return Ok(0.0_f64.copysign(x));
    }
    let scale = 10f64.powi(ndigits.abs() as i32);
    if ndigits >= 0.0 {
        let scaled = x * scale;
        if scaled.is_infinite() {
            return Ok(x);
        }
        Ok(scaled.round_ties_even() / scale)
    } else {
        Ok((x / scale).round_ties_even() * scale)
    }
}
