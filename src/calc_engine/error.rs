use thiserror::Error;

/// Everything that can go wrong between reading an expression and producing a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Unparsable input, or a construct the grammar does not admit.
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// Invalid input to a math function, or an undefined result.
    #[error("Math domain error: {0}")]
    Domain(String),

    /// A name that is neither a known constant nor a known function.
    #[error("{}", unknown_message(.name, .called))]
    UnknownIdentifier { name: String, called: bool },

    #[error("{function}() takes {expected} argument(s), got {got}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        got: usize,
    },
}

impl EvalError {
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        EvalError::Syntax(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        EvalError::Domain(msg.into())
    }

    /// Short category label, used by the self-test report and the TUI.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Syntax(_) => "SyntaxError",
            EvalError::DivisionByZero => "DivisionByZero",
            EvalError::Domain(_) => "DomainError",
            EvalError::UnknownIdentifier { .. } => "UnknownFunctionOrName",
            EvalError::Arity { .. } => "ArityError",
        }
    }
}

fn unknown_message(name: &str, called: &bool) -> String {
    if *called {
        format!(
            "Unknown function '{}'; allowed: {}",
            name,
            super::Function::names().join(", ")
        )
    } else {
        format!("Undefined name '{}'", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_single_line() {
        let errors = [
            EvalError::syntax("unexpected ')'"),
            EvalError::DivisionByZero,
            EvalError::domain("sqrt of a negative number"),
            EvalError::UnknownIdentifier { name: "x".into(), called: false },
            EvalError::UnknownIdentifier { name: "system".into(), called: true },
            EvalError::Arity { function: "sqrt", expected: "1", got: 2 },
        ];
        for e in &errors {
            assert!(!e.to_string().contains('\n'), "{:?}", e);
        }
    }

    #[test]
    fn unknown_function_lists_whitelist() {
        let e = EvalError::UnknownIdentifier { name: "system".into(), called: true };
        let msg = e.to_string();
        assert!(msg.starts_with("Unknown function 'system'"));
        assert!(msg.contains("sqrt"));
        assert_eq!(e.kind(), "UnknownFunctionOrName");
    }

    #[test]
    fn arity_message() {
        let e = EvalError::Arity { function: "log", expected: "1 or 2", got: 3 };
        assert_eq!(e.to_string(), "log() takes 1 or 2 argument(s), got 3");
    }
}
