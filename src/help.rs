pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
}

pub fn sections() -> Vec<Section> {
    vec![
        Section {
            title: "Operators",
            lines: vec![
                "  + - * /  : Arithmetic          (e.g., 2 + 3 * 4 = 14)".to_string(),
                "  %        : Modulo              (e.g., -7 % 3 = 2)".to_string(),
                "  //       : Floor division      (e.g., 9 // 2 = 4)".to_string(),
                "  **       : Power, right-assoc. (e.g., 2 ** 3 ** 2 = 512)".to_string(),
                "  ( )      : Grouping; unary + and - allowed".to_string(),
            ],
        },
        Section {
            title: "Functions",
            lines: vec![
                "  sqrt, exp, log(x), log(x, base), log10, abs".to_string(),
                "  ceil, floor, round(x), round(x, ndigits)".to_string(),
                "  sin, cos, tan, asin, acos, atan (radians)".to_string(),
                "  sinh, cosh, tanh, degrees, radians".to_string(),
            ],
        },
        Section {
            title: "Constants",
            lines: vec!["  pi, e, tau, inf".to_string()],
        },
        Section {
            title: "Commands",
            lines: vec![
                "  help, h          : Show this help".to_string(),
                "  history          : Show recent calculations".to_string(),
                "  clear            : Clear calculation history".to_string(),
                "  details <expr>   : Show step-by-step evaluation".to_string(),
                "  quit, exit       : Leave the calculator".to_string(),
            ],
        },
        Section {
            title: "Examples",
            lines: vec![
                "  pi * 2".to_string(),
                "  sqrt(abs(-16)) * pi".to_string(),
                "  sin(pi/2) + cos(0)".to_string(),
                "  details log(8, 2) + 1".to_string(),
            ],
        },
    ]
}

/// Help as plain text, for the line REPL.
pub fn render_plain() -> String {
    let mut out = String::from("\n=== Calculator Help ===\n");
    for section in sections() {
        out.push_str(section.title);
        out.push_str(":\n");
        for line in &section.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("=======================\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::{evaluate_expression, Function};

    #[test]
    fn every_function_is_documented() {
        let text = render_plain();
        for name in Function::names() {
            assert!(text.contains(name), "{} missing from help", name);
        }
    }

    #[test]
    fn examples_evaluate() {
        let examples = sections()
            .into_iter()
            .find(|s| s.title == "Examples")
            .map(|s| s.lines)
            .unwrap_or_default();
        assert!(!examples.is_empty());
        for line in examples {
            let expr = line.trim().trim_start_matches("details ");
            assert!(evaluate_expression(expr).is_ok(), "{}", expr);
        }
    }
}
