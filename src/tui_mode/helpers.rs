use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::calc_engine::{Constant, Function};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                    if chunk_width + char_width > width && !chunk.is_empty() {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Normalizes spacing for display: one space around binary operators, none
/// inside call parentheses. `**` and `//` stay together.
pub fn format_with_spaces(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' | '/' if chars.get(i + 1) == Some(&c) => {
                result.push(' ');
                result.push(c);
                result.push(c);
                result.push(' ');
                i += 1;
            }
            '+' | '-' if is_sign(&chars, i) => result.push(c),
            '+' | '-' | '*' | '/' | '%' => {
                result.push(' ');
                result.push(c);
                result.push(' ');
            }
            ',' => result.push_str(", "),
            _ => result.push(c),
        }
        i += 1;
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

// A `+`/`-` is a sign when nothing that ends an operand precedes it.
fn is_sign(chars: &[char], i: usize) -> bool {
    let prev = match i.checked_sub(1).and_then(|p| chars.get(p)) {
        Some(prev) => *prev,
        None => return true,
    };
    // exponent of a literal such as 1e-3
    if matches!(prev, 'e' | 'E') && i >= 2 && (chars[i - 2].is_ascii_digit() || chars[i - 2] == '.') {
        return true;
    }
    !(prev.is_alphanumeric() || prev == ')' || prev == '.' || prev == '_')
}

pub fn is_math_name(word: &str) -> bool {
    Function::from_name(word).is_some() || Constant::from_name(word).is_some()
}

pub fn highlight_functions(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let word_style = |word: &str| {
        if is_math_name(word) {
            function_style
        } else {
            base_style
        }
    };

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_number = false;

    for c in expr.chars() {
        if in_word && (c.is_ascii_alphanumeric() || c == '_') {
            current.push(c);
            continue;
        }
        if in_number && (c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '_') {
            current.push(c);
            continue;
        }
        if in_number && (c == '-' || c == '+') && current.ends_with(&['e', 'E'][..]) {
            current.push(c);
            continue;
        }

        if in_word {
            let style = word_style(&current);
            spans.push(Span::styled(std::mem::take(&mut current), style));
            in_word = false;
        } else if in_number {
            spans.push(Span::styled(std::mem::take(&mut current), number_style));
            in_number = false;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            current.push(c);
            in_word = true;
        } else if c.is_ascii_digit() || c == '.' {
            current.push(c);
            in_number = true;
        } else {
            match c {
                '+' | '-' | '*' | '/' | '%' => {
                    spans.push(Span::styled(c.to_string(), operator_style));
                }
                ' ' => spans.push(Span::raw(" ")),
                _ => spans.push(Span::styled(c.to_string(), base_style)),
            }
        }
    }

    if in_word {
        let style = word_style(&current);
        spans.push(Span::styled(current, style));
    } else if in_number {
        spans.push(Span::styled(current, number_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_normalized() {
        assert_eq!(format_with_spaces("2+3*4"), "2 + 3 * 4");
        assert_eq!(format_with_spaces("2**-1"), "2 ** -1");
        assert_eq!(format_with_spaces("9//2"), "9 // 2");
        assert_eq!(format_with_spaces("log( 8 ,2 )"), "log(8, 2)");
        assert_eq!(format_with_spaces("-3+7"), "-3 + 7");
        assert_eq!(format_with_spaces("(1)-(2)"), "(1) - (2)");
        assert_eq!(format_with_spaces("1e-3-e"), "1e-3 - e");
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("1 + 2 + 3", 5), vec!["1 + 2", "+ 3"]);
        assert_eq!(wrap_text("x", 0), vec![""]);
    }

    #[test]
    fn highlighting_covers_the_whole_input() {
        let input = "sqrt(1.5e-3) + foo";
        let spans = highlight_functions(input, Style::default());
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, input);
        assert!(is_math_name("sqrt"));
        assert!(is_math_name("tau"));
        assert!(!is_math_name("foo"));
    }
}
