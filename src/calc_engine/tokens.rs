use super::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
    Ident(String),
    LParen,
    RParen,
    Comma,
}

/// Operator spellings. `**` and `//` are single tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    DoubleSlash,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            '+' => {
                tokens.push(Token::Op(Operator::Plus));
                chars.next();
            }
            '-' => {
                tokens.push(Token::Op(Operator::Minus));
                chars.next();
            }
            '%' => {
                tokens.push(Token::Op(Operator::Percent));
                chars.next();
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Op(Operator::DoubleStar));
                } else {
                    tokens.push(Token::Op(Operator::Star));
                }
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    tokens.push(Token::Op(Operator::DoubleSlash));
                } else {
                    tokens.push(Token::Op(Operator::Slash));
                }
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                let mut has_dot = false;
                let mut has_exp = false;
                let mut last = '\0';

                while let Some(&ch) = chars.peek() {
                    match ch {
                        '.' if has_dot || has_exp => break,
                        '.' => {
                            has_dot = true;
                            num_str.push(ch);
                        }
                        'e' | 'E' if !has_exp => {
                            has_exp = true;
                            num_str.push(ch);
                            chars.next();
                            last = ch;

                            if let Some(&sign) = chars.peek() {
                                if sign == '+' || sign == '-' {
                                    num_str.push(sign);
                                    chars.next();
                                    last = sign;
                                }
                            }
                            continue;
                        }
                        // 1_000: separators only between digits
                        '_' if last.is_ascii_digit() => {
                            chars.next();
                            if !chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                                return Err(EvalError::syntax(format!(
                                    "invalid number literal '{}_'",
                                    num_str
                                )));
                            }
                            last = ch;
                            continue;
                        }
                        '0'..='9' => num_str.push(ch),
                        _ => break,
                    }
                    chars.next();
                    last = ch;
                }

                if num_str == "." {
                    return Err(EvalError::syntax("unexpected character '.'"));
                }
                // "1e" or "1.5e+" without digits
                if !num_str.ends_with(|ch: char| ch.is_ascii_digit() || ch == '.') {
                    return Err(EvalError::syntax(format!("invalid number literal '{}'", num_str)));
                }

                let value = num_str
                    .parse::<f64>()
                    .map_err(|_| EvalError::syntax(format!("invalid number literal '{}'", num_str)))?;
                tokens.push(Token::Number(value));

                // "2abc" and "1.5.2" are not numbers followed by something else
                if let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' || next == '.' {
                        return Err(EvalError::syntax(format!(
                            "invalid number literal '{}{}'",
                            num_str, next
                        )));
                    }
                }
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err(EvalError::syntax(format!("unexpected character '{}'", c))),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_double_char_operators() -> Result<(), EvalError> {
        let tokens = tokenize("2**3//4*5/6")?;
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Op(Operator::DoubleStar),
                Token::Number(3.0),
                Token::Op(Operator::DoubleSlash),
                Token::Number(4.0),
                Token::Op(Operator::Star),
                Token::Number(5.0),
                Token::Op(Operator::Slash),
                Token::Number(6.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn number_forms() -> Result<(), EvalError> {
        assert_eq!(tokenize("3.")?, vec![Token::Number(3.0)]);
        assert_eq!(tokenize(".5")?, vec![Token::Number(0.5)]);
        assert_eq!(tokenize("1e3")?, vec![Token::Number(1000.0)]);
        assert_eq!(tokenize("2.5E-3")?, vec![Token::Number(0.0025)]);
        assert_eq!(tokenize("1_000")?, vec![Token::Number(1000.0)]);
        assert_eq!(tokenize("1_0.2_5e1_0")?, vec![Token::Number(10.25e10)]);
        Ok(())
    }

    #[test]
    fn rejects_malformed_numbers() {
        for bad in ["1e", "1.5e+", "1.2.3", "2abc", "1__0", "1_", ".", "1_e5", "1_.5", "1.5_e2"] {
            assert!(
                matches!(tokenize(bad), Err(EvalError::Syntax(_))),
                "{} should not tokenize",
                bad
            );
        }
    }

    #[test]
    fn identifiers_keep_case_and_digits() -> Result<(), EvalError> {
        assert_eq!(
            tokenize("log10(x_1)")?,
            vec![
                Token::Ident("log10".into()),
                Token::LParen,
                Token::Ident("x_1".into()),
                Token::RParen,
            ]
        );
        Ok(())
    }

    #[test]
    fn rejects_foreign_characters() {
        for bad in ["'os'", "\"rm\"", "a.b", "x[0]", "a = 1", "1 < 2", "~1", "2 ^ 3"] {
            assert!(
                matches!(tokenize(bad), Err(EvalError::Syntax(_))),
                "{} should not tokenize",
                bad
            );
        }
    }
}
