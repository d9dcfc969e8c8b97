use super::ast::{BinaryOp, Constant, Expr, Function, UnaryOp};
use super::tokens::{tokenize, Operator, Token};
use super::EvalError;

const MAX_DEPTH: usize = 256;
// Every node comes from at least one token, so this also bounds how deep a
// flat `1+1+...` chain can nest on the left.
const MAX_TOKENS: usize = 4096;

pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::syntax("empty expression"));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::syntax(format!(
            "expression too long ({} tokens, at most {})",
            tokens.len(),
            MAX_TOKENS
        )));
    }
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over a token stream.
///
/// Name resolution errors are held back until the whole input has parsed, so
/// `import os` reports the syntax problem rather than the unknown name.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    deferred: Option<EvalError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            deferred: None,
        }
    }

    pub fn parse(&mut self) -> Result<Expr, EvalError> {
        let expr = self.expr()?;
        if let Some(token) = self.peek() {
            return Err(EvalError::syntax(format!("unexpected {}", describe(token))));
        }
        match self.deferred.take() {
            Some(err) => Err(err),
            None => Ok(expr),
        }
    }

    // Keeps the first name error; the placeholder never leaves the parser.
    fn defer(&mut self, err: EvalError) -> Expr {
        self.deferred.get_or_insert(err);
        Expr::Number(f64::NAN)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_op(&self) -> Option<Operator> {
        match self.peek() {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn expect(&mut self, wanted: Token, context: &str) -> Result<(), EvalError> {
        match self.peek() {
            Some(token) if *token == wanted => {
                self.current += 1;
                Ok(())
            }
            Some(token) => Err(EvalError::syntax(format!(
                "expected {} {}, found {}",
                describe(&wanted),
                context,
                describe(token)
            ))),
            None => Err(EvalError::syntax(format!(
                "expected {} {}, found end of input",
                describe(&wanted),
                context
            ))),
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::syntax("expression nested too deeply"));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.term()?;

        while let Some(op) = self.peek_op() {
            let op = match op {
                Operator::Plus => BinaryOp::Add,
                Operator::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.current += 1;
            let right = self.term()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.unary()?;

        while let Some(op) = self.peek_op() {
            let op = match op {
                Operator::Star => BinaryOp::Mul,
                Operator::Slash => BinaryOp::Div,
                Operator::DoubleSlash => BinaryOp::FloorDiv,
                Operator::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.current += 1;
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek_op() {
            Some(Operator::Plus) => UnaryOp::Plus,
            Some(Operator::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.current += 1;
        self.descend()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    // `**` binds tighter than a unary sign on its left and looser than one on
    // its right: -2**2 is -(2**2), 2**-1 is 2**(-1).
    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;

        if self.peek_op() == Some(Operator::DoubleStar) {
            self.current += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(EvalError::syntax("unexpected end of input")),
        };
        self.current += 1;

        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::LParen => {
                self.descend()?;
                let expr = self.expr()?;
                self.depth -= 1;
                self.expect(Token::RParen, "to close '('")?;
                Ok(expr)
            }
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    self.current += 1;
                    self.call(name)
                } else if let Some(constant) = Constant::from_name(&name) {
                    Ok(Expr::Constant(constant))
                } else if Function::from_name(&name).is_some() {
                    Err(EvalError::syntax(format!("function '{}' requires parentheses", name)))
                } else {
                    Ok(self.defer(EvalError::UnknownIdentifier { name, called: false }))
                }
            }
            other => Err(EvalError::syntax(format!("unexpected {}", describe(&other)))),
        }
    }

    // Called with the opening parenthesis already consumed.
    fn call(&mut self, name: String) -> Result<Expr, EvalError> {
        self.descend()?;
        let mut args = Vec::new();
        while self.peek() != Some(&Token::RParen) {
            args.push(self.expr()?);

            match self.peek() {
                Some(Token::Comma) => self.current += 1,
                Some(Token::RParen) => break,
                Some(token) => {
                    return Err(EvalError::syntax(format!(
                        "expected ',' or ')' in call to {}, found {}",
                        name,
                        describe(token)
                    )))
                }
                None => break,
            }
        }
        self.depth -= 1;
        self.expect(Token::RParen, &format!("to close call to {}", name))?;

        let function = match Function::from_name(&name) {
            Some(function) => function,
            None => return Ok(self.defer(EvalError::UnknownIdentifier { name, called: true })),
        };
        let (min, max) = function.arity();
        if args.len() < min || args.len() > max {
            return Ok(self.defer(EvalError::Arity {
                function: function.name(),
                expected: if min == max { "1" } else { "1 or 2" },
                got: args.len(),
            }));
        }
        Ok(Expr::Call(function, args))
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {}", n),
        Token::Op(op) => {
            let symbol = match op {
                Operator::Plus => "+",
                Operator::Minus => "-",
                Operator::Star => "*",
                Operator::Slash => "/",
                Operator::Percent => "%",
                Operator::DoubleStar => "**",
                Operator::DoubleSlash => "//",
            };
            format!("'{}'", symbol)
        }
        Token::Ident(name) => format!("name '{}'", name),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
    }
}
