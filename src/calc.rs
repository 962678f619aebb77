//! Arithmetic-only expression evaluator
//!
//! Accepts decimal numbers, `+ - * /`, unary signs and parentheses. Anything
//! else is rejected before evaluation, so input text can never reach a
//! general-purpose interpreter.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

/// Longest expression we will look at
pub const MAX_INPUT_LEN: usize = 256;

/// Deepest parenthesis/sign nesting we will recurse into
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("expression is longer than {} characters", MAX_INPUT_LEN)]
    TooLong,
    #[error("expression is nested too deeply")]
    TooDeep,
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is out of range")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(n) => format_number(*n),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Parse a decimal literal. Commas are only accepted as thousands
/// separators: a 1-3 digit lead group followed by 3-digit groups.
fn parse_number(literal: &str) -> Result<f64, CalcError> {
    let invalid = || CalcError::InvalidNumber(literal.to_string());

    let digits = if literal.contains(',') {
        let (whole, frac) = match literal.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (literal, None),
        };
        let mut groups = whole.split(',');
        let lead = groups.next().unwrap_or("");
        let lead_ok = (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit());
        let rest_ok = groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));
        if !lead_ok || !rest_ok || frac.is_some_and(|f| f.contains(',')) {
            return Err(invalid());
        }
        literal.replace(',', "")
    } else {
        literal.to_string()
    };

    digits.parse::<f64>().map_err(|_| invalid())
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' | 'x' | '×' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' | '÷' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && is_number_char(chars[i]) {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Num(parse_number(&literal)?));
            }
            other => return Err(CalcError::UnexpectedChar(other, i)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(CalcError::UnexpectedToken(other.describe())),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(other) => Err(CalcError::UnexpectedToken(other.describe())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    if input.chars().count() > MAX_INPUT_LEN {
        return Err(CalcError::TooLong);
    }

    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if let Some(extra) = parser.peek() {
        return Err(CalcError::UnexpectedToken(extra.describe()));
    }
    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }

    Ok(value)
}

/// Render a result the way a person would say it: `42`, not `42.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // Avoid printing "-0"
        format!("{}", value as i64)
    } else if value.abs() >= 1e15 {
        format!("{}", value)
    } else {
        let rounded = (value * 1e10).round() / 1e10;
        if rounded == 0.0 {
            // Tiny negatives round to -0
            return "0".to_string();
        }
        format!("{}", rounded)
    }
}
