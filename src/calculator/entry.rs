//! Entry tokens recorded at the moment of each press.
//!
//! The display lines and the evaluator input are both rendered from the
//! same token stream, so symbols never have to be recovered from display
//! text by substitution.

use super::evaluation::EvalError;
use super::keys::{AngleMode, Constant, Function, Operator};

/// One typed unit of a display line.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Digit(u8),
    Point,
    /// Leading minus of an operand.
    Sign,
    Constant(Constant),
    Open(Function),
    Close,
    /// The `^2` suffix of the `x²` wrap.
    Squared,
    Operator(Operator),
    /// A label the evaluator cannot interpret; evaluation fails on it.
    Unknown(String),
}

impl Token {
    fn is_numeral(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Point)
    }

    /// Whether this token can begin an operand directly after another one.
    /// A sign in that position reads as subtraction instead.
    fn starts_operand(&self) -> bool {
        matches!(
            self,
            Self::Digit(_) | Self::Point | Self::Constant(_) | Self::Open(_)
        )
    }

    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Self::Digit(_) | Self::Point | Self::Constant(_) | Self::Close | Self::Squared
        )
    }

    fn push_display(&self, out: &mut String) {
        match self {
            Self::Digit(d) => out.push(char::from(b'0' + d)),
            Self::Point => out.push('.'),
            Self::Sign => out.push('-'),
            Self::Constant(c) => out.push_str(c.symbol()),
            Self::Open(f) => out.push_str(f.display_open()),
            Self::Close => out.push(')'),
            Self::Squared => out.push_str("^2"),
            Self::Operator(op) => out.push_str(op.symbol()),
            Self::Unknown(label) => out.push_str(label),
        }
    }
}

/// Concatenate the display text of `tokens`.
pub fn display(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.push_display(&mut out);
    }
    out
}

/// Tokenize a plain numeral such as `-12.5`.
///
/// Returns `None` when `text` contains anything besides an optional leading
/// minus, digits and at most one point.
pub fn numeral(text: &str) -> Option<Vec<Token>> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || digits.matches('.').count() > 1 {
        return None;
    }

    let mut tokens = Vec::with_capacity(text.len());
    if sign {
        tokens.push(Token::Sign);
    }
    for b in digits.bytes() {
        tokens.push(match b {
            b'0'..=b'9' => Token::Digit(b - b'0'),
            b'.' => Token::Point,
            _ => return None,
        });
    }
    Some(tokens)
}

/// Numeric value of `tokens` when they form a plain (optionally signed)
/// numeral, `None` otherwise.
pub fn numeric_value(tokens: &[Token]) -> Option<f64> {
    let (negative, rest) = match tokens.split_first() {
        Some((Token::Sign, rest)) => (true, rest),
        _ => (false, tokens),
    };
    if rest.is_empty() || !rest.iter().all(Token::is_numeral) {
        return None;
    }
    let value: f64 = display(rest).parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Render `tokens` in fasteval syntax.
///
/// Runs of digits and points are normalized through `f64` so that partial
/// entries like `5.` reach the evaluator as `5`. Operands written next to
/// each other (`2(3)`, `√(4)5`, `2π`) are joined with `*`.
pub fn to_evaluator(tokens: &[Token], angle: AngleMode) -> Result<String, EvalError> {
    let mut out = String::new();
    let mut rest = tokens;
    let mut after_operand = false;

    while let Some((token, tail)) = rest.split_first() {
        if after_operand && token.starts_operand() {
            out.push('*');
        }
        after_operand = token.ends_operand();

        match token {
            Token::Digit(_) | Token::Point => {
                let len = rest.iter().take_while(|t| t.is_numeral()).count();
                let text = display(&rest[..len]);
                let value: f64 = text
                    .parse()
                    .map_err(|_| EvalError::MalformedNumber(text.clone()))?;
                out.push_str(&value.to_string());
                rest = &rest[len..];
                continue;
            }
            Token::Sign => out.push('-'),
            Token::Constant(Constant::Pi) => out.push_str("pi()"),
            Token::Constant(Constant::E) => out.push_str("e()"),
            Token::Open(f) => out.push_str(f.evaluator_open(angle)),
            Token::Close => out.push(')'),
            Token::Squared => out.push_str("^2"),
            Token::Operator(op) => out.push_str(op.symbol()),
            Token::Unknown(label) => return Err(EvalError::UnknownToken(label.clone())),
        }
        rest = tail;
    }

    Ok(out)
}
