//! Expression evaluation using fasteval.
//!
//! Renders an entry token stream into fasteval syntax, evaluates it with a
//! namespace that supplies the functions fasteval lacks, and formats the
//! result for the display.

use super::entry::{self, Token};
use super::keys::AngleMode;
use fasteval::{Evaler, Parser, Slab};
use thiserror::Error;

/// Nesting allowed while parsing. Every wrap key adds a level, so fasteval's
/// default of 32 is too tight for a keypad.
const DEPTH_LIMIT: usize = 512;
const LENGTH_LIMIT: usize = 1 << 16;

/// Why an expression could not produce a displayable number.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("failed to evaluate `{expression}`: {reason}")]
    Parse { expression: String, reason: String },

    #[error("result is not a finite number: {0}")]
    NonFinite(f64),

    #[error("unknown token `{0}`")]
    UnknownToken(String),

    #[error("malformed number `{0}`")]
    MalformedNumber(String),
}

/// Functions resolved outside fasteval's builtins.
fn namespace_function(name: &str, args: &[f64]) -> Option<f64> {
    let &[x] = args else {
        return None;
    };
    let value = match name {
        "sqrt" => x.sqrt(),
        "ln" => x.ln(),
        "lg" => x.log10(),
        "sindeg" => x.to_radians().sin(),
        "cosdeg" => x.to_radians().cos(),
        "tandeg" => x.to_radians().tan(),
        _ => return None,
    };
    Some(value)
}

/// Evaluate a full entry token stream.
///
/// Empty input evaluates to zero. Results that are NaN or infinite are
/// reported as [`EvalError::NonFinite`].
pub fn evaluate(tokens: &[Token], angle: AngleMode) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Ok(0.0);
    }

    let expression = entry::to_evaluator(tokens, angle)?;
    let mut namespace = |name: &str, args: Vec<f64>| namespace_function(name, &args);
    let to_error = |e: fasteval::Error| EvalError::Parse {
        reason: format!("{e:?}"),
        expression: expression.clone(),
    };

    let mut parser = Parser::new();
    parser.expr_depth_limit = DEPTH_LIMIT;
    parser.expr_len_limit = LENGTH_LIMIT;
    // The slab has a fixed capacity; size it from the input.
    let mut slab = Slab::with_capacity(tokens.len() * 4 + 64);

    let value = parser
        .parse(&expression, &mut slab.ps)
        .map_err(to_error)?
        .from(&slab.ps)
        .eval(&slab, &mut namespace)
        .map_err(to_error)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite(value))
    }
}

/// Format a number for the display.
///
/// Uses the shortest representation that round-trips, never exponent
/// notation, and never shows a negative zero.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::keys::{Constant, Function, Operator};

    fn num(text: &str) -> Vec<Token> {
        entry::numeral(text).unwrap()
    }

    fn binary(lhs: &str, op: Operator, rhs: &str) -> Vec<Token> {
        let mut tokens = num(lhs);
        tokens.push(Token::Operator(op));
        tokens.extend(num(rhs));
        tokens
    }

    fn wrapped(f: Function, inner: &str) -> Vec<Token> {
        let mut tokens = vec![Token::Open(f)];
        tokens.extend(num(inner));
        tokens.push(Token::Close);
        tokens
    }

    #[test]
    fn test_basic_evaluation() {
        let value = evaluate(&binary("2", Operator::Add, "3"), AngleMode::Radians).unwrap();
        assert_eq!(value, 5.0);
        assert_eq!(format_result(value), "5");
    }

    #[test]
    fn test_precedence() {
        let mut tokens = binary("2", Operator::Add, "3");
        tokens.push(Token::Operator(Operator::Multiply));
        tokens.extend(num("4"));
        assert_eq!(evaluate(&tokens, AngleMode::Radians).unwrap(), 14.0);
    }

    #[test]
    fn test_decimal_result() {
        let value = evaluate(&binary("1", Operator::Divide, "4"), AngleMode::Radians).unwrap();
        assert_eq!(format_result(value), "0.25");
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate(&binary("1", Operator::Divide, "0"), AngleMode::Radians);
        assert!(matches!(result, Err(EvalError::NonFinite(_))));
    }

    #[test]
    fn test_trailing_operator() {
        let mut tokens = num("2");
        tokens.push(Token::Operator(Operator::Add));
        let result = evaluate(&tokens, AngleMode::Radians);
        assert!(matches!(result, Err(EvalError::Parse { .. })));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let mut tokens = vec![Token::Open(Function::Group)];
        tokens.extend(binary("2", Operator::Add, "3"));
        let result = evaluate(&tokens, AngleMode::Radians);
        assert!(matches!(result, Err(EvalError::Parse { .. })));
    }

    #[test]
    fn test_namespace_functions() {
        let sqrt = evaluate(&wrapped(Function::Sqrt, "16"), AngleMode::Radians).unwrap();
        assert_eq!(sqrt, 4.0);

        let log = evaluate(&wrapped(Function::Log, "1000"), AngleMode::Radians).unwrap();
        assert!((log - 3.0).abs() < 1e-12);

        let ln = evaluate(&wrapped(Function::Ln, "1"), AngleMode::Radians).unwrap();
        assert_eq!(ln, 0.0);

        let reciprocal = evaluate(&wrapped(Function::Reciprocal, "8"), AngleMode::Radians).unwrap();
        assert_eq!(reciprocal, 0.125);
    }

    #[test]
    fn test_square_root_of_negative_is_not_finite() {
        let result = evaluate(&wrapped(Function::Sqrt, "-4"), AngleMode::Radians);
        assert!(matches!(result, Err(EvalError::NonFinite(_))));
    }

    #[test]
    fn test_trig_respects_angle_mode() {
        let tokens = wrapped(Function::Sin, "90");
        let degrees = evaluate(&tokens, AngleMode::Degrees).unwrap();
        assert!((degrees - 1.0).abs() < 1e-12);

        let radians = evaluate(&tokens, AngleMode::Radians).unwrap();
        assert!((radians - 90f64.sin()).abs() < 1e-12);
        assert!(format_result(radians).starts_with("0.893"));
    }

    #[test]
    fn test_constants() {
        let pi = evaluate(&[Token::Constant(Constant::Pi)], AngleMode::Radians).unwrap();
        assert!((pi - std::f64::consts::PI).abs() < 1e-12);

        let e = evaluate(&[Token::Constant(Constant::E)], AngleMode::Radians).unwrap();
        assert!((e - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_squared_and_power() {
        let mut tokens = wrapped(Function::Group, "4");
        tokens.push(Token::Squared);
        assert_eq!(evaluate(&tokens, AngleMode::Radians).unwrap(), 16.0);

        let power = evaluate(&binary("2", Operator::Power, "10"), AngleMode::Radians).unwrap();
        assert_eq!(power, 1024.0);
    }

    #[test]
    fn test_negative_operand() {
        let value = evaluate(&binary("2", Operator::Multiply, "-3"), AngleMode::Radians).unwrap();
        assert_eq!(value, -6.0);
    }

    #[test]
    fn test_modulo() {
        let value = evaluate(&binary("10", Operator::Modulo, "3"), AngleMode::Radians).unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_deeply_nested_wraps() {
        let mut tokens = num("16");
        for _ in 0..100 {
            tokens.insert(0, Token::Open(Function::Group));
            tokens.push(Token::Close);
        }
        for _ in 0..40 {
            tokens.insert(0, Token::Open(Function::Sqrt));
            tokens.push(Token::Close);
        }
        let value = evaluate(&tokens, AngleMode::Radians).unwrap();
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_expression() {
        let mut tokens = num("1");
        for _ in 0..200 {
            tokens.push(Token::Operator(Operator::Add));
            tokens.extend(num("1"));
        }
        assert_eq!(evaluate(&tokens, AngleMode::Radians).unwrap(), 201.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(evaluate(&[], AngleMode::Radians).unwrap(), 0.0);
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_result(-2.5), "-2.5");
        assert_eq!(format_result(1e21), "1000000000000000000000");
    }
}
