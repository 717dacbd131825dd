//! The calculator's input state machine.
//!
//! The engine keeps the operand being typed apart from the committed left
//! side of the expression. An operand is committed only when the next
//! operator arrives, and the whole expression is parsed once, at `=`.

use super::entry::{self, Token};
use super::evaluation::{self, format_result};
use super::keys::{AngleMode, Function, Key};
use crate::display::{DisplayStrings, ERROR_TEXT};
use tracing::{debug, warn};

/// The operand shown on the result line.
#[derive(Clone, Debug, PartialEq)]
enum Input {
    /// The `0` shown after a reset, before anything is typed.
    Placeholder,
    /// The evaluation failure sentinel.
    Error,
    /// Typed tokens; never empty.
    Entry(Vec<Token>),
}

impl Input {
    fn display(&self) -> String {
        match self {
            Self::Placeholder => "0".to_string(),
            Self::Error => ERROR_TEXT.to_string(),
            Self::Entry(tokens) => entry::display(tokens),
        }
    }

    /// Typing a digit replaces rather than appends when this holds.
    fn is_replaceable(&self) -> bool {
        match self {
            Self::Placeholder | Self::Error => true,
            Self::Entry(tokens) => tokens.as_slice() == [Token::Digit(0)],
        }
    }

    fn into_tokens(self) -> Vec<Token> {
        match self {
            Self::Placeholder => vec![Token::Digit(0)],
            Self::Error => vec![Token::Unknown(ERROR_TEXT.to_string())],
            Self::Entry(tokens) => tokens,
        }
    }

    fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Placeholder => Some(0.0),
            Self::Error => None,
            Self::Entry(tokens) => entry::numeric_value(tokens),
        }
    }

    fn from_number(value: f64) -> Self {
        entry::numeral(&format_result(value)).map_or(Self::Error, Self::Entry)
    }
}

/// Calculator state driven by button labels.
///
/// Each instance is independent. The engine is not synchronized; see
/// [`crate::keypad::SharedEngine`] for use from several threads.
#[derive(Clone, Debug)]
pub struct Engine {
    input: Input,
    /// Committed tokens. After `=` this holds the result, so the next key
    /// appends to it.
    expression: Vec<Token>,
    memory: f64,
    angle: AngleMode,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_angle_mode(AngleMode::default())
    }

    pub fn with_angle_mode(angle: AngleMode) -> Self {
        Self {
            input: Input::Placeholder,
            expression: Vec::new(),
            memory: 0.0,
            angle,
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Process one button label.
    pub fn submit(&mut self, label: &str) {
        self.press(Key::from_label(label));

        debug!(
            %label,
            result = %self.input.display(),
            expression = %self.expression_text(),
            angle = %self.angle,
            "key submitted"
        );
    }

    /// Process an already classified key.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::AllClear => {
                self.input = Input::Placeholder;
                self.expression.clear();
            }
            Key::Clear => self.input = Input::Placeholder,
            Key::Backspace => self.backspace(),
            Key::Digit(d) => self.push_numeral(Token::Digit(d)),
            Key::Point => self.push_numeral(Token::Point),
            Key::Negate => self.negate(),
            Key::MemoryAdd => self.memory += self.input.numeric_value().unwrap_or(0.0),
            Key::MemorySubtract => self.memory -= self.input.numeric_value().unwrap_or(0.0),
            Key::MemoryRecall => self.input = Input::from_number(self.memory),
            Key::MemoryClear => self.memory = 0.0,
            Key::Angle(angle) => self.angle = angle,
            Key::Constant(c) => self.input = Input::Entry(vec![Token::Constant(c)]),
            Key::Wrap(f) => self.wrap(f, None),
            Key::Square => self.wrap(Function::Group, Some(Token::Squared)),
            Key::Operator(op) => self.commit(Token::Operator(op)),
            Key::OpenParen => self.commit(Token::Open(Function::Group)),
            Key::CloseParen => self.commit(Token::Close),
            Key::Other(label) => self.commit(Token::Unknown(label)),
            Key::Equals => self.evaluate(),
        }
    }

    /// Current result and expression lines.
    pub fn display_strings(&self) -> DisplayStrings {
        DisplayStrings {
            result: self.input.display(),
            expression: self.expression_text(),
        }
    }

    fn expression_text(&self) -> String {
        entry::display(&self.expression)
    }

    fn backspace(&mut self) {
        if let Input::Entry(tokens) = &mut self.input {
            tokens.pop();
            if !tokens.is_empty() {
                return;
            }
        }
        self.input = Input::Placeholder;
    }

    fn push_numeral(&mut self, token: Token) {
        if self.input.is_replaceable() {
            self.input = Input::Entry(match token {
                Token::Point => vec![Token::Digit(0), Token::Point],
                token => vec![token],
            });
            return;
        }

        if let Input::Entry(tokens) = &mut self.input {
            if token == Token::Point && tokens.contains(&Token::Point) {
                return;
            }
            tokens.push(token);
        }
    }

    fn negate(&mut self) {
        self.input = match std::mem::replace(&mut self.input, Input::Placeholder) {
            Input::Placeholder => Input::Entry(vec![Token::Sign, Token::Digit(0)]),
            Input::Error => Input::Error,
            Input::Entry(mut tokens) => {
                if tokens.first() == Some(&Token::Sign) {
                    tokens.remove(0);
                } else {
                    tokens.insert(0, Token::Sign);
                }
                if tokens.is_empty() {
                    Input::Placeholder
                } else {
                    Input::Entry(tokens)
                }
            }
        };
    }

    fn wrap(&mut self, function: Function, suffix: Option<Token>) {
        let inner = match std::mem::replace(&mut self.input, Input::Placeholder) {
            Input::Error => {
                self.input = Input::Error;
                return;
            }
            input => input.into_tokens(),
        };

        let mut tokens = Vec::with_capacity(inner.len() + 3);
        tokens.push(Token::Open(function));
        tokens.extend(inner);
        tokens.push(Token::Close);
        tokens.extend(suffix);
        self.input = Input::Entry(tokens);
    }

    /// Whether the committed expression still needs an operand before the
    /// next operator.
    fn awaits_operand(&self) -> bool {
        matches!(
            self.expression.last(),
            None | Some(Token::Operator(_) | Token::Open(_) | Token::Unknown(_))
        )
    }

    /// Move the current input onto the expression line, followed by `token`.
    fn commit(&mut self, token: Token) {
        match std::mem::replace(&mut self.input, Input::Placeholder) {
            Input::Placeholder => {
                let opens_group = token == Token::Open(Function::Group);
                if !opens_group && self.awaits_operand() {
                    self.expression.push(Token::Digit(0));
                }
            }
            input => self.expression.extend(input.into_tokens()),
        }
        self.expression.push(token);
    }

    fn evaluate(&mut self) {
        let mut tokens = self.expression.clone();
        if self.input != Input::Placeholder || self.expression.is_empty() {
            tokens.extend(self.input.clone().into_tokens());
        }

        match evaluation::evaluate(&tokens, self.angle) {
            Ok(value) => {
                self.input = Input::from_number(value);
                self.expression = self.input.clone().into_tokens();
            }
            Err(e) => {
                warn!(error = %e, "evaluation failed");
                self.input = Input::Error;
            }
        }
    }
}
