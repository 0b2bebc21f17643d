//! Formula evaluation.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary ('*' unary)*
//! unary  := '-' unary | atom
//! atom   := DICE | NUMBER | '(' expr ')'
//! ```
//!
//! Bracketed flavor and bare words are ignored, so labelled damage
//! formulas (`2d6[slashing] + 1d4[fire]`) evaluate as-is. Roll-data
//! references must be substituted with [`RollData::substitute`] first.
//!
//! [`RollData::substitute`]: super::RollData::substitute

use rand::Rng;
use rand::rngs::StdRng;

use super::lexer::{self, Token};
use super::roll::{DieResult, RollOutcome};
use super::{DiceTerm, Keep};
use crate::error::{MechError, MechResult};

/// Maximum number of dice a single term may roll.
pub const MAX_DICE_PER_TERM: u32 = 1000;

/// A source of die results.
pub trait DiceEngine {
    /// Roll one die with the given number of sides, returning `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl DiceEngine for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// Evaluate a formula, rolling dice through `engine`.
pub fn evaluate<E: DiceEngine + ?Sized>(formula: &str, engine: &mut E) -> MechResult<RollOutcome> {
    let (tokens, errors) = lexer::lex(formula);
    if let Some(err) = errors.first() {
        return Err(MechError::invalid_formula(formula, err.message.clone()));
    }

    let mut tokens_out = Vec::with_capacity(tokens.len());
    for (token, _) in tokens {
        match token {
            Token::Flavor(_) | Token::Word(_) => {}
            Token::Reference(name) => {
                return Err(MechError::invalid_formula(
                    formula,
                    format!("unresolved reference @{name}"),
                ));
            }
            other => tokens_out.push(other),
        }
    }
    if tokens_out.is_empty() {
        return Err(MechError::invalid_formula(formula, "empty formula"));
    }

    let mut parser = Parser {
        formula,
        tokens: tokens_out,
        pos: 0,
        engine,
        dice: Vec::new(),
    };
    let total = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(MechError::invalid_formula(
            formula,
            format!("unexpected '{token}'"),
        ));
    }

    tracing::debug!(formula, total, "evaluated roll");
    Ok(RollOutcome {
        formula: formula.to_string(),
        total,
        dice: parser.dice,
    })
}

/// Recursive-descent evaluator over a token stream.
struct Parser<'a, E: DiceEngine + ?Sized> {
    formula: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    engine: &'a mut E,
    dice: Vec<DieResult>,
}

impl<E: DiceEngine + ?Sized> Parser<'_, E> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> MechError {
        MechError::invalid_formula(self.formula, reason)
    }

    fn overflow(&self) -> MechError {
        self.error("arithmetic overflow")
    }

    fn expr(&mut self) -> MechResult<i64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_add(rhs).ok_or_else(|| self.overflow())?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_sub(rhs).ok_or_else(|| self.overflow())?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> MechResult<i64> {
        let mut value = self.unary()?;
        while let Some(Token::Star) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = value.checked_mul(rhs).ok_or_else(|| self.overflow())?;
        }
        Ok(value)
    }

    fn unary(&mut self) -> MechResult<i64> {
        if let Some(Token::Minus) = self.peek() {
            self.pos += 1;
            let value = self.unary()?;
            return value.checked_neg().ok_or_else(|| self.overflow());
        }
        self.atom()
    }

    fn atom(&mut self) -> MechResult<i64> {
        match self.advance() {
            Some(Token::Dice(term)) => self.roll_term(term),
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(self.error(format!("expected ')', found '{other}'"))),
                    None => Err(self.error("unclosed '('")),
                }
            }
            Some(other) => Err(self.error(format!("unexpected '{other}'"))),
            None => Err(self.error("unexpected end of formula")),
        }
    }

    fn roll_term(&mut self, term: DiceTerm) -> MechResult<i64> {
        let count = term.dice_count();
        if term.sides == 0 {
            return Err(self.error(format!("{term} has no sides")));
        }
        if count > MAX_DICE_PER_TERM {
            return Err(self.error(format!(
                "{term} rolls more than {MAX_DICE_PER_TERM} dice"
            )));
        }

        let start = self.dice.len();
        for _ in 0..count {
            let value = self.engine.roll_die(term.sides).clamp(1, term.sides);
            self.dice.push(DieResult {
                sides: term.sides,
                value,
                dropped: false,
            });
        }

        let rolled = &mut self.dice[start..];
        if let Some(keep) = term.keep {
            mark_dropped(rolled, keep);
        }
        Ok(rolled
            .iter()
            .filter(|d| !d.dropped)
            .map(|d| i64::from(d.value))
            .sum())
    }
}

/// Mark every die outside the kept set as dropped. Ties keep the earlier die.
fn mark_dropped(rolled: &mut [DieResult], keep: Keep) {
    let mut order: Vec<usize> = (0..rolled.len()).collect();
    let kept = match keep {
        Keep::Highest(n) => {
            order.sort_by(|&a, &b| rolled[b].value.cmp(&rolled[a].value).then(a.cmp(&b)));
            n
        }
        Keep::Lowest(n) => {
            order.sort_by(|&a, &b| rolled[a].value.cmp(&rolled[b].value).then(a.cmp(&b)));
            n
        }
    };
    let kept = usize::try_from(kept).unwrap_or(usize::MAX).min(rolled.len());
    for &idx in &order[kept..] {
        rolled[idx].dropped = true;
    }
}
