//! Dice notation: terms, roll modes, formula building, and evaluation.
//!
//! Formulas are plain strings in a small grammar (`NdM`, `khX`/`klX`,
//! `+`/`-` flat modifiers, parenthesized groups with a `*` multiplier).
//! [`formula`] builds and rewrites them; [`eval`] rolls them.

pub mod data;
pub mod eval;
pub mod formula;
pub mod lexer;
pub mod roll;

pub use data::RollData;
pub use eval::{DiceEngine, evaluate};
pub use roll::{DieResult, RollOutcome};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// How a d20 check is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    /// Roll one d20.
    #[default]
    Normal,
    /// Roll two d20 and keep the highest.
    Advantage,
    /// Roll two d20 and keep the lowest.
    Disadvantage,
}

impl RollMode {
    /// The d20 term for this mode.
    pub fn base_die(self) -> &'static str {
        match self {
            Self::Normal => "1d20",
            Self::Advantage => "2d20kh1",
            Self::Disadvantage => "2d20kl1",
        }
    }

    /// Pick a mode from a pair of flags. Both or neither set means normal.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

impl FromStr for RollMode {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "advantage" | "adv" => Ok(Self::Advantage),
            "disadvantage" | "dis" => Ok(Self::Disadvantage),
            other => Err(MechError::InvalidRollMode(other.to_string())),
        }
    }
}

/// Which dice of a term count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    /// Keep the N highest dice (`khN`).
    Highest(u32),
    /// Keep the N lowest dice (`klN`).
    Lowest(u32),
}

/// A single dice term such as `d6`, `2d6`, or `2d20kh1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTerm {
    /// Number of dice; `None` when omitted (`d6`), which means one.
    pub count: Option<u32>,
    /// Sides per die.
    pub sides: u32,
    /// Optional keep-highest/lowest suffix.
    pub keep: Option<Keep>,
}

impl DiceTerm {
    /// Create a term with an explicit count and no keep suffix.
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            count: Some(count),
            sides,
            keep: None,
        }
    }

    /// The number of dice rolled.
    pub fn dice_count(&self) -> u32 {
        self.count.unwrap_or(1)
    }

    /// Parse a whole string as a single dice term.
    pub fn parse(s: &str) -> Option<Self> {
        match Self::parse_prefix(s) {
            Some((term, len)) if len == s.len() => Some(term),
            _ => None,
        }
    }

    /// Parse a dice term at the start of `s`, returning it and its byte length.
    ///
    /// The term must not run straight into further letters or digits, so
    /// `1d6fire` is not a term while `1d6 fire` and `1d6[fire]` are.
    pub fn parse_prefix(s: &str) -> Option<(Self, usize)> {
        let bytes = s.as_bytes();
        let count_end = digits_end(bytes, 0);
        let count = if count_end > 0 {
            Some(s[..count_end].parse::<u32>().ok()?)
        } else {
            None
        };

        if !matches!(bytes.get(count_end), Some(b'd' | b'D')) {
            return None;
        }
        let sides_start = count_end + 1;
        let sides_end = digits_end(bytes, sides_start);
        if sides_end == sides_start {
            return None;
        }
        let sides = s[sides_start..sides_end].parse::<u32>().ok()?;

        let mut end = sides_end;
        let mut keep = None;
        if let (Some(b'k' | b'K'), Some(dir)) = (bytes.get(end), bytes.get(end + 1)) {
            let n_start = end + 2;
            let n_end = digits_end(bytes, n_start);
            if n_end > n_start {
                let n = s[n_start..n_end].parse::<u32>().ok()?;
                keep = match dir {
                    b'h' | b'H' => Some(Keep::Highest(n)),
                    b'l' | b'L' => Some(Keep::Lowest(n)),
                    _ => None,
                };
                if keep.is_some() {
                    end = n_end;
                }
            }
        }

        if bytes.get(end).is_some_and(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        Some((
            Self {
                count,
                sides,
                keep,
            },
            end,
        ))
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(count) = self.count {
            write!(f, "{count}")?;
        }
        write!(f, "d{}", self.sides)?;
        match self.keep {
            Some(Keep::Highest(n)) => write!(f, "kh{n}"),
            Some(Keep::Lowest(n)) => write!(f, "kl{n}"),
            None => Ok(()),
        }
    }
}

/// Locate every dice term in a formula, with its byte range.
///
/// Terms only start at a word boundary, so the `d` inside `bludgeoning`
/// never counts.
pub fn find_dice_terms(formula: &str) -> Vec<(std::ops::Range<usize>, DiceTerm)> {
    let mut found = Vec::new();
    let mut prev: Option<char> = None;
    let mut iter = formula.char_indices();

    while let Some((idx, ch)) = iter.next() {
        let at_boundary = prev.is_none_or(|p| !p.is_ascii_alphanumeric());
        if at_boundary {
            if let Some((term, len)) = DiceTerm::parse_prefix(&formula[idx..]) {
                found.push((idx..idx + len, term));
                // Terms are ASCII, so byte length equals char count.
                for _ in 1..len {
                    iter.next();
                }
                prev = formula[..idx + len].chars().next_back();
                continue;
            }
        }
        prev = Some(ch);
    }

    found
}

/// Byte index of the first non-digit at or after `start`.
fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
