//! Evaluated rolls.

use serde::{Deserialize, Serialize};

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Sides on the die that was rolled.
    pub sides: u32,
    /// The value rolled (1 to `sides`).
    pub value: u32,
    /// True when a keep-highest/lowest suffix discarded this die.
    #[serde(default)]
    pub dropped: bool,
}

/// The evaluated outcome of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The formula that was rolled.
    pub formula: String,
    /// The final total.
    pub total: i64,
    /// Every die rolled, in roll order, including dropped dice.
    pub dice: Vec<DieResult>,
}

impl RollOutcome {
    /// Values of every die rolled, in roll order.
    pub fn per_die(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Dice that counted toward the total.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| !d.dropped)
    }

    /// The highest kept die value, or 0 if no dice were rolled.
    pub fn highest(&self) -> u32 {
        self.kept().map(|d| d.value).max().unwrap_or(0)
    }

    /// The lowest kept die value, or 0 if no dice were rolled.
    pub fn lowest(&self) -> u32 {
        self.kept().map(|d| d.value).min().unwrap_or(0)
    }

    /// The first kept die with the given number of sides.
    pub fn natural(&self, sides: u32) -> Option<u32> {
        self.kept().find(|d| d.sides == sides).map(|d| d.value)
    }

    /// True when the kept d20 shows a natural 20.
    pub fn is_critical(&self) -> bool {
        self.natural(20) == Some(20)
    }

    /// True when the kept d20 shows a natural 1.
    pub fn is_fumble(&self) -> bool {
        self.natural(20) == Some(1)
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.dropped {
                    format!("~{}~", d.value)
                } else {
                    d.value.to_string()
                }
            })
            .collect();
        write!(f, "{} [{}] = {}", self.formula, values.join(", "), self.total)
    }
}
