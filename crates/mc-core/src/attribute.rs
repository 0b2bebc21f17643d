use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the eight MythCraft attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Raw physical power.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Stamina and toughness.
    Endurance,
    /// Reasoning and memory.
    Intelligence,
    /// Perception and intuition.
    Awareness,
    /// Precision and hand-eye control.
    Coordination,
    /// Mental fortitude.
    Willpower,
    /// Force of personality.
    Presence,
}

impl Attribute {
    /// All attributes in sheet order.
    pub const ALL: [Attribute; 8] = [
        Self::Strength,
        Self::Dexterity,
        Self::Endurance,
        Self::Intelligence,
        Self::Awareness,
        Self::Coordination,
        Self::Willpower,
        Self::Presence,
    ];

    /// The lowercase key used in data files and roll data (`"strength"`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Endurance => "endurance",
            Self::Intelligence => "intelligence",
            Self::Awareness => "awareness",
            Self::Coordination => "coordination",
            Self::Willpower => "willpower",
            Self::Presence => "presence",
        }
    }

    /// The human-readable label (`"Strength"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Endurance => "Endurance",
            Self::Intelligence => "Intelligence",
            Self::Awareness => "Awareness",
            Self::Coordination => "Coordination",
            Self::Willpower => "Willpower",
            Self::Presence => "Presence",
        }
    }

    /// The three-letter abbreviation shown on compact sheets (`"STR"`).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Endurance => "END",
            Self::Intelligence => "INT",
            Self::Awareness => "AWR",
            Self::Coordination => "COR",
            Self::Willpower => "WIL",
            Self::Presence => "PRE",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = CoreError;

    /// Parse a key, label, or abbreviation, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == needle || a.abbreviation().to_lowercase() == needle)
            .ok_or_else(|| CoreError::UnknownAttribute(s.to_string()))
    }
}

/// A single attribute score and its derived roll modifier.
///
/// In MythCraft the modifier is the score itself; no curve is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeScore {
    /// The base score.
    pub value: i32,
    /// The roll modifier derived from `value`.
    #[serde(rename = "mod", default)]
    pub modifier: i32,
}

impl AttributeScore {
    /// Create a score with its modifier already derived.
    pub fn new(value: i32) -> Self {
        Self {
            value,
            modifier: value,
        }
    }

    /// Re-derive the modifier after `value` changed.
    pub fn recalculate(&mut self) {
        self.modifier = self.value;
    }
}

/// An actor's attribute mapping.
pub type Attributes = BTreeMap<Attribute, AttributeScore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_keys_labels_and_abbreviations() {
        assert_eq!("strength".parse::<Attribute>().unwrap(), Attribute::Strength);
        assert_eq!("Awareness".parse::<Attribute>().unwrap(), Attribute::Awareness);
        assert_eq!("wil".parse::<Attribute>().unwrap(), Attribute::Willpower);
        assert_eq!(" COR ".parse::<Attribute>().unwrap(), Attribute::Coordination);
        assert!("luck".parse::<Attribute>().is_err());
    }

    #[test]
    fn display_uses_key() {
        assert_eq!(Attribute::Presence.to_string(), "presence");
        assert_eq!(Attribute::Presence.label(), "Presence");
    }

    #[test]
    fn modifier_equals_value() {
        let mut score = AttributeScore::new(3);
        assert_eq!(score.modifier, 3);
        score.value = -1;
        score.recalculate();
        assert_eq!(score.modifier, -1);
    }

    #[test]
    fn score_serializes_mod_field() {
        let json = serde_json::to_string(&AttributeScore::new(2)).unwrap();
        assert_eq!(json, r#"{"value":2,"mod":2}"#);
    }

    #[test]
    fn attribute_map_uses_lowercase_keys() {
        let mut attrs = Attributes::new();
        attrs.insert(Attribute::Dexterity, AttributeScore::new(1));
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"dexterity":{"value":1,"mod":1}}"#);
        let back: Attributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back[&Attribute::Dexterity].value, 1);
    }
}
