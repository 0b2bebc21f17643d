//! Damage types and the `(expression, type)` parts that make up a damage roll.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A kind of damage. Extensible via `Custom(String)` for labels outside the
/// standard table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DamageType {
    /// Blunt force.
    #[default]
    Bludgeoning,
    /// Puncturing.
    Piercing,
    /// Cutting.
    Slashing,
    /// Flame and heat.
    Fire,
    /// Frost.
    Cold,
    /// Electricity.
    Lightning,
    /// Corrosion.
    Acid,
    /// Toxins.
    Poison,
    /// Mind-rending force.
    Psychic,
    /// Life-draining energy.
    Necrotic,
    /// Holy light.
    Radiant,
    /// Any other label, stored lowercase.
    Custom(String),
}

impl DamageType {
    /// The standard damage types in table order.
    pub const STANDARD: [DamageType; 11] = [
        Self::Bludgeoning,
        Self::Piercing,
        Self::Slashing,
        Self::Fire,
        Self::Cold,
        Self::Lightning,
        Self::Acid,
        Self::Poison,
        Self::Psychic,
        Self::Necrotic,
        Self::Radiant,
    ];

    /// The lowercase label (`"slashing"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bludgeoning => "bludgeoning",
            Self::Piercing => "piercing",
            Self::Slashing => "slashing",
            Self::Fire => "fire",
            Self::Cold => "cold",
            Self::Lightning => "lightning",
            Self::Acid => "acid",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Necrotic => "necrotic",
            Self::Radiant => "radiant",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(Self::STANDARD
            .into_iter()
            .find(|t| t.as_str() == lower)
            .unwrap_or(Self::Custom(lower)))
    }
}

impl From<String> for DamageType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<DamageType> for String {
    fn from(t: DamageType) -> Self {
        t.as_str().to_string()
    }
}

/// One `(dice expression, damage type)` entry of a weapon or spell.
///
/// Serialized as a two-element array, `["2d6", "slashing"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, DamageType)", into = "(String, DamageType)")]
pub struct DamagePart {
    /// The dice expression, e.g. `2d6` or `1d4+1`.
    pub formula: String,
    /// The damage type rolled by this part.
    pub damage_type: DamageType,
}

impl DamagePart {
    /// Create a damage part.
    pub fn new(formula: impl Into<String>, damage_type: DamageType) -> Self {
        Self {
            formula: formula.into(),
            damage_type,
        }
    }
}

impl From<(String, DamageType)> for DamagePart {
    fn from((formula, damage_type): (String, DamageType)) -> Self {
        Self {
            formula,
            damage_type,
        }
    }
}

impl From<DamagePart> for (String, DamageType) {
    fn from(part: DamagePart) -> Self {
        (part.formula, part.damage_type)
    }
}

impl fmt::Display for DamagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formula, self.damage_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_and_custom() {
        assert_eq!("Fire".parse::<DamageType>().unwrap(), DamageType::Fire);
        assert_eq!(
            "Force".parse::<DamageType>().unwrap(),
            DamageType::Custom("force".to_string())
        );
    }

    #[test]
    fn damage_part_serializes_as_pair() {
        let part = DamagePart::new("2d6", DamageType::Slashing);
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(json, r#"["2d6","slashing"]"#);
    }

    #[test]
    fn damage_parts_deserialize_from_pairs() {
        let parts: Vec<DamagePart> =
            serde_json::from_str(r#"[["1d8","piercing"],["1d4","thunder"]]"#).unwrap();
        assert_eq!(parts[0], DamagePart::new("1d8", DamageType::Piercing));
        assert_eq!(parts[1].damage_type, DamageType::Custom("thunder".into()));
    }

    #[test]
    fn display() {
        assert_eq!(DamagePart::new("1d4", DamageType::Fire).to_string(), "1d4 fire");
    }
}
