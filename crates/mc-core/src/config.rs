//! System-wide configuration for MythCraft rules.
//!
//! Every rule function takes a `&SystemConfig` explicitly; there is no global
//! settings store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::damage::DamageType;
use crate::error::CoreResult;

/// How a critical hit changes a damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalRule {
    /// Multiply the dice count of every damage part; flat bonuses are added once.
    #[default]
    DoubleDice,
    /// Wrap the whole damage formula and multiply its total.
    MultiplyTotal,
}

/// Tunable values used by the roll helpers and the action economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Damage type assigned to parts that carry no label.
    pub fallback_damage_type: DamageType,
    /// Multiplier applied on a critical hit.
    pub critical_multiplier: u32,
    /// Which critical-hit rule to apply.
    pub critical_rule: CriticalRule,
    /// Action point cost of a weapon attack that does not set its own.
    pub weapon_action_cost: u32,
    /// Action point cost of a spell that does not set its own.
    pub spell_action_cost: u32,
    /// Spell point cost of a spell that does not set its own.
    pub spell_point_cost: u32,
    /// Proficiency bonus added to proficient attacks and skills.
    pub proficiency_bonus: i32,
    /// Standard action point costs by action name.
    pub action_costs: BTreeMap<String, u32>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let action_costs = [
            ("cantrip", 1),
            ("melee", 2),
            ("ranged", 2),
            ("spell", 3),
            ("move", 1),
            ("dash", 2),
            ("defend", 1),
            ("ready", 1),
        ]
        .into_iter()
        .map(|(name, cost)| (name.to_string(), cost))
        .collect();

        Self {
            fallback_damage_type: DamageType::Bludgeoning,
            critical_multiplier: 2,
            critical_rule: CriticalRule::DoubleDice,
            weapon_action_cost: 2,
            spell_action_cost: 3,
            spell_point_cost: 1,
            proficiency_bonus: 0,
            action_costs,
        }
    }
}

impl SystemConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the fallback damage type.
    pub fn with_fallback_damage_type(mut self, damage_type: DamageType) -> Self {
        self.fallback_damage_type = damage_type;
        self
    }

    /// Set the critical multiplier (at least 1).
    pub fn with_critical_multiplier(mut self, multiplier: u32) -> Self {
        self.critical_multiplier = multiplier.max(1);
        self
    }

    /// Set the critical-hit rule.
    pub fn with_critical_rule(mut self, rule: CriticalRule) -> Self {
        self.critical_rule = rule;
        self
    }

    /// Set the proficiency bonus.
    pub fn with_proficiency_bonus(mut self, bonus: i32) -> Self {
        self.proficiency_bonus = bonus;
        self
    }

    /// The standard cost of a named action, if it has one.
    pub fn action_cost(&self, action: &str) -> Option<u32> {
        self.action_costs.get(&action.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SystemConfig::default();
        assert_eq!(cfg.fallback_damage_type, DamageType::Bludgeoning);
        assert_eq!(cfg.critical_multiplier, 2);
        assert_eq!(cfg.weapon_action_cost, 2);
        assert_eq!(cfg.spell_action_cost, 3);
        assert_eq!(cfg.spell_point_cost, 1);
    }

    #[test]
    fn builder_methods() {
        let cfg = SystemConfig::default()
            .with_critical_multiplier(3)
            .with_critical_rule(CriticalRule::MultiplyTotal)
            .with_fallback_damage_type(DamageType::Fire)
            .with_proficiency_bonus(2);
        assert_eq!(cfg.critical_multiplier, 3);
        assert_eq!(cfg.critical_rule, CriticalRule::MultiplyTotal);
        assert_eq!(cfg.fallback_damage_type, DamageType::Fire);
        assert_eq!(cfg.proficiency_bonus, 2);
    }

    #[test]
    fn critical_multiplier_clamped() {
        let cfg = SystemConfig::default().with_critical_multiplier(0);
        assert_eq!(cfg.critical_multiplier, 1);
    }

    #[test]
    fn action_cost_lookup() {
        let cfg = SystemConfig::default();
        assert_eq!(cfg.action_cost("Dash"), Some(2));
        assert_eq!(cfg.action_cost("spell"), Some(3));
        assert_eq!(cfg.action_cost("dance"), None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SystemConfig::from_json_str(
            r#"{"critical_rule": "multiply_total", "fallback_damage_type": "piercing"}"#,
        )
        .unwrap();
        assert_eq!(cfg.critical_rule, CriticalRule::MultiplyTotal);
        assert_eq!(cfg.fallback_damage_type, DamageType::Piercing);
        assert_eq!(cfg.weapon_action_cost, 2);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(SystemConfig::from_json_str(r#"{"critical_multiplier": "lots"}"#).is_err());
    }
}
