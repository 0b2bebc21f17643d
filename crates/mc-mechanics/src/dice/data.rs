//! Roll data: the `@path` values a formula may reference.

use std::collections::BTreeMap;

use mc_core::{Actor, Attribute, Item, ItemKind};

/// Flat map of reference paths to numbers, built from an actor and
/// optionally the item being used.
///
/// Each attribute is available as `@strength`, `@strength.value`, and
/// `@strength.mod`; the bare name resolves to the modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollData {
    values: BTreeMap<String, i64>,
}

impl RollData {
    /// Create empty roll data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build roll data from an actor's attributes and resources.
    pub fn from_actor(actor: &Actor) -> Self {
        let mut data = Self::new();
        for attribute in Attribute::ALL {
            let Some(score) = actor.attribute(attribute) else {
                continue;
            };
            let key = attribute.key();
            data.set(key, score.modifier.into());
            data.set(&format!("{key}.value"), score.value.into());
            data.set(&format!("{key}.mod"), score.modifier.into());
        }
        data.set("health.value", actor.health.value.into());
        data.set("health.max", actor.health.max.into());
        data.set("action_points.value", actor.action_points.value.into());
        data.set("action_points.max", actor.action_points.max.into());
        if let Some(sp) = actor.spell_points {
            data.set("spell_points.value", sp.value.into());
            data.set("spell_points.max", sp.max.into());
        }
        data
    }

    /// Add the numeric fields of the item being used under `@item.*`.
    pub fn with_item(mut self, item: &Item) -> Self {
        match &item.kind {
            ItemKind::Weapon(w) => {
                if let Some(cost) = w.action_cost {
                    self.set("item.action_cost", cost.into());
                }
            }
            ItemKind::Spell(s) => {
                self.set("item.level", s.level.into());
                self.set("item.attack_bonus", s.attack_bonus.into());
                if let Some(cost) = s.action_cost {
                    self.set("item.action_cost", cost.into());
                }
            }
            ItemKind::Skill(s) => {
                self.set("item.ranks", s.ranks.into());
                self.set("item.bonus", s.bonus.into());
            }
            ItemKind::Armor(a) => self.set("item.defense_bonus", a.defense_bonus.into()),
            ItemKind::Equipment(e) => self.set("item.quantity", e.quantity.into()),
            ItemKind::Talent(_) | ItemKind::Feature(_) => {}
        }
        self
    }

    /// Set a value.
    pub fn set(&mut self, path: &str, value: i64) {
        self.values.insert(path.to_string(), value);
    }

    /// Look up a value.
    pub fn get(&self, path: &str) -> Option<i64> {
        self.values.get(path).copied()
    }

    /// Replace every `@path` in `formula` with its value.
    ///
    /// Negative values are parenthesized so they stay valid after a `-`.
    /// Unknown paths become `0`.
    pub fn substitute(&self, formula: &str) -> String {
        let mut out = String::with_capacity(formula.len());
        let mut rest = formula;

        while let Some(at) = rest.find('@') {
            out.push_str(&rest[..at]);
            let after = &rest[at + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
                .unwrap_or(after.len());
            let path = after[..len].trim_end_matches('.');
            if path.is_empty() {
                out.push('@');
                rest = after;
                continue;
            }

            match self.get(path) {
                Some(v) if v < 0 => out.push_str(&format!("({v})")),
                Some(v) => out.push_str(&v.to_string()),
                None => {
                    tracing::warn!(path, formula, "unknown roll data reference, using 0");
                    out.push('0');
                }
            }
            rest = &after[path.len()..];
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::item::{SkillData, SpellData};
    use mc_core::{ActorKind, Track};

    fn actor() -> Actor {
        let mut actor = Actor::new("Kael", ActorKind::Character);
        actor.set_attribute(Attribute::Strength, 3);
        actor.set_attribute(Attribute::Awareness, -1);
        actor.health = Track::with_value(7, 12);
        actor
    }

    #[test]
    fn from_actor_exposes_attributes() {
        let data = RollData::from_actor(&actor());
        assert_eq!(data.get("strength"), Some(3));
        assert_eq!(data.get("strength.value"), Some(3));
        assert_eq!(data.get("strength.mod"), Some(3));
        assert_eq!(data.get("health.value"), Some(7));
        assert_eq!(data.get("spell_points.value"), None);
    }

    #[test]
    fn substitute_values() {
        let data = RollData::from_actor(&actor());
        assert_eq!(data.substitute("1d6 + @strength.mod"), "1d6 + 3");
        assert_eq!(data.substitute("1d20+@strength"), "1d20+3");
        assert_eq!(data.substitute("1d20 - @awareness"), "1d20 - (-1)");
    }

    #[test]
    fn substitute_unknown_is_zero() {
        let data = RollData::new();
        assert_eq!(data.substitute("1d6+@luck"), "1d6+0");
    }

    #[test]
    fn substitute_keeps_trailing_period_and_lone_at() {
        let data = RollData::from_actor(&actor());
        assert_eq!(data.substitute("@strength."), "3.");
        assert_eq!(data.substitute("a @ b"), "a @ b");
    }

    #[test]
    fn with_item_adds_item_fields() {
        let spell = Item::new(
            "Spark",
            ItemKind::Spell(SpellData {
                level: 2,
                attack_bonus: 4,
                ..SpellData::default()
            }),
        );
        let data = RollData::new().with_item(&spell);
        assert_eq!(data.get("item.level"), Some(2));
        assert_eq!(data.substitute("1d20 + @item.attack_bonus"), "1d20 + 4");

        let skill = Item::new(
            "Lore",
            ItemKind::Skill(SkillData {
                ranks: 2,
                ..SkillData::default()
            }),
        );
        assert_eq!(RollData::new().with_item(&skill).get("item.ranks"), Some(2));
    }
}
