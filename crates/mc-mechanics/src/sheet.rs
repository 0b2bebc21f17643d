//! Sheet preparation: item buckets and derived skill totals.

use std::collections::BTreeMap;

use mc_core::item::SkillData;
use mc_core::{Actor, Item, ItemKind, MagicSource};

/// A skill item with its computed total modifier.
#[derive(Debug, Clone)]
pub struct SkillEntry<'a> {
    /// The skill item.
    pub item: &'a Item,
    /// Governing attribute value + ranks + bonus.
    pub total_modifier: i32,
}

/// An actor's items sorted into the sections of a character sheet.
///
/// Every bucket preserves the actor's item order.
#[derive(Debug, Clone, Default)]
pub struct ItemCategories<'a> {
    /// Equipment.
    pub gear: Vec<&'a Item>,
    /// Weapons.
    pub weapons: Vec<&'a Item>,
    /// Armor and shields.
    pub armor: Vec<&'a Item>,
    /// Talents.
    pub talents: Vec<&'a Item>,
    /// Class and lineage features.
    pub features: Vec<&'a Item>,
    /// Spells grouped by magic source; every source is present.
    pub spells: BTreeMap<MagicSource, Vec<&'a Item>>,
    /// Skills with their totals.
    pub skills: Vec<SkillEntry<'a>>,
}

impl ItemCategories<'_> {
    /// Total number of spells across every source.
    pub fn spell_count(&self) -> usize {
        self.spells.values().map(Vec::len).sum()
    }
}

/// Sort an actor's items into sheet sections.
pub fn categorize_items(actor: &Actor) -> ItemCategories<'_> {
    let mut categories = ItemCategories {
        spells: MagicSource::ALL.into_iter().map(|s| (s, Vec::new())).collect(),
        ..ItemCategories::default()
    };

    for item in &actor.items {
        match &item.kind {
            ItemKind::Equipment(_) => categories.gear.push(item),
            ItemKind::Weapon(_) => categories.weapons.push(item),
            ItemKind::Armor(_) => categories.armor.push(item),
            ItemKind::Talent(_) => categories.talents.push(item),
            ItemKind::Feature(_) => categories.features.push(item),
            ItemKind::Spell(spell) => categories
                .spells
                .entry(spell.magic_source)
                .or_default()
                .push(item),
            ItemKind::Skill(skill) => categories.skills.push(SkillEntry {
                item,
                total_modifier: skill_total(actor, skill),
            }),
        }
    }

    categories
}

/// A skill's total modifier: governing attribute value + ranks + bonus.
///
/// The proficiency bonus is not included; it applies only when rolling.
pub fn skill_total(actor: &Actor, skill: &SkillData) -> i32 {
    actor.attribute_value(skill.governing_attribute) + skill.ranks + skill.bonus
}
