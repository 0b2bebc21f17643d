use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::Attribute;
use crate::damage::DamagePart;

/// Unique identifier for an item owned by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The tradition a spell draws on. An actor must have access to a source to
/// cast its spells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MagicSource {
    /// Learned, formulaic magic.
    #[default]
    Arcane,
    /// Magic granted by a deity.
    Divine,
    /// Forbidden or hidden magic.
    Occult,
    /// Magic of nature and the elements.
    Primal,
    /// Power of the mind.
    Psionic,
}

impl MagicSource {
    /// All magic sources in sheet order.
    pub const ALL: [MagicSource; 5] = [
        Self::Arcane,
        Self::Divine,
        Self::Occult,
        Self::Primal,
        Self::Psionic,
    ];

    /// The human-readable label (`"Arcane"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Arcane => "Arcane",
            Self::Divine => "Divine",
            Self::Occult => "Occult",
            Self::Primal => "Primal",
            Self::Psionic => "Psionic",
        }
    }
}

impl fmt::Display for MagicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a weapon is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    /// Hand-to-hand.
    #[default]
    Melee,
    /// Fired from a distance.
    Ranged,
    /// Hurled at the target.
    Thrown,
}

/// Armor weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorType {
    /// Light armor.
    #[default]
    Light,
    /// Medium armor.
    Medium,
    /// Heavy armor.
    Heavy,
    /// A shield.
    Shield,
}

/// Talent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalentType {
    /// General talent.
    #[default]
    General,
    /// Combat talent.
    Combat,
    /// Magic talent.
    Magic,
    /// Skill talent.
    Skill,
    /// Granted by lineage.
    Lineage,
    /// Granted by background.
    Background,
}

impl fmt::Display for TalentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::General => "General",
            Self::Combat => "Combat",
            Self::Magic => "Magic",
            Self::Skill => "Skill",
            Self::Lineage => "Lineage",
            Self::Background => "Background",
        };
        f.write_str(s)
    }
}

/// Whether casting a spell involves a spell attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellAction {
    /// No attack roll.
    #[default]
    Utility,
    /// The caster rolls a spell attack.
    Attack,
}

/// Weapon data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponData {
    /// Melee, ranged, or thrown.
    pub weapon_type: WeaponType,
    /// Attribute added to attack rolls.
    pub attack_attribute: Option<Attribute>,
    /// Attribute added once to damage rolls.
    pub damage_attribute: Option<Attribute>,
    /// Damage parts in roll order.
    pub damage: Vec<DamagePart>,
    /// Action point cost; the system default applies when absent.
    pub action_cost: Option<u32>,
    /// Adds the proficiency bonus to attack rolls.
    pub proficient: bool,
}

/// Armor data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorData {
    /// Weight class.
    pub armor_type: ArmorType,
    /// Bonus granted while equipped.
    pub defense_bonus: i32,
    /// Whether the armor is worn.
    pub equipped: bool,
}

/// General equipment data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentData {
    /// How many are carried.
    pub quantity: u32,
    /// Weight of a single unit.
    pub weight: f64,
}

impl Default for EquipmentData {
    fn default() -> Self {
        Self {
            quantity: 1,
            weight: 0.0,
        }
    }
}

/// Talent data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentData {
    /// Talent category.
    pub talent_type: TalentType,
    /// Benefit lines listed on the talent card.
    pub benefits: Vec<String>,
}

/// Spell data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellData {
    /// Tradition the caster must have access to.
    pub magic_source: MagicSource,
    /// Spell level.
    pub level: u32,
    /// Action point cost; the system default applies when absent.
    pub action_cost: Option<u32>,
    /// Spell point cost; the system default applies when absent.
    pub spell_point_cost: Option<u32>,
    /// Whether casting rolls a spell attack.
    pub action: SpellAction,
    /// Flat bonus on the spell attack roll.
    pub attack_bonus: i32,
    /// Damage parts in roll order.
    pub damage: Vec<DamagePart>,
}

/// Skill data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillData {
    /// Attribute whose value feeds the skill modifier.
    pub governing_attribute: Attribute,
    /// Trained ranks.
    pub ranks: i32,
    /// Miscellaneous bonus.
    pub bonus: i32,
    /// Adds the proficiency bonus to checks.
    pub proficient: bool,
}

impl Default for SkillData {
    fn default() -> Self {
        Self {
            governing_attribute: Attribute::Intelligence,
            ranks: 0,
            bonus: 0,
            proficient: false,
        }
    }
}

/// Feature data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureData {
    /// Where the feature comes from (class, lineage, ...).
    pub source: String,
}

/// The type of an item together with its type-specific data.
///
/// Serialized in the `{"type": "...", "system": {...}}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "lowercase")]
pub enum ItemKind {
    /// A weapon.
    Weapon(WeaponData),
    /// Armor or a shield.
    Armor(ArmorData),
    /// Gear.
    Equipment(EquipmentData),
    /// A talent.
    Talent(TalentData),
    /// A spell.
    Spell(SpellData),
    /// A skill.
    Skill(SkillData),
    /// A class or lineage feature.
    Feature(FeatureData),
}

impl ItemKind {
    /// The lowercase type name (`"weapon"`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Weapon(_) => "weapon",
            Self::Armor(_) => "armor",
            Self::Equipment(_) => "equipment",
            Self::Talent(_) => "talent",
            Self::Spell(_) => "spell",
            Self::Skill(_) => "skill",
            Self::Feature(_) => "feature",
        }
    }
}

/// An item owned by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description shown on chat cards.
    #[serde(default)]
    pub description: String,
    /// Type and type-specific data.
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Create an item with a fresh ID and no description.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The lowercase type name (`"weapon"`).
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Weapon data, if this is a weapon.
    pub fn as_weapon(&self) -> Option<&WeaponData> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    /// Spell data, if this is a spell.
    pub fn as_spell(&self) -> Option<&SpellData> {
        match &self.kind {
            ItemKind::Spell(s) => Some(s),
            _ => None,
        }
    }

    /// Skill data, if this is a skill.
    pub fn as_skill(&self) -> Option<&SkillData> {
        match &self.kind {
            ItemKind::Skill(s) => Some(s),
            _ => None,
        }
    }

    /// Talent data, if this is a talent.
    pub fn as_talent(&self) -> Option<&TalentData> {
        match &self.kind {
            ItemKind::Talent(t) => Some(t),
            _ => None,
        }
    }
}
