use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::{Attribute, AttributeScore, Attributes};
use crate::error::CoreResult;
use crate::item::{Item, ItemId, MagicSource};
use crate::resource::{ActionPoints, Track};

/// Unique identifier for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Whether an actor is a player character or an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// A player character.
    #[default]
    Character,
    /// A non-player character or creature.
    Npc,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Npc => write!(f, "npc"),
        }
    }
}

/// A character or NPC with its attributes, resources, and owned items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    #[serde(default)]
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Character or NPC.
    #[serde(rename = "type", default)]
    pub kind: ActorKind,
    /// Attribute scores.
    #[serde(default)]
    pub attributes: Attributes,
    /// Hit points.
    #[serde(default)]
    pub health: Track,
    /// Per-turn action points.
    #[serde(default)]
    pub action_points: ActionPoints,
    /// Spell points, for actors that cast spells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_points: Option<Track>,
    /// Magic traditions this actor can cast from.
    #[serde(default)]
    pub magic_sources: BTreeSet<MagicSource>,
    /// Owned items in sheet order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Actor {
    /// Create an actor with every attribute at zero and default resources.
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            attributes: Attribute::ALL
                .into_iter()
                .map(|a| (a, AttributeScore::default()))
                .collect(),
            health: Track::default(),
            action_points: ActionPoints::default(),
            spell_points: None,
            magic_sources: BTreeSet::new(),
            items: Vec::new(),
        }
    }

    /// Deserialize an actor from JSON and derive its modifiers.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let mut actor: Self = serde_json::from_str(json)?;
        actor.prepare_data();
        Ok(actor)
    }

    /// Serialize the actor as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Re-derive every attribute modifier from its value.
    ///
    /// Must be called after any change to base attribute values.
    pub fn prepare_data(&mut self) {
        for score in self.attributes.values_mut() {
            score.recalculate();
        }
    }

    /// Set an attribute's value and re-derive its modifier.
    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        let score = self.attributes.entry(attribute).or_default();
        score.value = value;
        score.recalculate();
    }

    /// Look up an attribute score.
    pub fn attribute(&self, attribute: Attribute) -> Option<&AttributeScore> {
        self.attributes.get(&attribute)
    }

    /// The roll modifier for an attribute, or 0 if the actor lacks it.
    pub fn attribute_mod(&self, attribute: Attribute) -> i32 {
        self.attribute(attribute).map_or(0, |s| s.modifier)
    }

    /// The base value of an attribute, or 0 if the actor lacks it.
    pub fn attribute_value(&self, attribute: Attribute) -> i32 {
        self.attribute(attribute).map_or(0, |s| s.value)
    }

    /// Add an item, returning its ID.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Find an owned item by ID.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Find an owned item by name (case-insensitive).
    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        let lower = name.to_lowercase();
        self.items.iter().find(|i| i.name.to_lowercase() == lower)
    }

    /// Returns true if the actor can cast spells from `source`.
    pub fn has_magic_source(&self, source: MagicSource) -> bool {
        self.magic_sources.contains(&source)
    }
}
