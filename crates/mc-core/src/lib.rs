//! Core data records for MythCraft: attributes, resources, items, and actors.
//!
//! This crate holds plain data. The rules that act on it (formula building,
//! dice evaluation, action economy) live in `mc-mechanics`. Every record can
//! be constructed programmatically or deserialized from JSON.

/// Actors (player characters and NPCs) and their identifiers.
pub mod actor;
/// The eight MythCraft attributes and their scores.
pub mod attribute;
/// System-wide configuration values.
pub mod config;
/// Damage types and damage parts.
pub mod damage;
/// Error types used throughout the crate.
pub mod error;
/// Items owned by actors: weapons, armor, spells, skills, and more.
pub mod item;
/// Clamped resource tracks and action points.
pub mod resource;

/// Re-export actor types.
pub use actor::{Actor, ActorId, ActorKind};
/// Re-export attribute types.
pub use attribute::{Attribute, AttributeScore, Attributes};
/// Re-export configuration types.
pub use config::{CriticalRule, SystemConfig};
/// Re-export damage types.
pub use damage::{DamagePart, DamageType};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{Item, ItemId, ItemKind, MagicSource};
/// Re-export resource types.
pub use resource::{ActionPoints, Track};
