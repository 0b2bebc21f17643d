//! Game mechanics for the MythCraft tabletop RPG.
//!
//! Builds dice-roll formulas from character and item data, applies
//! advantage/disadvantage and critical-hit rewrites, evaluates formulas
//! through a pluggable dice engine, and runs the action economy for
//! attacks, spells, skills, talents, and rests. Results are rendered as
//! chat messages.

pub mod actions;
pub mod chat;
pub mod dice;
pub mod error;
pub mod sheet;

pub use actions::{DamageOptions, RestKind, RollOptions, RollRequest, SpellCast};
pub use chat::{ChatMessage, MessageKind, format_modifier};
pub use dice::formula::{
    apply_critical_multiplier, apply_roll_mode, build_check_formula, build_damage_formula,
    build_labelled_damage_formula, multiply_formula, parse_damage_formula,
};
pub use dice::{DiceEngine, DiceTerm, RollData, RollMode, RollOutcome, evaluate};
pub use error::{MechError, MechResult};
pub use sheet::{ItemCategories, categorize_items};
