//! Error types for the mechanics engine.

use mc_core::item::ItemId;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// No damage parts were supplied to build a damage formula from.
    #[error("no damage configured")]
    EmptyFormula,

    /// A formula segment does not start with a dice term.
    #[error("unrecognized dice token: \"{0}\"")]
    UnrecognizedDiceToken(String),

    /// A formula could not be evaluated.
    #[error("invalid formula \"{formula}\": {reason}")]
    InvalidFormula {
        /// The formula as given.
        formula: String,
        /// What went wrong.
        reason: String,
    },

    /// A roll mode string was not recognized.
    #[error("invalid roll mode: {0}")]
    InvalidRollMode(String),

    /// The actor does not have enough action points for the action.
    #[error("not enough action points: need {need}, have {have}")]
    InsufficientActionPoints {
        /// Points required.
        need: u32,
        /// Points available.
        have: u32,
    },

    /// The actor does not have enough spell points for the spell.
    #[error("not enough spell points: need {need}, have {have}")]
    InsufficientSpellPoints {
        /// Points required.
        need: i32,
        /// Points available.
        have: i32,
    },

    /// The actor cannot cast spells from the spell's magic source.
    #[error("{actor} does not have access to {magic_source} magic")]
    MissingMagicSource {
        /// The caster's name.
        actor: String,
        /// The spell's magic source.
        magic_source: String,
    },

    /// An action name has no configured cost.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An attribute referenced by a roll does not exist on the actor.
    #[error("invalid attribute: {0}")]
    UnknownAttribute(String),

    /// No owned item matched the given ID or name.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but is the wrong type for the action.
    #[error("{name} is not a {expected} ({found})")]
    WrongItemKind {
        /// The item's name.
        name: String,
        /// The item type the action needs.
        expected: &'static str,
        /// The item's actual type.
        found: &'static str,
    },

    /// An error from the core data layer.
    #[error(transparent)]
    Core(#[from] mc_core::CoreError),
}

impl MechError {
    /// Build an [`MechError::InvalidFormula`].
    pub fn invalid_formula(formula: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }

    /// Build an [`MechError::ItemNotFound`] from an item ID.
    pub fn item_not_found(id: ItemId) -> Self {
        Self::ItemNotFound(id.to_string())
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
