//! Roll helpers and the action economy.
//!
//! Each helper builds a [`RollRequest`] (formula plus flavor) from actor and
//! item data. Helpers that cost resources check them first and only spend
//! them when the roll is not a preview. Evaluating the request is left to
//! the caller so any [`DiceEngine`] can be used.

use mc_core::item::{SpellAction, SpellData, WeaponData};
use mc_core::{Actor, Attribute, CriticalRule, DamagePart, DamageType, Item, ItemId, SystemConfig};
use serde::{Deserialize, Serialize};

use crate::chat::{self, ChatMessage};
use crate::dice::formula::{
    apply_critical_multiplier, build_check_formula, build_labelled_damage_formula,
    multiply_formula,
};
use crate::dice::{DiceEngine, RollData, RollMode, RollOutcome, evaluate};
use crate::error::{MechError, MechResult};

/// Attribute used for weapon attack and damage rolls when the weapon names none.
pub const DEFAULT_WEAPON_ATTRIBUTE: Attribute = Attribute::Strength;

/// Options shared by every d20 roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollOptions {
    /// Normal, advantage, or disadvantage.
    pub mode: RollMode,
    /// Situational bonus added to the modifier.
    pub bonus: i32,
    /// Build the roll without spending any resources.
    pub preview: bool,
}

impl RollOptions {
    /// Set the roll mode.
    pub fn with_mode(mut self, mode: RollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the situational bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Mark the roll as a preview.
    pub fn as_preview(mut self) -> Self {
        self.preview = true;
        self
    }
}

/// Options for damage rolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOptions {
    /// Apply the configured critical-hit rule.
    pub critical: bool,
}

/// A formula ready to roll, with the label shown in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Dice formula with every `@reference` already substituted.
    pub formula: String,
    /// Chat label, e.g. `"Longsword - Attack Roll"`.
    pub flavor: String,
}

impl RollRequest {
    /// Create a request.
    pub fn new(formula: impl Into<String>, flavor: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            flavor: flavor.into(),
        }
    }

    /// Evaluate the formula.
    pub fn roll<E: DiceEngine + ?Sized>(&self, engine: &mut E) -> MechResult<RollOutcome> {
        evaluate(&self.formula, engine)
    }

    /// Evaluate the formula and wrap the outcome in a chat message.
    pub fn to_message<E: DiceEngine + ?Sized>(
        &self,
        speaker: &str,
        engine: &mut E,
    ) -> MechResult<ChatMessage> {
        let outcome = self.roll(engine)?;
        Ok(chat::roll_message(speaker, self, &outcome))
    }
}

/// Short or long rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestKind {
    /// Restores action points.
    Short,
    /// Restores health and action points, and clears carried action points.
    Long,
}

impl RestKind {
    /// Chat label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short Rest",
            Self::Long => "Long Rest",
        }
    }
}

/// The result of casting a spell.
#[derive(Debug, Clone)]
pub struct SpellCast {
    /// The spell attack roll, for attack spells.
    pub attack: Option<RollRequest>,
    /// One damage roll per damage part, in order.
    pub damage: Vec<RollRequest>,
    /// The spell card.
    pub card: ChatMessage,
    /// Action points spent (or that would be spent, for a preview).
    pub action_cost: u32,
    /// Spell points spent, when the caster tracks them.
    pub spell_point_cost: Option<u32>,
}

/// Spend action points.
///
/// Fails without touching the actor when fewer than `cost` points remain.
/// Returns the remaining points.
pub fn spend_action_points(actor: &mut Actor, cost: u32) -> MechResult<u32> {
    check_action_points(actor, cost)?;
    Ok(actor.action_points.deduct(cost))
}

/// Spend the cost of a named action, or a plain number of points.
///
/// `action` is either a non-negative count (`"2"`) or a name looked up in
/// [`SystemConfig::action_costs`]. Returns the points spent and the points
/// remaining.
pub fn spend_action(
    actor: &mut Actor,
    action: &str,
    config: &SystemConfig,
) -> MechResult<(u32, u32)> {
    let action = action.trim();
    let cost = match action.parse::<u32>() {
        Ok(n) => n,
        Err(_) => config
            .action_cost(action)
            .ok_or_else(|| MechError::UnknownAction(action.to_string()))?,
    };
    let remaining = spend_action_points(actor, cost)?;
    tracing::debug!(actor = %actor.name, action, cost, remaining, "spent action points");
    Ok((cost, remaining))
}

/// Restore resources after a rest and return the rest notice.
pub fn rest(actor: &mut Actor, kind: RestKind) -> ChatMessage {
    match kind {
        RestKind::Short => actor.action_points.refill(),
        RestKind::Long => {
            actor.health.refill();
            actor.action_points.refill();
            actor.action_points.carried = 0;
        }
    }
    tracing::debug!(actor = %actor.name, ?kind, "rested");
    chat::rest_message(actor, kind)
}

/// A d20 check using an attribute's modifier.
pub fn attribute_check(
    actor: &Actor,
    attribute: Attribute,
    options: &RollOptions,
) -> MechResult<RollRequest> {
    let score = actor
        .attribute(attribute)
        .ok_or_else(|| MechError::UnknownAttribute(attribute.key().to_string()))?;
    Ok(RollRequest::new(
        build_check_formula(score.modifier + options.bonus, options.mode),
        format!("{} Check", attribute.label()),
    ))
}

/// A skill check: governing attribute value + ranks + bonus, plus the
/// proficiency bonus for proficient skills.
pub fn skill_check(
    actor: &Actor,
    skill_id: ItemId,
    options: &RollOptions,
    config: &SystemConfig,
) -> MechResult<RollRequest> {
    let item = find_item(actor, skill_id)?;
    let skill = item.as_skill().ok_or_else(|| wrong_kind(item, "skill"))?;

    let mut modifier = crate::sheet::skill_total(actor, skill) + options.bonus;
    if skill.proficient {
        modifier += config.proficiency_bonus;
    }
    Ok(RollRequest::new(
        build_check_formula(modifier, options.mode),
        format!("{} Skill Check", item.name),
    ))
}

/// An initiative roll, using awareness.
pub fn initiative(actor: &Actor, options: &RollOptions) -> RollRequest {
    let modifier = actor.attribute_mod(Attribute::Awareness) + options.bonus;
    RollRequest::new(build_check_formula(modifier, options.mode), "Initiative")
}

/// A weapon attack roll. Spends the weapon's action point cost unless previewing.
pub fn weapon_attack(
    actor: &mut Actor,
    weapon_id: ItemId,
    options: &RollOptions,
    config: &SystemConfig,
) -> MechResult<RollRequest> {
    let (name, weapon) = weapon_data(actor, weapon_id)?;
    let cost = weapon.action_cost.unwrap_or(config.weapon_action_cost);
    check_action_points(actor, cost)?;

    let attribute = weapon.attack_attribute.unwrap_or(DEFAULT_WEAPON_ATTRIBUTE);
    let mut modifier = actor.attribute_mod(attribute) + options.bonus;
    if weapon.proficient {
        modifier += config.proficiency_bonus;
    }

    if !options.preview {
        spend_action_points(actor, cost)?;
    }
    Ok(RollRequest::new(
        build_check_formula(modifier, options.mode),
        format!("{name} - Attack Roll"),
    ))
}

/// A weapon damage roll.
///
/// Weapons without damage parts deal `1d6` bludgeoning. The damage
/// attribute's modifier is added once to the whole roll.
pub fn weapon_damage(
    actor: &Actor,
    weapon_id: ItemId,
    options: &DamageOptions,
    config: &SystemConfig,
) -> MechResult<RollRequest> {
    let item = find_item(actor, weapon_id)?;
    let weapon = item.as_weapon().ok_or_else(|| wrong_kind(item, "weapon"))?;

    let parts = if weapon.damage.iter().all(|p| p.formula.trim().is_empty()) {
        vec![DamagePart::new("1d6", DamageType::Bludgeoning)]
    } else {
        weapon.damage.clone()
    };
    let attribute = weapon.damage_attribute.unwrap_or(DEFAULT_WEAPON_ATTRIBUTE);
    let bonus = actor.attribute_mod(attribute);

    let formula = match (options.critical, config.critical_rule) {
        (false, _) => build_labelled_damage_formula(&parts, bonus)?,
        (true, CriticalRule::DoubleDice) => build_labelled_damage_formula(
            &apply_critical_multiplier(&parts, config.critical_multiplier),
            bonus,
        )?,
        (true, CriticalRule::MultiplyTotal) => multiply_formula(
            &build_labelled_damage_formula(&parts, bonus)?,
            config.critical_multiplier,
        ),
    };

    let data = RollData::from_actor(actor).with_item(item);
    let flavor = if options.critical {
        format!("{} - Critical Damage Roll", item.name)
    } else {
        format!("{} - Damage Roll", item.name)
    };
    Ok(RollRequest::new(data.substitute(&formula), flavor))
}

/// Cast a spell.
///
/// The caster must have access to the spell's magic source and enough
/// action points, and enough spell points if they track them. Costs are
/// spent unless previewing.
pub fn cast_spell(
    actor: &mut Actor,
    spell_id: ItemId,
    options: &RollOptions,
    config: &SystemConfig,
) -> MechResult<SpellCast> {
    let item = find_item(actor, spell_id)?.clone();
    let spell: &SpellData = item.as_spell().ok_or_else(|| wrong_kind(&item, "spell"))?;

    if !actor.has_magic_source(spell.magic_source) {
        tracing::warn!(actor = %actor.name, source = %spell.magic_source, "missing magic source");
        return Err(MechError::MissingMagicSource {
            actor: actor.name.clone(),
            magic_source: spell.magic_source.to_string(),
        });
    }

    let action_cost = spell.action_cost.unwrap_or(config.spell_action_cost);
    check_action_points(actor, action_cost)?;

    let spell_point_cost = match actor.spell_points {
        Some(sp) => {
            let cost = spell.spell_point_cost.unwrap_or(config.spell_point_cost);
            let need = i32::try_from(cost).unwrap_or(i32::MAX);
            if sp.value < need {
                tracing::warn!(
                    actor = %actor.name,
                    need,
                    have = sp.value,
                    "not enough spell points"
                );
                return Err(MechError::InsufficientSpellPoints {
                    need,
                    have: sp.value,
                });
            }
            Some(cost)
        }
        None => None,
    };

    if !options.preview {
        spend_action_points(actor, action_cost)?;
        if let (Some(sp), Some(cost)) = (actor.spell_points.as_mut(), spell_point_cost) {
            sp.adjust(-i32::try_from(cost).unwrap_or(i32::MAX));
        }
    }

    let data = RollData::from_actor(actor).with_item(&item);
    let attack = (spell.action == SpellAction::Attack).then(|| {
        RollRequest::new(
            build_check_formula(spell.attack_bonus + options.bonus, options.mode),
            format!("{} - Spell Attack", item.name),
        )
    });
    let damage = spell
        .damage
        .iter()
        .filter(|part| !part.formula.trim().is_empty())
        .map(|part| {
            RollRequest::new(
                data.substitute(part.formula.trim()),
                format!("{} - Damage ({})", item.name, part.damage_type),
            )
        })
        .collect();

    let card = chat::spell_card(actor, &item, spell, action_cost, spell_point_cost);
    tracing::debug!(
        actor = %actor.name,
        spell = %item.name,
        preview = options.preview,
        "cast spell"
    );
    Ok(SpellCast {
        attack,
        damage,
        card,
        action_cost,
        spell_point_cost,
    })
}

/// Use a talent, producing its card.
pub fn use_talent(actor: &Actor, talent_id: ItemId) -> MechResult<ChatMessage> {
    let item = find_item(actor, talent_id)?;
    let talent = item.as_talent().ok_or_else(|| wrong_kind(item, "talent"))?;
    Ok(chat::talent_card(actor, item, talent))
}

fn find_item(actor: &Actor, id: ItemId) -> MechResult<&Item> {
    actor.item(id).ok_or_else(|| MechError::item_not_found(id))
}

fn wrong_kind(item: &Item, expected: &'static str) -> MechError {
    MechError::WrongItemKind {
        name: item.name.clone(),
        expected,
        found: item.type_name(),
    }
}

fn weapon_data(actor: &Actor, id: ItemId) -> MechResult<(String, WeaponData)> {
    let item = find_item(actor, id)?;
    let weapon = item.as_weapon().ok_or_else(|| wrong_kind(item, "weapon"))?;
    Ok((item.name.clone(), weapon.clone()))
}

fn check_action_points(actor: &Actor, cost: u32) -> MechResult<()> {
    let have = actor.action_points.value;
    if actor.action_points.can_afford(cost) {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.name, need = cost, have, "not enough action points");
        Err(MechError::InsufficientActionPoints { need: cost, have })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::item::{SkillData, TalentData};
    use mc_core::{ActorKind, ItemKind, MagicSource, Track};

    fn fighter() -> (Actor, ItemId) {
        let mut actor = Actor::new("Kael", ActorKind::Character);
        actor.set_attribute(Attribute::Strength, 3);
        actor.set_attribute(Attribute::Awareness, 2);
        let sword = actor.add_item(Item::new(
            "Longsword",
            ItemKind::Weapon(WeaponData {
                damage: vec![
                    DamagePart::new("2d6", DamageType::Slashing),
                    DamagePart::new("1d4", DamageType::Fire),
                ],
                ..WeaponData::default()
            }),
        ));
        (actor, sword)
    }

    fn caster(source: MagicSource) -> (Actor, ItemId) {
        let mut actor = Actor::new("Mira", ActorKind::Character);
        actor.magic_sources.insert(MagicSource::Arcane);
        actor.spell_points = Some(Track::new(4));
        let spell = actor.add_item(Item::new(
            "Firebolt",
            ItemKind::Spell(SpellData {
                magic_source: source,
                action: SpellAction::Attack,
                attack_bonus: 4,
                damage: vec![DamagePart::new("2d10", DamageType::Fire)],
                ..SpellData::default()
            }),
        ));
        (actor, spell)
    }

    #[test]
    fn spend_deducts() {
        let (mut actor, _) = fighter();
        assert_eq!(spend_action_points(&mut actor, 2).unwrap(), 4);
        assert_eq!(actor.action_points.value, 4);
    }

    #[test]
    fn spend_refuses_without_mutation() {
        let (mut actor, _) = fighter();
        actor.action_points.value = 1;
        let err = spend_action_points(&mut actor, 2).unwrap_err();
        assert!(matches!(
            err,
            MechError::InsufficientActionPoints { need: 2, have: 1 }
        ));
        assert_eq!(actor.action_points.value, 1);
    }

    #[test]
    fn short_and_long_rest() {
        let (mut actor, _) = fighter();
        actor.action_points.value = 0;
        actor.action_points.carried = 2;
        actor.health.value = 3;

        let msg = rest(&mut actor, RestKind::Short);
        assert_eq!(msg.flavor, "Short Rest");
        assert_eq!(actor.action_points.value, 6);
        assert_eq!(actor.health.value, 3);
        assert_eq!(actor.action_points.carried, 2);

        rest(&mut actor, RestKind::Long);
        assert_eq!(actor.health.value, actor.health.max);
        assert_eq!(actor.action_points.carried, 0);
    }

    #[test]
    fn attribute_check_formula() {
        let (actor, _) = fighter();
        let req = attribute_check(&actor, Attribute::Strength, &RollOptions::default()).unwrap();
        assert_eq!(req.formula, "1d20+3");
        assert_eq!(req.flavor, "Strength Check");

        let opts = RollOptions::default()
            .with_mode(RollMode::Disadvantage)
            .with_bonus(-4);
        let req = attribute_check(&actor, Attribute::Strength, &opts).unwrap();
        assert_eq!(req.formula, "2d20kl1-1");
    }

    #[test]
    fn attribute_check_missing_attribute() {
        let mut actor = Actor::new("Blank", ActorKind::Npc);
        actor.attributes.clear();
        let err =
            attribute_check(&actor, Attribute::Presence, &RollOptions::default()).unwrap_err();
        assert!(matches!(err, MechError::UnknownAttribute(a) if a == "presence"));
    }

    #[test]
    fn initiative_uses_awareness() {
        let (actor, _) = fighter();
        let req = initiative(&actor, &RollOptions::default().with_mode(RollMode::Advantage));
        assert_eq!(req.formula, "2d20kh1+2");
        assert_eq!(req.flavor, "Initiative");
    }

    #[test]
    fn skill_check_totals() {
        let (mut actor, _) = fighter();
        actor.set_attribute(Attribute::Dexterity, 1);
        let id = actor.add_item(Item::new(
            "Stealth",
            ItemKind::Skill(SkillData {
                governing_attribute: Attribute::Dexterity,
                ranks: 2,
                bonus: 1,
                proficient: true,
            }),
        ));
        let config = SystemConfig::default().with_proficiency_bonus(2);
        let req = skill_check(&actor, id, &RollOptions::default(), &config).unwrap();
        assert_eq!(req.formula, "1d20+6");
        assert_eq!(req.flavor, "Stealth Skill Check");
    }

    #[test]
    fn attack_spends_action_points() {
        let (mut actor, sword) = fighter();
        let req =
            weapon_attack(&mut actor, sword, &RollOptions::default(), &SystemConfig::default())
                .unwrap();
        assert_eq!(req.formula, "1d20+3");
        assert_eq!(req.flavor, "Longsword - Attack Roll");
        assert_eq!(actor.action_points.value, 4);
    }

    #[test]
    fn attack_preview_spends_nothing() {
        let (mut actor, sword) = fighter();
        let opts = RollOptions::default().as_preview();
        weapon_attack(&mut actor, sword, &opts, &SystemConfig::default()).unwrap();
        assert_eq!(actor.action_points.value, 6);
    }

    #[test]
    fn attack_refused_without_action_points() {
        let (mut actor, sword) = fighter();
        actor.action_points.value = 1;
        let err = weapon_attack(
            &mut actor,
            sword,
            &RollOptions::default(),
            &SystemConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MechError::InsufficientActionPoints { need: 2, have: 1 }));
        assert_eq!(actor.action_points.value, 1);
    }

    #[test]
    fn attack_with_wrong_item() {
        let (mut actor, _) = fighter();
        let talent = actor.add_item(Item::new("Tough", ItemKind::Talent(TalentData::default())));
        let err = weapon_attack(
            &mut actor,
            talent,
            &RollOptions::default(),
            &SystemConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MechError::WrongItemKind { expected: "weapon", found: "talent", .. }
        ));
        let err = weapon_attack(
            &mut actor,
            ItemId::new(),
            &RollOptions::default(),
            &SystemConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MechError::ItemNotFound(_)));
    }

    #[test]
    fn spend_named_and_numeric_actions() {
        let (mut actor, _) = fighter();
        let config = SystemConfig::default();
        assert_eq!(spend_action(&mut actor, "Dash", &config).unwrap(), (2, 4));
        assert_eq!(spend_action(&mut actor, "1", &config).unwrap(), (1, 3));

        assert!(matches!(
            spend_action(&mut actor, "dance", &config),
            Err(MechError::UnknownAction(name)) if name == "dance"
        ));
        assert_eq!(spend_action(&mut actor, "spell", &config).unwrap(), (3, 0));
        assert!(matches!(
            spend_action(&mut actor, "move", &config),
            Err(MechError::InsufficientActionPoints { need: 1, have: 0 })
        ));
        assert_eq!(actor.action_points.value, 0);
    }

    #[test]
    fn damage_adds_attribute_once() {
        let (actor, sword) = fighter();
        let req =
            weapon_damage(&actor, sword, &DamageOptions::default(), &SystemConfig::default())
                .unwrap();
        assert_eq!(req.formula, "2d6[slashing] + 1d4[fire] + 3");
        assert_eq!(req.flavor, "Longsword - Damage Roll");
    }

    #[test]
    fn critical_damage_doubles_dice() {
        let (actor, sword) = fighter();
        let opts = DamageOptions { critical: true };
        let req = weapon_damage(&actor, sword, &opts, &SystemConfig::default()).unwrap();
        assert_eq!(req.formula, "4d6[slashing] + 2d4[fire] + 3");

        let config = SystemConfig::default().with_critical_rule(CriticalRule::MultiplyTotal);
        let req = weapon_damage(&actor, sword, &opts, &config).unwrap();
        assert_eq!(req.formula, "(2d6[slashing] + 1d4[fire] + 3) * 2");
    }

    #[test]
    fn damage_with_custom_labels_rolls_dice_only() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let (mut actor, _) = fighter();
        let labels = ["tier-3", "fire+1", "cold-iron", "dragon's breath", "fire2", "odd]label"];
        let relic = actor.add_item(Item::new(
            "Relic",
            ItemKind::Weapon(WeaponData {
                damage: labels
                    .iter()
                    .map(|l| DamagePart::new("1d6", DamageType::Custom((*l).to_string())))
                    .collect(),
                ..WeaponData::default()
            }),
        ));
        let req =
            weapon_damage(&actor, relic, &DamageOptions::default(), &SystemConfig::default())
                .unwrap();

        let outcome = req.roll(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(outcome.dice.len(), labels.len());
        let dice: i64 = outcome.dice.iter().map(|d| i64::from(d.value)).sum();
        assert_eq!(outcome.total, dice + 3);
    }

    #[test]
    fn damage_defaults_to_bludgeoning() {
        let (mut actor, _) = fighter();
        let club = actor.add_item(Item::new("Club", ItemKind::Weapon(WeaponData::default())));
        let req =
            weapon_damage(&actor, club, &DamageOptions::default(), &SystemConfig::default())
                .unwrap();
        assert_eq!(req.formula, "1d6[bludgeoning] + 3");
    }

    #[test]
    fn damage_substitutes_references() {
        let (mut actor, _) = fighter();
        let axe = actor.add_item(Item::new(
            "Axe",
            ItemKind::Weapon(WeaponData {
                damage: vec![DamagePart::new("1d8 + @strength.value", DamageType::Slashing)],
                damage_attribute: Some(Attribute::Awareness),
                ..WeaponData::default()
            }),
        ));
        let req =
            weapon_damage(&actor, axe, &DamageOptions::default(), &SystemConfig::default())
                .unwrap();
        assert_eq!(req.formula, "1d8 + 3[slashing] + 2");
    }

    #[test]
    fn cast_spends_both_pools() {
        let (mut actor, spell) = caster(MagicSource::Arcane);
        let cast = cast_spell(&mut actor, spell, &RollOptions::default(), &SystemConfig::default())
            .unwrap();
        assert_eq!(actor.action_points.value, 3);
        assert_eq!(actor.spell_points.map(|sp| sp.value), Some(3));
        assert_eq!(cast.action_cost, 3);
        assert_eq!(cast.spell_point_cost, Some(1));

        let attack = cast.attack.unwrap();
        assert_eq!(attack.formula, "1d20+4");
        assert_eq!(attack.flavor, "Firebolt - Spell Attack");
        assert_eq!(cast.damage, vec![RollRequest::new("2d10", "Firebolt - Damage (fire)")]);
        assert_eq!(cast.card.flavor, "Casts Firebolt");
    }

    #[test]
    fn cast_requires_magic_source() {
        let (mut actor, spell) = caster(MagicSource::Divine);
        let err = cast_spell(&mut actor, spell, &RollOptions::default(), &SystemConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Mira does not have access to Divine magic");
        assert_eq!(actor.action_points.value, 6);
    }

    #[test]
    fn cast_requires_spell_points() {
        let (mut actor, spell) = caster(MagicSource::Arcane);
        actor.spell_points = Some(Track::with_value(0, 4));
        let err = cast_spell(&mut actor, spell, &RollOptions::default(), &SystemConfig::default())
            .unwrap_err();
        assert!(matches!(err, MechError::InsufficientSpellPoints { need: 1, have: 0 }));
        assert_eq!(actor.action_points.value, 6);
    }

    #[test]
    fn cast_without_spell_point_pool() {
        let (mut actor, spell) = caster(MagicSource::Arcane);
        actor.spell_points = None;
        let cast = cast_spell(&mut actor, spell, &RollOptions::default(), &SystemConfig::default())
            .unwrap();
        assert_eq!(cast.spell_point_cost, None);
        assert_eq!(actor.action_points.value, 3);
    }

    #[test]
    fn cast_preview_spends_nothing() {
        let (mut actor, spell) = caster(MagicSource::Arcane);
        let opts = RollOptions::default().as_preview();
        cast_spell(&mut actor, spell, &opts, &SystemConfig::default()).unwrap();
        assert_eq!(actor.action_points.value, 6);
        assert_eq!(actor.spell_points.map(|sp| sp.value), Some(4));
    }

    #[test]
    fn talent_card() {
        let (mut actor, _) = fighter();
        let id = actor.add_item(Item::new("Tough", ItemKind::Talent(TalentData::default())));
        let msg = use_talent(&actor, id).unwrap();
        assert_eq!(msg.flavor, "Uses Tough");
    }

    #[test]
    fn request_rolls_through_engine() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let request = RollRequest::new("1d20+3", "Strength Check");
        let mut rng = StdRng::seed_from_u64(1);
        let msg = request.to_message("Kael", &mut rng).unwrap();
        let outcome = msg.roll.unwrap();
        assert_eq!(outcome.total, i64::from(outcome.per_die()[0]) + 3);
    }
}
