//! Building and rewriting roll formulas.
//!
//! These are pure string transforms. Malformed dice text is passed through
//! untouched; only the evaluator rejects bad syntax. The single failure here
//! is asking for a damage formula with no damage parts.

use std::cmp::Ordering;

use mc_core::{DamagePart, DamageType};

use super::{DiceTerm, RollMode, find_dice_terms};
use crate::error::{MechError, MechResult};

/// Build a d20 check formula: the mode's base die followed by a signed modifier.
///
/// ```
/// use mc_mechanics::dice::RollMode;
/// use mc_mechanics::dice::formula::build_check_formula;
///
/// assert_eq!(build_check_formula(3, RollMode::Normal), "1d20+3");
/// assert_eq!(build_check_formula(0, RollMode::Advantage), "2d20kh1");
/// assert_eq!(build_check_formula(-1, RollMode::Disadvantage), "2d20kl1-1");
/// ```
pub fn build_check_formula(modifier: i32, mode: RollMode) -> String {
    format!("{}{}", mode.base_die(), signed_modifier(modifier))
}

/// Substitute the advantage/disadvantage die into an existing formula.
///
/// Only a standalone `1d20` in a formula with exactly one dice term is
/// replaced; anything else (`11d20`, `1d200`, `2d20`, or formulas with
/// several dice terms) is returned unchanged.
pub fn apply_roll_mode(formula: &str, mode: RollMode) -> String {
    if mode == RollMode::Normal {
        return formula.to_string();
    }
    let terms = find_dice_terms(formula);
    match terms.as_slice() {
        [(range, term)] if *term == DiceTerm::new(1, 20) => {
            let mut out = String::with_capacity(formula.len() + 3);
            out.push_str(&formula[..range.start]);
            out.push_str(mode.base_die());
            out.push_str(&formula[range.end..]);
            out
        }
        _ => formula.to_string(),
    }
}

/// Join damage parts into one formula, appending `bonus` once when positive.
///
/// Parts keep their input order. Parts with blank expressions are skipped;
/// if nothing remains the result is [`MechError::EmptyFormula`].
pub fn build_damage_formula(parts: &[DamagePart], bonus: i32) -> MechResult<String> {
    join_parts(parts.iter().map(|p| p.formula.trim().to_string()), bonus)
}

/// Like [`build_damage_formula`], but each part carries its damage type as
/// bracketed flavor (`2d6[slashing] + 1d4[fire]`), so [`parse_damage_formula`]
/// recovers the types and the evaluator ignores them.
pub fn build_labelled_damage_formula(parts: &[DamagePart], bonus: i32) -> MechResult<String> {
    join_parts(
        parts
            .iter()
            .filter(|p| !p.formula.trim().is_empty())
            .map(|p| format!("{}[{}]", p.formula.trim(), flavor_label(&p.damage_type))),
        bonus,
    )
}

/// A damage type label safe to place between brackets.
fn flavor_label(damage_type: &DamageType) -> String {
    damage_type
        .as_str()
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect()
}

fn join_parts(parts: impl Iterator<Item = String>, bonus: i32) -> MechResult<String> {
    let parts: Vec<String> = parts.filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err(MechError::EmptyFormula);
    }
    let mut formula = parts.join(" + ");
    if bonus > 0 {
        formula.push_str(&format!(" + {bonus}"));
    }
    Ok(formula)
}

/// Multiply the dice count of every dice term in every part.
///
/// A bare `d6` counts as one die. Sides, keep suffixes, flat terms, and
/// damage types are unchanged, so `2d6 + 3` becomes `4d6 + 3`.
pub fn apply_critical_multiplier(parts: &[DamagePart], multiplier: u32) -> Vec<DamagePart> {
    parts
        .iter()
        .map(|part| DamagePart {
            formula: multiply_dice(&part.formula, multiplier),
            damage_type: part.damage_type.clone(),
        })
        .collect()
}

/// Rewrite every dice term in `formula` with its count multiplied.
fn multiply_dice(formula: &str, multiplier: u32) -> String {
    let terms = find_dice_terms(formula);
    if terms.is_empty() {
        return formula.to_string();
    }

    let mut out = String::with_capacity(formula.len() + terms.len());
    let mut cursor = 0;
    for (range, term) in terms {
        out.push_str(&formula[cursor..range.start]);
        let doubled = DiceTerm {
            count: Some(term.dice_count().saturating_mul(multiplier)),
            ..term
        };
        out.push_str(&doubled.to_string());
        cursor = range.end;
    }
    out.push_str(&formula[cursor..]);
    out
}

/// Wrap a whole formula so its total is multiplied: `(formula) * m`.
pub fn multiply_formula(formula: &str, multiplier: u32) -> String {
    format!("({formula}) * {multiplier}")
}

/// Split a damage formula back into its parts.
///
/// Each `+`-separated segment must start with a dice term; trailing text
/// (optionally in brackets) is the damage type, defaulting to `fallback`.
/// A `+` inside brackets belongs to the label. Segments without a dice term
/// are kept verbatim with the fallback type.
pub fn parse_damage_formula(formula: &str, fallback: &DamageType) -> Vec<DamagePart> {
    split_segments(formula)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            parse_damage_segment(segment, fallback).unwrap_or_else(|err| {
                tracing::debug!(%err, "keeping segment verbatim");
                DamagePart::new(segment, fallback.clone())
            })
        })
        .collect()
}

/// Split on `+` outside of brackets.
fn split_segments(formula: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in formula.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => {
                segments.push(&formula[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&formula[start..]);
    segments
}

/// Parse one trimmed segment: a leading dice term plus an optional label.
fn parse_damage_segment(segment: &str, fallback: &DamageType) -> MechResult<DamagePart> {
    let (_, len) = DiceTerm::parse_prefix(segment)
        .ok_or_else(|| MechError::UnrecognizedDiceToken(segment.to_string()))?;

    let label = segment[len..].trim();
    let label = label
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .unwrap_or(label)
        .trim();

    let damage_type = if label.is_empty() {
        fallback.clone()
    } else {
        DamageType::from(label.to_string())
    };
    Ok(DamagePart::new(&segment[..len], damage_type))
}

/// Render a modifier as a suffix: `+3`, `-1`, or nothing for zero.
fn signed_modifier(modifier: i32) -> String {
    match modifier.cmp(&0) {
        Ordering::Greater => format!("+{modifier}"),
        Ordering::Less => modifier.to_string(),
        Ordering::Equal => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(formula: &str, damage_type: DamageType) -> DamagePart {
        DamagePart::new(formula, damage_type)
    }

    fn sample() -> Vec<DamagePart> {
        vec![part("2d6", DamageType::Slashing), part("1d4", DamageType::Fire)]
    }

    #[test]
    fn check_formula_normal() {
        assert_eq!(build_check_formula(0, RollMode::Normal), "1d20");
        assert_eq!(build_check_formula(5, RollMode::Normal), "1d20+5");
        assert_eq!(build_check_formula(-2, RollMode::Normal), "1d20-2");
    }

    #[test]
    fn check_formula_modes() {
        assert_eq!(build_check_formula(2, RollMode::Advantage), "2d20kh1+2");
        assert_eq!(build_check_formula(-1, RollMode::Disadvantage), "2d20kl1-1");
    }

    #[test]
    fn roll_mode_substitutes_single_d20() {
        assert_eq!(apply_roll_mode("1d20 + 4", RollMode::Advantage), "2d20kh1 + 4");
        assert_eq!(apply_roll_mode("1d20", RollMode::Disadvantage), "2d20kl1");
        assert_eq!(apply_roll_mode("1d20 + 4", RollMode::Normal), "1d20 + 4");
    }

    #[test]
    fn roll_mode_leaves_other_formulas() {
        for formula in ["11d20", "1d200", "2d20kh1", "1d20 + 1d4", "d20", "2d6"] {
            assert_eq!(apply_roll_mode(formula, RollMode::Advantage), formula);
        }
    }

    #[test]
    fn roll_mode_is_idempotent() {
        let once = apply_roll_mode("1d20+2", RollMode::Advantage);
        assert_eq!(apply_roll_mode(&once, RollMode::Advantage), once);
    }

    #[test]
    fn damage_formula_joins_in_order() {
        assert_eq!(build_damage_formula(&sample(), 3).unwrap(), "2d6 + 1d4 + 3");
        assert_eq!(build_damage_formula(&sample(), 0).unwrap(), "2d6 + 1d4");
        assert_eq!(build_damage_formula(&sample(), -2).unwrap(), "2d6 + 1d4");
    }

    #[test]
    fn damage_formula_empty_is_an_error() {
        assert!(matches!(build_damage_formula(&[], 5), Err(MechError::EmptyFormula)));
        let blank = vec![part("  ", DamageType::Fire)];
        assert!(matches!(build_damage_formula(&blank, 0), Err(MechError::EmptyFormula)));
        assert!(matches!(
            build_labelled_damage_formula(&blank, 0),
            Err(MechError::EmptyFormula)
        ));
    }

    #[test]
    fn labelled_formula() {
        assert_eq!(
            build_labelled_damage_formula(&sample(), 2).unwrap(),
            "2d6[slashing] + 1d4[fire] + 2"
        );
    }

    #[test]
    fn labelled_formula_brackets_custom_labels() {
        let parts = vec![
            part("1d6", DamageType::Custom("tier-3".into())),
            part("1d4", DamageType::Custom("fire+1".into())),
            part("1d8", DamageType::Custom("dragon's [breath]".into())),
        ];
        let formula = build_labelled_damage_formula(&parts, 0).unwrap();
        assert_eq!(formula, "1d6[tier-3] + 1d4[fire+1] + 1d8[dragon's breath]");

        let parsed = parse_damage_formula(&formula, &DamageType::Bludgeoning);
        assert_eq!(parsed[0], parts[0]);
        assert_eq!(parsed[1], parts[1]);
        assert_eq!(parsed[2].damage_type, DamageType::Custom("dragon's breath".into()));
    }

    #[test]
    fn critical_doubles_dice_only() {
        let crit = apply_critical_multiplier(&sample(), 2);
        assert_eq!(
            crit,
            vec![part("4d6", DamageType::Slashing), part("2d4", DamageType::Fire)]
        );
    }

    #[test]
    fn critical_bare_die_and_flat_parts() {
        let parts = vec![
            part("d6", DamageType::Cold),
            part("3", DamageType::Cold),
            part("1d8+2", DamageType::Piercing),
            part("2d20kh1", DamageType::Radiant),
        ];
        let crit = apply_critical_multiplier(&parts, 2);
        assert_eq!(crit[0].formula, "2d6");
        assert_eq!(crit[1].formula, "3");
        assert_eq!(crit[2].formula, "2d8+2");
        assert_eq!(crit[3].formula, "4d20kh1");
        assert_eq!(crit[2].damage_type, DamageType::Piercing);
    }

    #[test]
    fn critical_twice_equals_times_four() {
        let twice = apply_critical_multiplier(&apply_critical_multiplier(&sample(), 2), 2);
        assert_eq!(twice, apply_critical_multiplier(&sample(), 4));
    }

    #[test]
    fn multiply_formula_wraps() {
        assert_eq!(multiply_formula("2d6 + 3", 2), "(2d6 + 3) * 2");
    }

    #[test]
    fn parse_labelled_formula() {
        let parts = parse_damage_formula("2d6 slashing + 1d4 fire", &DamageType::Bludgeoning);
        assert_eq!(parts, sample());
    }

    #[test]
    fn parse_bracketed_labels() {
        let parts = parse_damage_formula("2d6[slashing]+1d4 [Fire]", &DamageType::Bludgeoning);
        assert_eq!(parts, sample());
    }

    #[test]
    fn parse_unlabelled_uses_fallback() {
        let parts = parse_damage_formula("2d6 + d8", &DamageType::Piercing);
        assert_eq!(
            parts,
            vec![part("2d6", DamageType::Piercing), part("d8", DamageType::Piercing)]
        );
    }

    #[test]
    fn parse_keeps_unrecognized_segments() {
        let parts = parse_damage_formula("2d6 + 3 + @strength + ", &DamageType::Bludgeoning);
        assert_eq!(
            parts,
            vec![
                part("2d6", DamageType::Bludgeoning),
                part("3", DamageType::Bludgeoning),
                part("@strength", DamageType::Bludgeoning),
            ]
        );
    }

    #[test]
    fn parse_custom_label() {
        let parts = parse_damage_formula("1d10 thunder", &DamageType::Bludgeoning);
        assert_eq!(parts[0].damage_type, DamageType::Custom("thunder".to_string()));
    }

    #[test]
    fn unrecognized_segment_error() {
        let err = parse_damage_segment("fire", &DamageType::Fire).unwrap_err();
        assert!(matches!(err, MechError::UnrecognizedDiceToken(s) if s == "fire"));
    }
}
