use colored::Colorize;
use mc_core::{CriticalRule, DamagePart};
use mc_mechanics::{
    RollRequest, apply_critical_multiplier, build_damage_formula, build_labelled_damage_formula,
    multiply_formula, parse_damage_formula,
};

use super::Context;

pub fn run(
    ctx: &mut Context,
    inputs: &[String],
    bonus: i32,
    crit: bool,
    labelled: bool,
    roll: bool,
) -> Result<(), String> {
    let fallback = ctx.config.fallback_damage_type.clone();
    let mut parts: Vec<DamagePart> = inputs
        .iter()
        .flat_map(|input| parse_damage_formula(input, &fallback))
        .collect();

    let multiply_total = crit && ctx.config.critical_rule == CriticalRule::MultiplyTotal;
    if crit && !multiply_total {
        parts = apply_critical_multiplier(&parts, ctx.config.critical_multiplier);
    }

    let formula = if labelled {
        build_labelled_damage_formula(&parts, bonus)
    } else {
        build_damage_formula(&parts, bonus)
    }
    .map_err(|e| e.to_string())?;
    let formula = if multiply_total {
        multiply_formula(&formula, ctx.config.critical_multiplier)
    } else {
        formula
    };

    if roll {
        let flavor = if crit { "Critical Damage" } else { "Damage" };
        return ctx.roll_and_print("", &RollRequest::new(formula, flavor));
    }

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({ "formula": formula, "parts": parts })
        );
        return Ok(());
    }
    println!("{formula}");
    if crit {
        println!("  {}", format!("critical x{}", ctx.config.critical_multiplier).dimmed());
    }
    Ok(())
}
