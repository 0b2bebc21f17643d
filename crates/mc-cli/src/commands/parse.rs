use comfy_table::{ContentArrangement, Table};
use mc_core::DamageType;
use mc_mechanics::parse_damage_formula;

use super::Context;

pub fn run(ctx: &Context, formula: &str, fallback: Option<&str>) -> Result<(), String> {
    let fallback = match fallback {
        Some(label) => DamageType::from(label.to_string()),
        None => ctx.config.fallback_damage_type.clone(),
    };
    let parts = parse_damage_formula(formula, &fallback);

    if ctx.json {
        let json = serde_json::to_string_pretty(&parts).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    if parts.is_empty() {
        println!("  No damage parts found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Formula", "Type"]);
    for (i, part) in parts.iter().enumerate() {
        let kind = match &part.damage_type {
            DamageType::Custom(label) => format!("{label} (custom)"),
            other => other.to_string(),
        };
        table.add_row(vec![(i + 1).to_string(), part.formula.clone(), kind]);
    }
    println!("{table}");
    Ok(())
}
