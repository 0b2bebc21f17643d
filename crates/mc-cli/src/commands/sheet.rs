use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mc_core::{Attribute, Item, ItemKind};
use mc_mechanics::{categorize_items, format_modifier};

use super::{Context, load_actor};

pub fn run(ctx: &Context, path: &Path) -> Result<(), String> {
    let actor = load_actor(path)?;
    if ctx.json {
        println!("{}", actor.to_json().map_err(|e| e.to_string())?);
        return Ok(());
    }

    println!("  {} [{}]", actor.name.bold(), actor.kind.to_string().dimmed());
    println!();
    println!("  health:        {}", actor.health);
    println!("  action points: {}", actor.action_points);
    if let Some(sp) = actor.spell_points {
        println!("  spell points:  {sp}");
    }
    if !actor.magic_sources.is_empty() {
        let sources: Vec<&str> = actor.magic_sources.iter().map(|s| s.label()).collect();
        println!("  magic:         {}", sources.join(", "));
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "", "Value"]);
    for attribute in Attribute::ALL {
        if let Some(score) = actor.attribute(attribute) {
            table.add_row(vec![
                attribute.label().to_string(),
                attribute.abbreviation().to_string(),
                format_modifier(score.value),
            ]);
        }
    }
    println!("{table}");

    let items = categorize_items(&actor);
    print_section("Weapons", &items.weapons);
    print_section("Armor", &items.armor);
    print_section("Gear", &items.gear);
    print_section("Talents", &items.talents);
    print_section("Features", &items.features);

    if items.spell_count() > 0 {
        println!();
        println!("  {}", "Spells".bold().underline());
        for (source, spells) in &items.spells {
            if spells.is_empty() {
                continue;
            }
            println!("  {}", source.label().dimmed());
            for spell in spells {
                println!("    {}", describe(spell));
            }
        }
    }

    if !items.skills.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Skill", "Attribute", "Total"]);
        for entry in &items.skills {
            let attribute = entry
                .item
                .as_skill()
                .map(|s| s.governing_attribute.abbreviation())
                .unwrap_or_default();
            table.add_row(vec![
                entry.item.name.clone(),
                attribute.to_string(),
                format_modifier(entry.total_modifier),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}

fn print_section(title: &str, items: &[&Item]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("  {}", title.bold().underline());
    for item in items {
        println!("    {}", describe(item));
    }
}

/// One-line summary of an item for the sheet.
fn describe(item: &Item) -> String {
    let detail = match &item.kind {
        ItemKind::Weapon(w) => {
            let damage: Vec<String> = w.damage.iter().map(ToString::to_string).collect();
            if damage.is_empty() {
                "1d6 bludgeoning".to_string()
            } else {
                damage.join(" + ")
            }
        }
        ItemKind::Armor(a) if a.equipped => {
            format!("{}, equipped", format_modifier(a.defense_bonus))
        }
        ItemKind::Armor(a) => format_modifier(a.defense_bonus),
        ItemKind::Equipment(e) => format!("x{}", e.quantity),
        ItemKind::Talent(t) => t.talent_type.to_string(),
        ItemKind::Spell(s) => format!("level {}", s.level),
        ItemKind::Feature(f) => f.source.clone(),
        ItemKind::Skill(s) => s.governing_attribute.abbreviation().to_string(),
    };
    if detail.is_empty() {
        item.name.clone()
    } else {
        format!("{} {}", item.name, format!("({detail})").dimmed())
    }
}
