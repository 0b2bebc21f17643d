use std::path::Path;

use colored::Colorize;
use mc_mechanics::actions::use_talent;

use super::{Context, find_item, load_actor};

pub fn run(ctx: &Context, path: &Path, talent: &str) -> Result<(), String> {
    let actor = load_actor(path)?;
    let id = find_item(&actor, talent)?;
    let card = use_talent(&actor, id).map_err(|e| e.to_string())?;
    ctx.print_message(&card)?;

    if ctx.json {
        return Ok(());
    }
    let Some(item) = actor.item(id) else {
        return Ok(());
    };
    if let Some(data) = item.as_talent() {
        println!("  {}", data.talent_type.to_string().dimmed());
    }
    if !item.description.is_empty() {
        println!("  {}", item.description);
    }
    for benefit in item.as_talent().map(|t| t.benefits.as_slice()).unwrap_or_default() {
        println!("    - {benefit}");
    }
    Ok(())
}
