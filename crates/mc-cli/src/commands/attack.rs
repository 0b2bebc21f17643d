use std::path::Path;

use colored::Colorize;
use mc_mechanics::actions::{weapon_attack, weapon_damage};
use mc_mechanics::{DamageOptions, RollOptions};

use super::{Context, find_item, load_actor, save_actor};

pub fn run(
    ctx: &mut Context,
    path: &Path,
    weapon: &str,
    options: &RollOptions,
    damage: bool,
    crit: bool,
    save: bool,
) -> Result<(), String> {
    let mut actor = load_actor(path)?;
    let id = find_item(&actor, weapon)?;

    let attack =
        weapon_attack(&mut actor, id, options, &ctx.config).map_err(|e| e.to_string())?;
    ctx.roll_and_print(&actor.name, &attack)?;

    if damage || crit {
        let damage = weapon_damage(&actor, id, &DamageOptions { critical: crit }, &ctx.config)
            .map_err(|e| e.to_string())?;
        ctx.roll_and_print(&actor.name, &damage)?;
    }

    if !ctx.json {
        println!(
            "  {}",
            format!("action points: {}", actor.action_points).dimmed()
        );
    }
    if save && !options.preview {
        save_actor(path, &actor)?;
    }
    Ok(())
}
