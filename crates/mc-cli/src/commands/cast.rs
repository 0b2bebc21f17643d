use std::path::Path;

use colored::Colorize;
use mc_mechanics::RollOptions;
use mc_mechanics::actions::cast_spell;

use super::{Context, find_item, load_actor, save_actor};

pub fn run(
    ctx: &mut Context,
    path: &Path,
    spell: &str,
    options: &RollOptions,
    save: bool,
) -> Result<(), String> {
    let mut actor = load_actor(path)?;
    let id = find_item(&actor, spell)?;
    let cast = cast_spell(&mut actor, id, options, &ctx.config).map_err(|e| e.to_string())?;

    ctx.print_message(&cast.card)?;
    if !ctx.json {
        let mut cost = format!("AP {}", cast.action_cost);
        if let Some(sp) = cast.spell_point_cost {
            cost.push_str(&format!(", SP {sp}"));
        }
        println!("  {}", cost.dimmed());
    }
    if let Some(attack) = &cast.attack {
        ctx.roll_and_print(&actor.name, attack)?;
    }
    for damage in &cast.damage {
        ctx.roll_and_print(&actor.name, damage)?;
    }

    if save && !options.preview {
        save_actor(path, &actor)?;
    }
    Ok(())
}
