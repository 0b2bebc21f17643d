use std::path::Path;

use colored::Colorize;
use mc_mechanics::actions::spend_action;

use super::{Context, load_actor, save_actor};

pub fn run(ctx: &Context, path: &Path, action: &str, save: bool) -> Result<(), String> {
    let mut actor = load_actor(path)?;
    let (cost, remaining) =
        spend_action(&mut actor, action, &ctx.config).map_err(|e| e.to_string())?;

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "actor": actor.name,
                "action": action,
                "cost": cost,
                "remaining": remaining,
            })
        );
    } else {
        println!("  {} spends {cost} AP", actor.name.bold());
        println!("  action points: {}", actor.action_points);
    }
    if save {
        save_actor(path, &actor)?;
    }
    Ok(())
}
