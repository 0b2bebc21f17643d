use std::path::Path;

use mc_mechanics::RestKind;
use mc_mechanics::actions::rest;

use super::{Context, load_actor, save_actor};

pub fn run(ctx: &Context, path: &Path, kind: RestKind, save: bool) -> Result<(), String> {
    let mut actor = load_actor(path)?;
    let message = rest(&mut actor, kind);
    ctx.print_message(&message)?;

    if !ctx.json {
        println!("  health:        {}", actor.health);
        println!("  action points: {}", actor.action_points);
    }
    if save {
        save_actor(path, &actor)?;
    }
    Ok(())
}
