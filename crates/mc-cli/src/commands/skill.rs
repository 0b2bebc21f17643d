use std::path::Path;

use mc_mechanics::RollOptions;
use mc_mechanics::actions::skill_check;

use super::{Context, find_item, load_actor};

pub fn run(
    ctx: &mut Context,
    path: &Path,
    skill: &str,
    options: &RollOptions,
) -> Result<(), String> {
    let actor = load_actor(path)?;
    let id = find_item(&actor, skill)?;
    let request = skill_check(&actor, id, options, &ctx.config).map_err(|e| e.to_string())?;
    ctx.roll_and_print(&actor.name, &request)
}
