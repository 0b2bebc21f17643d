use std::path::Path;

use mc_mechanics::RollOptions;
use mc_mechanics::actions::initiative;

use super::{Context, load_actor};

pub fn run(ctx: &mut Context, path: &Path, options: &RollOptions) -> Result<(), String> {
    let actor = load_actor(path)?;
    ctx.roll_and_print(&actor.name, &initiative(&actor, options))
}
