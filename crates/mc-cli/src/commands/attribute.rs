use std::path::Path;

use mc_core::Attribute;
use mc_mechanics::RollOptions;
use mc_mechanics::actions::attribute_check;

use super::{Context, load_actor};

pub fn run(
    ctx: &mut Context,
    path: &Path,
    attribute: &str,
    options: &RollOptions,
) -> Result<(), String> {
    let actor = load_actor(path)?;
    let attribute: Attribute = attribute.parse::<Attribute>().map_err(|e| e.to_string())?;
    let request = attribute_check(&actor, attribute, options).map_err(|e| e.to_string())?;
    ctx.roll_and_print(&actor.name, &request)
}
