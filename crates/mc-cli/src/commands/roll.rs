use std::path::Path;

use mc_mechanics::{RollData, RollRequest};

use super::{Context, load_actor};

pub fn run(ctx: &mut Context, formula: &str, actor: Option<&Path>) -> Result<(), String> {
    let (speaker, formula) = match actor {
        Some(path) => {
            let actor = load_actor(path)?;
            let resolved = RollData::from_actor(&actor).substitute(formula);
            (actor.name, resolved)
        }
        None => (String::new(), formula.to_string()),
    };
    ctx.roll_and_print(&speaker, &RollRequest::new(formula, ""))
}
