use mc_mechanics::{RollMode, RollRequest, build_check_formula};

use super::Context;

pub fn run(ctx: &mut Context, modifier: i32, mode: RollMode, roll: bool) -> Result<(), String> {
    let formula = build_check_formula(modifier, mode);
    if roll {
        return ctx.roll_and_print("", &RollRequest::new(formula, format!("Check ({mode})")));
    }
    if ctx.json {
        println!("{}", serde_json::json!({ "formula": formula, "mode": mode }));
    } else {
        println!("{formula}");
    }
    Ok(())
}
