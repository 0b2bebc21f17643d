pub mod attack;
pub mod attribute;
pub mod cast;
pub mod check;
pub mod damage;
pub mod initiative;
pub mod parse;
pub mod rest;
pub mod roll;
pub mod sheet;
pub mod skill;
pub mod spend;
pub mod talent;

use std::fs;
use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mc_core::{Actor, ItemId, SystemConfig};
use mc_mechanics::chat::ChatMessage;
use mc_mechanics::{RollOutcome, RollRequest};

/// State shared by every command: rules configuration, dice, output mode.
pub struct Context {
    pub config: SystemConfig,
    pub rng: StdRng,
    pub json: bool,
}

impl Context {
    pub fn new(config: Option<&Path>, seed: Option<u64>, json: bool) -> Result<Self, String> {
        let config = match config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                SystemConfig::from_json_str(&text)
                    .map_err(|e| format!("invalid config {}: {e}", path.display()))?
            }
            None => SystemConfig::default(),
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { config, rng, json })
    }

    /// Roll a request and print it.
    fn roll_and_print(&mut self, speaker: &str, request: &RollRequest) -> Result<(), String> {
        let message = request
            .to_message(speaker, &mut self.rng)
            .map_err(|e| e.to_string())?;
        self.print_message(&message)
    }

    /// Print a chat message: JSON in `--json` mode, otherwise its roll or flavor.
    fn print_message(&self, message: &ChatMessage) -> Result<(), String> {
        if self.json {
            let json = serde_json::to_string_pretty(message).map_err(|e| e.to_string())?;
            println!("{json}");
            return Ok(());
        }
        match &message.roll {
            Some(outcome) => print_outcome(&message.flavor, outcome),
            None => println!("  {}", message.flavor.bold()),
        }
        Ok(())
    }
}

fn load_actor(path: &Path) -> Result<Actor, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Actor::from_json(&text).map_err(|e| format!("invalid actor {}: {e}", path.display()))
}

fn save_actor(path: &Path, actor: &Actor) -> Result<(), String> {
    let json = actor.to_json().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

/// Resolve an owned item by name.
fn find_item(actor: &Actor, name: &str) -> Result<ItemId, String> {
    actor
        .item_by_name(name)
        .map(|item| item.id)
        .ok_or_else(|| format!("{} has no item named '{name}'", actor.name))
}

fn print_outcome(label: &str, outcome: &RollOutcome) {
    let dice: Vec<String> = outcome
        .dice
        .iter()
        .map(|d| {
            if d.dropped {
                d.value.to_string().dimmed().strikethrough().to_string()
            } else if d.value == d.sides && d.sides > 1 {
                d.value.to_string().green().bold().to_string()
            } else if d.value == 1 && d.sides > 1 {
                d.value.to_string().red().to_string()
            } else {
                d.value.to_string()
            }
        })
        .collect();

    if !label.is_empty() {
        println!("  {}", label.bold());
    }
    println!("  {} {}", "formula:".dimmed(), outcome.formula);
    if !dice.is_empty() {
        println!("  {} [{}]", "dice:   ".dimmed(), dice.join(", "));
    }
    let total = outcome.total.to_string().bold();
    if outcome.is_critical() {
        println!("  {} {total} {}", "total:  ".dimmed(), "(natural 20)".green());
    } else if outcome.is_fumble() {
        println!("  {} {total} {}", "total:  ".dimmed(), "(natural 1)".red());
    } else {
        println!("  {} {total}", "total:  ".dimmed());
    }
}
