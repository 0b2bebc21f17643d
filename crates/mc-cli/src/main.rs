//! CLI frontend for the MythCraft mechanics engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mc_mechanics::{RestKind, RollMode, RollOptions};

use commands::Context;

#[derive(Parser)]
#[command(
    name = "mythcraft",
    about = "MythCraft: dice formulas, rolls, and character actions",
    version,
    propagate_version = true
)]
struct Cli {
    /// System configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every d20 roll.
#[derive(Args)]
struct RollFlags {
    /// Roll with advantage
    #[arg(long, conflicts_with = "dis")]
    adv: bool,

    /// Roll with disadvantage
    #[arg(long)]
    dis: bool,

    /// Situational bonus
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    bonus: i32,

    /// Build the roll without spending action or spell points
    #[arg(long)]
    preview: bool,
}

impl RollFlags {
    fn options(&self) -> RollOptions {
        RollOptions {
            mode: RollMode::from_flags(self.adv, self.dis),
            bonus: self.bonus,
            preview: self.preview,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RestArg {
    Short,
    Long,
}

impl From<RestArg> for RestKind {
    fn from(arg: RestArg) -> Self {
        match arg {
            RestArg::Short => RestKind::Short,
            RestArg::Long => RestKind::Long,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a d20 check formula from a modifier
    Check {
        /// Modifier added to the d20
        #[arg(allow_negative_numbers = true)]
        modifier: i32,

        /// Roll with advantage
        #[arg(long, conflicts_with = "dis")]
        adv: bool,

        /// Roll with disadvantage
        #[arg(long)]
        dis: bool,

        /// Also roll the formula
        #[arg(short, long)]
        roll: bool,
    },

    /// Build a damage formula from parts such as "2d6 slashing"
    Damage {
        /// Damage parts, each a dice expression with an optional type
        #[arg(required = true)]
        parts: Vec<String>,

        /// Flat bonus added once
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i32,

        /// Apply the critical-hit rule
        #[arg(long)]
        crit: bool,

        /// Keep damage type labels in the formula
        #[arg(short, long)]
        labelled: bool,

        /// Also roll the formula
        #[arg(short, long)]
        roll: bool,
    },

    /// Split a damage formula into typed parts
    Parse {
        /// Formula such as "2d6 slashing + 1d4 fire"
        formula: String,

        /// Damage type for unlabelled parts (default from config)
        #[arg(short, long)]
        fallback: Option<String>,
    },

    /// Roll a dice formula
    Roll {
        /// Formula such as "2d20kh1 + @strength"
        formula: String,

        /// Actor file supplying @references
        #[arg(short, long)]
        actor: Option<PathBuf>,
    },

    /// Show a character sheet
    Sheet {
        /// Actor file (JSON)
        actor: PathBuf,
    },

    /// Roll an attribute check
    Attribute {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Attribute name or abbreviation
        attribute: String,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Roll initiative
    Initiative {
        /// Actor file (JSON)
        actor: PathBuf,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Attack with a weapon, spending action points
    Attack {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Weapon name (case-insensitive)
        weapon: String,

        #[command(flatten)]
        flags: RollFlags,

        /// Also roll damage
        #[arg(short, long)]
        damage: bool,

        /// Treat the damage as a critical hit
        #[arg(long)]
        crit: bool,

        /// Write spent action points back to the actor file
        #[arg(long)]
        save: bool,
    },

    /// Cast a spell, spending action and spell points
    Cast {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Spell name (case-insensitive)
        spell: String,

        #[command(flatten)]
        flags: RollFlags,

        /// Write spent points back to the actor file
        #[arg(long)]
        save: bool,
    },

    /// Roll a skill check
    Skill {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Skill name (case-insensitive)
        skill: String,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Use a talent
    Talent {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Talent name (case-insensitive)
        talent: String,
    },

    /// Spend action points on a named action or a number of points
    Spend {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Action name such as "dash", or a number of points
        action: String,

        /// Write spent action points back to the actor file
        #[arg(long)]
        save: bool,
    },

    /// Take a short or long rest
    Rest {
        /// Actor file (JSON)
        actor: PathBuf,

        /// Rest length
        #[arg(value_enum, default_value = "short")]
        kind: RestArg,

        /// Write restored resources back to the actor file
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = Context::new(cli.config.as_deref(), cli.seed, cli.json).and_then(|mut ctx| {
        match cli.command {
            Commands::Check {
                modifier,
                adv,
                dis,
                roll,
            } => commands::check::run(&mut ctx, modifier, RollMode::from_flags(adv, dis), roll),
            Commands::Damage {
                parts,
                bonus,
                crit,
                labelled,
                roll,
            } => commands::damage::run(&mut ctx, &parts, bonus, crit, labelled, roll),
            Commands::Parse { formula, fallback } => {
                commands::parse::run(&ctx, &formula, fallback.as_deref())
            }
            Commands::Roll { formula, actor } => {
                commands::roll::run(&mut ctx, &formula, actor.as_deref())
            }
            Commands::Sheet { actor } => commands::sheet::run(&ctx, &actor),
            Commands::Attribute {
                actor,
                attribute,
                flags,
            } => commands::attribute::run(&mut ctx, &actor, &attribute, &flags.options()),
            Commands::Initiative { actor, flags } => {
                commands::initiative::run(&mut ctx, &actor, &flags.options())
            }
            Commands::Attack {
                actor,
                weapon,
                flags,
                damage,
                crit,
                save,
            } => commands::attack::run(
                &mut ctx,
                &actor,
                &weapon,
                &flags.options(),
                damage,
                crit,
                save,
            ),
            Commands::Cast {
                actor,
                spell,
                flags,
                save,
            } => commands::cast::run(&mut ctx, &actor, &spell, &flags.options(), save),
            Commands::Skill {
                actor,
                skill,
                flags,
            } => commands::skill::run(&mut ctx, &actor, &skill, &flags.options()),
            Commands::Talent { actor, talent } => commands::talent::run(&ctx, &actor, &talent),
            Commands::Spend {
                actor,
                action,
                save,
            } => commands::spend::run(&ctx, &actor, &action, save),
            Commands::Rest { actor, kind, save } => {
                commands::rest::run(&ctx, &actor, kind.into(), save)
            }
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
