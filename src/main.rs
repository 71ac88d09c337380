use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use resettle::{
    db::WorldDb,
    report::{self, RunMode},
    rng::StampRng,
    settings::{StampSettings, DEFAULT_REFERENCE_SETTLEMENT},
    tasks::{RecenterBuildings, RecenterCharacters, StampLayout},
    world::SettlementId,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Settlement coordinate maintenance for the world database")]
struct Cli {
    /// Path to the world SQLite database
    #[arg(long, global = true, default_value = "world.db")]
    db: PathBuf,

    /// Write changes to the database (default is a dry run)
    #[arg(long, global = true)]
    apply: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stamp the reference settlement's building layout onto every other settlement
    StampLayout {
        /// Settlement whose layout is the template
        #[arg(long, default_value_t = DEFAULT_REFERENCE_SETTLEMENT)]
        reference: i64,

        /// Pin the random transform for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Optional YAML tuning file (variance, rotation, scale ranges)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Re-center every settlement's buildings on the shared local-space origin
    RecenterBuildings,
    /// Re-center character placements on the shared local-space origin
    RecenterCharacters,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = if cli.apply {
        RunMode::Apply
    } else {
        RunMode::DryRun
    };
    let mut db = WorldDb::open(&cli.db)?;

    let summary = match cli.command {
        Command::StampLayout {
            reference,
            seed,
            settings,
        } => {
            let settings = match settings {
                Some(path) => StampSettings::load(path)?,
                None => StampSettings::default(),
            };
            let mut rng = match seed {
                Some(seed) => StampRng::from_seed(seed),
                None => StampRng::from_entropy(),
            };
            report::banner("Stamp building layout", mode, Some(rng.seed()));
            StampLayout::new(SettlementId::new(reference), settings).run(&mut db, &mut rng, mode)?
        }
        Command::RecenterBuildings => {
            report::banner("Recenter settlement buildings", mode, None);
            RecenterBuildings::default().run(&mut db, mode)?
        }
        Command::RecenterCharacters => {
            report::banner("Recenter character placements", mode, None);
            RecenterCharacters::default().run(&mut db, mode)?
        }
    };

    report::summary(mode, &summary);
    Ok(())
}
