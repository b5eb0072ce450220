//! Command-line driver for the Starscape world simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "starscape",
    about = "Starscape: gather, craft and trade across tile maps",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory containing map .json files
    #[arg(short, long, global = true, default_value = "maps")]
    maps: PathBuf,

    /// Log simulation detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every item with prices and skill requirements
    Catalog {
        /// Only show one category: tool, resource or weapon
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Print the player's view, or a whole map
    View {
        /// Map to print (default: the player's map)
        map: Option<String>,

        /// Print the whole map instead of the visible window
        #[arg(short, long)]
        full: bool,

        /// Explain the map glyphs
        #[arg(short, long)]
        legend: bool,
    },

    /// Show the tools a skill gates and what they work on
    Skill {
        /// Mining, Woodcutting, Firemaking or Fletching
        name: String,
    },

    /// Run ticks and summarize what happened on each map
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Seed for node health, harvest rolls and wandering
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Print every event, not just the summary
        #[arg(short, long)]
        events: bool,
    },

    /// Replay a script of player commands
    Play {
        /// Script file, one command per line
        script: PathBuf,

        /// RNG seed for deterministic play
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Catalog { category } => commands::catalog::run(category.as_deref()),
        Commands::View { map, full, legend } => {
            commands::view::run(&cli.maps, map.as_deref(), full, legend)
        }
        Commands::Skill { name } => commands::skill::run(&name),
        Commands::Simulate {
            ticks,
            seed,
            events,
        } => commands::simulate::run(&cli.maps, ticks, seed, events),
        Commands::Play { script, seed } => commands::play::run(&cli.maps, &script, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
