//! CLI frontend for the Weave random-table engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "weave",
    about = "Weave — seeded random tables and oracles for tabletop play",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new directory with starter tables and a starter weave
    Init {
        /// Name of the directory to create
        name: String,
    },

    /// List tables in a directory
    List {
        /// Directory containing table .json files (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show a table's rows
    Show {
        /// Table id, name, or tag
        name: String,

        /// Directory containing table .json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Roll on a table, resolving [[ TAG ]] tokens by default
    Roll {
        /// Table id, name, or tag
        name: String,

        /// Directory containing table .json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<String>,

        /// Force a specific roll value (bypasses the RNG)
        #[arg(long)]
        roll_value: Option<u32>,

        /// Skip token resolution and print the raw row result
        #[arg(long)]
        raw: bool,
    },

    /// Validate tables: range coverage and token references
    Check {
        /// Directory containing table .json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Roll on a weave file and print the routed target
    Weave {
        /// Path to a weave .json file
        file: PathBuf,

        /// Seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<String>,

        /// Force a specific roll value (bypasses the RNG)
        #[arg(long)]
        roll_value: Option<u32>,
    },

    /// Redistribute a weave's ranges evenly across its rows
    Spread {
        /// Path to a weave .json file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::List { dir } => commands::list::run(&dir),
        Commands::Show { name, dir } => commands::show::run(&dir, &name),
        Commands::Roll {
            name,
            dir,
            seed,
            roll_value,
            raw,
        } => commands::roll::run(&dir, &name, seed, roll_value, raw),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Weave {
            file,
            seed,
            roll_value,
        } => commands::weave::run(&file, seed, roll_value),
        Commands::Spread { file } => commands::spread::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
