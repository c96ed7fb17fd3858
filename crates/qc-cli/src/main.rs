//! CLI frontend for the Quest Chronicles text RPG.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qc",
    about = "Quest Chronicles: a turn-based text RPG",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding quests.txt and items.txt
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Directory holding character save files
    #[arg(long, global = true, default_value = "data/save_games")]
    save_dir: PathBuf,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter quest and item catalogs
    Init,

    /// Create a new character
    New {
        /// Character name
        name: String,

        /// Class: warrior, mage, rogue or cleric
        class: String,
    },

    /// List saved characters
    List,

    /// Show a saved character
    Show {
        /// Character name
        name: String,

        /// Print the character as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved character
    Delete {
        /// Character name
        name: String,
    },

    /// Show the quest or item catalog
    Catalog {
        /// Which catalog: quests or items (default: both)
        kind: Option<String>,
    },

    /// Play an interactive session with a saved character
    Play {
        /// Character name
        name: String,

        /// RNG seed for escape attempts and critical strikes
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(tracing::Level::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = cli.data_dir.as_path();
    let save_dir = cli.save_dir.as_path();

    let result = match cli.command {
        Commands::Init => commands::init::run(data_dir, save_dir),
        Commands::New { name, class } => commands::new::run(save_dir, &name, &class),
        Commands::List => commands::list::run(save_dir),
        Commands::Show { name, json } => commands::show::run(save_dir, &name, json),
        Commands::Delete { name } => commands::delete::run(save_dir, &name),
        Commands::Catalog { kind } => commands::catalog::run(data_dir, kind.as_deref()),
        Commands::Play { name, seed } => commands::play::run(data_dir, save_dir, &name, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
