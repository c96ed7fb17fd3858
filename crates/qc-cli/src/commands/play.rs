use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use qc_core::{GameSession, SessionConfig};

pub fn run(data_dir: &Path, save_dir: &Path, name: &str, seed: u64) -> Result<(), String> {
    let (quests, items) = super::load_catalogs(data_dir)?;
    let character = qc_data::load_character(name, save_dir).map_err(|e| e.to_string())?;
    let config = SessionConfig::default().with_seed(seed);

    let mut session = GameSession::new(character, quests, items, config);

    println!("  {} {}", "Welcome back,".bold(), session.character());
    println!("  Type 'help' for commands, 'save' to save, 'quit' to save and exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("save") {
            match qc_data::save_character(session.character(), save_dir) {
                Ok(_) => println!("Game saved.\n"),
                Err(e) => println!("{}\n", format!("could not save: {e}").yellow()),
            }
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    // A battle in progress is abandoned; the character keeps its current state.
    let path = qc_data::save_character(session.character(), save_dir)
        .map_err(|e| format!("could not save: {e}"))?;
    println!("Progress saved to {}", path.display());

    Ok(())
}
