use std::path::Path;

use colored::Colorize;

pub fn run(save_dir: &Path, name: &str, class: &str) -> Result<(), String> {
    if qc_data::list_saved_characters(save_dir)
        .map_err(|e| e.to_string())?
        .iter()
        .any(|n| n == name)
    {
        return Err(format!("character '{name}' already exists"));
    }

    let character = qc_core::create_character(name, class).map_err(|e| e.to_string())?;
    let path = qc_data::save_character(&character, save_dir).map_err(|e| e.to_string())?;

    println!("  Created {}", character.to_string().bold());
    println!(
        "  strength {} | magic {} | gold {}",
        character.strength, character.magic, character.gold
    );
    println!("  Saved to {}", path.display());

    Ok(())
}
