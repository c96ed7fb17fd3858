use std::fs;
use std::path::Path;

use qc_data::{ITEMS_FILE, QUESTS_FILE};

pub fn run(data_dir: &Path, save_dir: &Path) -> Result<(), String> {
    let created = qc_data::create_default_data_files(data_dir)
        .map_err(|e| format!("cannot write data files: {e}"))?;
    fs::create_dir_all(save_dir).map_err(|e| format!("cannot create save directory: {e}"))?;

    if created.is_empty() {
        println!(
            "Data files already present in {}/ ({QUESTS_FILE}, {ITEMS_FILE})",
            data_dir.display()
        );
    } else {
        println!("Initialized game data in {}/", data_dir.display());
        for path in &created {
            println!("  created {}", path.display());
        }
    }
    println!();
    println!("Get started:");
    println!("  qc new <name> <class>   # warrior, mage, rogue or cleric");
    println!("  qc play <name>          # start playing");

    Ok(())
}
