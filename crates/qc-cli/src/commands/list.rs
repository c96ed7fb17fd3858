use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(save_dir: &Path) -> Result<(), String> {
    let names = qc_data::list_saved_characters(save_dir).map_err(|e| e.to_string())?;

    if names.is_empty() {
        println!("  No saved characters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Class", "Level", "Health", "Gold"]);

    for name in &names {
        match qc_data::load_character(name, save_dir) {
            Ok(c) => {
                table.add_row(vec![
                    name.clone(),
                    c.class().to_string(),
                    c.level.to_string(),
                    format!("{}/{}", c.health, c.max_health),
                    c.gold.to_string(),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    name.clone(),
                    format!("unreadable: {e}"),
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} characters", names.len());

    Ok(())
}
