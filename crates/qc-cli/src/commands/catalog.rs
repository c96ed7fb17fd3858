use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use qc_core::{ItemCatalog, QuestCatalog};

pub fn run(data_dir: &Path, kind: Option<&str>) -> Result<(), String> {
    let (quests, items) = super::load_catalogs(data_dir)?;

    match kind.map(str::to_lowercase).as_deref() {
        Some("quests" | "quest") => print_quests(&quests),
        Some("items" | "item") => print_items(&items),
        None => {
            print_quests(&quests);
            println!();
            print_items(&items);
        }
        Some(other) => return Err(format!("unknown catalog '{other}', use: quests, items")),
    }

    Ok(())
}

fn print_quests(quests: &QuestCatalog) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Quest", "Title", "Level", "XP", "Gold", "Requires"]);

    for q in quests.iter() {
        table.add_row(vec![
            q.id.clone(),
            q.title.clone(),
            q.required_level.to_string(),
            q.reward_xp.to_string(),
            q.reward_gold.to_string(),
            q.prerequisite.clone().unwrap_or_else(|| "—".to_string()),
        ]);
    }

    println!("{table}");
    println!("  {} quests", quests.len());
}

fn print_items(items: &ItemCatalog) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Name", "Type", "Effect", "Cost"]);

    for item in items.iter() {
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.kind.to_string(),
            item.effect.to_string(),
            item.cost.to_string(),
        ]);
    }

    println!("{table}");
    println!("  {} items", items.len());
}
