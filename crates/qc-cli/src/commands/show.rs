use std::path::Path;

use colored::Colorize;

use super::join_or_dash;

pub fn run(save_dir: &Path, name: &str, json: bool) -> Result<(), String> {
    let c = qc_data::load_character(name, save_dir).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&c).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("  {} [{}]", c.name().bold(), c.class().to_string().dimmed());
    println!();
    println!(
        "  level:      {} ({} XP to next)",
        c.level,
        c.xp_to_next_level()
    );
    if c.is_dead() {
        println!("  health:     {}", format!("0/{} (dead)", c.max_health).red());
    } else {
        println!("  health:     {}/{}", c.health, c.max_health);
    }
    println!("  strength:   {}", c.strength);
    println!("  magic:      {}", c.magic);
    println!("  gold:       {}", c.gold);
    println!(
        "  weapon:     {}",
        c.equipped_weapon.as_deref().unwrap_or("—")
    );
    println!(
        "  armor:      {}",
        c.equipped_armor.as_deref().unwrap_or("—")
    );
    println!("  inventory:  {}", join_or_dash(&c.inventory));
    println!();
    println!("  {}", "Quests".bold());
    println!("    active:    {}", join_or_dash(&c.active_quests));
    println!("    completed: {}", join_or_dash(&c.completed_quests));

    Ok(())
}
