//! Starter data files.

use std::fs;
use std::path::{Path, PathBuf};

use qc_core::{ItemCatalog, QuestCatalog};

use crate::catalog::{load_items, load_quests};
use crate::error::DataResult;

/// File name of the quest catalog inside the data directory.
pub const QUESTS_FILE: &str = "quests.txt";

/// File name of the item catalog inside the data directory.
pub const ITEMS_FILE: &str = "items.txt";

/// The starter quest catalog: one prerequisite chain and a side quest.
pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: first_steps
TITLE: First Steps
DESCRIPTION: Report to the village elder and learn the lay of the land.
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_trouble
TITLE: Goblin Trouble
DESCRIPTION: Drive the goblins out of the old mill.
REWARD_XP: 100
REWARD_GOLD: 50
REQUIRED_LEVEL: 1
PREREQUISITE: first_steps

QUEST_ID: orc_warband
TITLE: The Orc Warband
DESCRIPTION: Break the warband camped in the northern pass.
REWARD_XP: 300
REWARD_GOLD: 120
REQUIRED_LEVEL: 3
PREREQUISITE: goblin_trouble

QUEST_ID: slay_the_dragon
TITLE: Slay the Dragon
DESCRIPTION: Defeat the dragon terrorizing the village.
REWARD_XP: 1000
REWARD_GOLD: 500
REQUIRED_LEVEL: 6
PREREQUISITE: orc_warband

QUEST_ID: lost_ring
TITLE: The Lost Ring
DESCRIPTION: Find the innkeeper's ring somewhere in the well.
REWARD_XP: 40
REWARD_GOLD: 30
REQUIRED_LEVEL: 1
PREREQUISITE: NONE
";

/// The starter item catalog: potions, weapons, and armor.
pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:50
COST: 10
DESCRIPTION: Restores 50 health.

ITEM_ID: greater_health_potion
NAME: Greater Health Potion
TYPE: consumable
EFFECT: health:100
COST: 30
DESCRIPTION: Restores 100 health.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 50
DESCRIPTION: A plain but sturdy blade.

ITEM_ID: steel_sword
NAME: Steel Sword
TYPE: weapon
EFFECT: strength:10
COST: 120
DESCRIPTION: Well balanced and wickedly sharp.

ITEM_ID: oak_staff
NAME: Oak Staff
TYPE: weapon
EFFECT: magic:8
COST: 80
DESCRIPTION: Hums faintly with stored power.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: strength:2
COST: 40
DESCRIPTION: Light armor that does not slow you down.

ITEM_ID: chain_mail
NAME: Chain Mail
TYPE: armor
EFFECT: strength:4
COST: 100
DESCRIPTION: Heavy rings of riveted steel.
";

/// Write the starter `quests.txt` and `items.txt` into `dir` unless they
/// already exist. Returns the files that were created.
pub fn create_default_data_files(dir: &Path) -> DataResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut created = Vec::new();
    for (name, content) in [(QUESTS_FILE, DEFAULT_QUESTS), (ITEMS_FILE, DEFAULT_ITEMS)] {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "default data file created");
        created.push(path);
    }
    Ok(created)
}

/// Load both catalogs from a data directory.
pub fn load_catalogs(dir: &Path) -> DataResult<(QuestCatalog, ItemCatalog)> {
    let quests = load_quests(&dir.join(QUESTS_FILE))?;
    let items = load_items(&dir.join(ITEMS_FILE))?;
    Ok((quests, items))
}
