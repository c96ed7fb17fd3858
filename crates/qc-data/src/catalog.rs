//! Quest and item catalog files.

use std::path::Path;

use qc_core::{Effect, GameError, Item, ItemCatalog, ItemKind, Quest, QuestCatalog};

use crate::error::{DataError, DataResult};
use crate::records::{Block, parse_blocks};

const QUEST_KEYS: [&str; 7] = [
    "QUEST_ID",
    "TITLE",
    "DESCRIPTION",
    "REWARD_XP",
    "REWARD_GOLD",
    "REQUIRED_LEVEL",
    "PREREQUISITE",
];

const ITEM_KEYS: [&str; 6] = ["ITEM_ID", "NAME", "TYPE", "EFFECT", "COST", "DESCRIPTION"];

/// Parse a quest catalog and check its prerequisite graph.
pub fn parse_quests(text: &str) -> DataResult<QuestCatalog> {
    let mut catalog = QuestCatalog::new();
    for block in parse_blocks(text)? {
        catalog
            .insert(quest_from_block(&block)?)
            .map_err(DataError::from_game)?;
    }
    catalog
        .validate_prerequisites()
        .map_err(DataError::from_game)?;
    Ok(catalog)
}

/// Parse an item catalog.
pub fn parse_items(text: &str) -> DataResult<ItemCatalog> {
    let mut catalog = ItemCatalog::new();
    for block in parse_blocks(text)? {
        catalog
            .insert(item_from_block(&block)?)
            .map_err(DataError::from_game)?;
    }
    Ok(catalog)
}

/// Load the quest catalog from a file.
pub fn load_quests(path: &Path) -> DataResult<QuestCatalog> {
    let catalog = parse_quests(&read_data_file(path)?)?;
    tracing::info!(path = %path.display(), count = catalog.len(), "quests loaded");
    Ok(catalog)
}

/// Load the item catalog from a file.
pub fn load_items(path: &Path) -> DataResult<ItemCatalog> {
    let catalog = parse_items(&read_data_file(path)?)?;
    tracing::info!(path = %path.display(), count = catalog.len(), "items loaded");
    Ok(catalog)
}

fn read_data_file(path: &Path) -> DataResult<String> {
    if !path.is_file() {
        return Err(DataError::MissingDataFile(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn quest_from_block(block: &Block) -> DataResult<Quest> {
    block.check_keys(&QUEST_KEYS)?;
    let prerequisite = block
        .get("PREREQUISITE")
        .map(|f| f.value.as_str())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
        .map(str::to_string);

    let level_field = block.require("REQUIRED_LEVEL")?;
    let required_level = block.require_u32("REQUIRED_LEVEL")?;
    if required_level == 0 {
        return Err(DataError::format(
            level_field.line,
            "REQUIRED_LEVEL must be at least 1",
        ));
    }

    Ok(Quest {
        id: non_empty(block, "QUEST_ID")?,
        title: non_empty(block, "TITLE")?,
        description: optional(block, "DESCRIPTION"),
        reward_xp: block.require_u32("REWARD_XP")?,
        reward_gold: block.require_u32("REWARD_GOLD")?,
        required_level,
        prerequisite,
    })
}

fn item_from_block(block: &Block) -> DataResult<Item> {
    block.check_keys(&ITEM_KEYS)?;

    let kind_field = block.require("TYPE")?;
    let kind = ItemKind::parse(&kind_field.value).ok_or_else(|| {
        DataError::format(
            kind_field.line,
            format!("unknown item type '{}'", kind_field.value),
        )
    })?;

    let effect_field = block.require("EFFECT")?;
    let effect: Effect = effect_field
        .value
        .parse()
        .map_err(|e: GameError| DataError::format(effect_field.line, e.to_string()))?;

    Ok(Item {
        id: non_empty(block, "ITEM_ID")?,
        name: non_empty(block, "NAME")?,
        kind,
        effect,
        cost: block.require_u32("COST")?,
        description: optional(block, "DESCRIPTION"),
    })
}

fn non_empty(block: &Block, key: &str) -> DataResult<String> {
    let field = block.require(key)?;
    if field.value.is_empty() {
        return Err(DataError::format(field.line, format!("{key} is empty")));
    }
    Ok(field.value.clone())
}

fn optional(block: &Block, key: &str) -> String {
    block.get(key).map(|f| f.value.clone()).unwrap_or_default()
}
