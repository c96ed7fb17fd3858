//! Character save files.
//!
//! One character per file, named `<name>_save.txt`, holding one `key:value`
//! line per field. List fields are comma-joined; an empty list is an empty
//! value.

use std::fs;
use std::path::{Path, PathBuf};

use qc_core::{Character, CharacterClass};

use crate::error::{DataError, DataResult};

/// Suffix appended to the character name to form the save file name.
pub const SAVE_SUFFIX: &str = "_save.txt";

const REQUIRED_FIELDS: [&str; 12] = [
    "name",
    "class",
    "level",
    "health",
    "max_health",
    "strength",
    "magic",
    "experience",
    "gold",
    "inventory",
    "active_quests",
    "completed_quests",
];

const OPTIONAL_FIELDS: [&str; 2] = ["equipped_weapon", "equipped_armor"];

/// Render a character as a save record.
pub fn encode_character(character: &Character) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: String| {
        out.push_str(key);
        out.push(':');
        out.push_str(&value);
        out.push('\n');
    };
    line("name", character.name().to_string());
    line("class", character.class().to_string());
    line("level", character.level.to_string());
    line("health", character.health.to_string());
    line("max_health", character.max_health.to_string());
    line("strength", character.strength.to_string());
    line("magic", character.magic.to_string());
    line("experience", character.experience.to_string());
    line("gold", character.gold.to_string());
    line("inventory", character.inventory.join(","));
    line("active_quests", character.active_quests.join(","));
    line("completed_quests", character.completed_quests.join(","));
    if let Some(weapon) = &character.equipped_weapon {
        line("equipped_weapon", weapon.clone());
    }
    if let Some(armor) = &character.equipped_armor {
        line("equipped_armor", armor.clone());
    }
    out
}

/// Read a save record back into a character.
///
/// Fails with `InvalidSaveData` on unknown, duplicate or missing fields and
/// unreadable values, and with `CorruptedData` if the restored character
/// breaks an invariant.
pub fn decode_character(text: &str) -> DataResult<Character> {
    let mut fields: Vec<(&str, &str)> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| invalid(format!("expected 'key:value', got '{line}'")))?;
        let key = key.trim();
        if !REQUIRED_FIELDS.contains(&key) && !OPTIONAL_FIELDS.contains(&key) {
            return Err(invalid(format!("unknown field '{key}'")));
        }
        if fields.iter().any(|(k, _)| *k == key) {
            return Err(invalid(format!("duplicate field '{key}'")));
        }
        fields.push((key, value.trim()));
    }

    let get = |key: &str| fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
    let require = |key: &str| get(key).ok_or_else(|| invalid(format!("missing field '{key}'")));

    let class_name = require("class")?;
    let class = CharacterClass::parse(class_name)
        .ok_or_else(|| invalid(format!("unknown class '{class_name}'")))?;

    let mut character = Character::new(require("name")?, class);
    character.level = number(require("level")?, "level")?;
    character.health = number(require("health")?, "health")?;
    character.max_health = number(require("max_health")?, "max_health")?;
    character.strength = number(require("strength")?, "strength")?;
    character.magic = number(require("magic")?, "magic")?;
    character.experience = number(require("experience")?, "experience")?;
    character.gold = number(require("gold")?, "gold")?;
    character.inventory = list(require("inventory")?);
    character.active_quests = list(require("active_quests")?);
    character.completed_quests = list(require("completed_quests")?);
    character.equipped_weapon = get("equipped_weapon").filter(|v| !v.is_empty()).map(str::to_string);
    character.equipped_armor = get("equipped_armor").filter(|v| !v.is_empty()).map(str::to_string);

    character.validate().map_err(DataError::from_game)?;
    Ok(character)
}

fn invalid(message: String) -> DataError {
    DataError::InvalidSaveData(message)
}

fn number<T: std::str::FromStr>(value: &str, key: &str) -> DataResult<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("{key} must be an integer, got '{value}'")))
}

fn list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

/// Path of a character's save file. Rejects names that cannot be used as a
/// file name, or that would not read back unchanged from a save record.
pub fn save_path(dir: &Path, name: &str) -> DataResult<PathBuf> {
    let bad = name.trim().is_empty()
        || name.trim() != name
        || name.starts_with('.')
        || name.contains(['/', '\\', '\n', '\r', ':']);
    if bad {
        return Err(invalid(format!("'{name}' cannot be used as a save name")));
    }
    Ok(dir.join(format!("{name}{SAVE_SUFFIX}")))
}

/// Write a character to `<dir>/<name>_save.txt`, creating the directory.
pub fn save_character(character: &Character, dir: &Path) -> DataResult<PathBuf> {
    let path = save_path(dir, character.name())?;
    fs::create_dir_all(dir)?;
    fs::write(&path, encode_character(character))?;
    tracing::info!(name = character.name(), path = %path.display(), "character saved");
    Ok(path)
}

/// Load a character by name.
pub fn load_character(name: &str, dir: &Path) -> DataResult<Character> {
    let path = save_path(dir, name)?;
    if !path.is_file() {
        return Err(DataError::CharacterNotFound(name.to_string()));
    }
    let character = decode_character(&fs::read_to_string(&path)?)?;
    tracing::info!(name, path = %path.display(), "character loaded");
    Ok(character)
}

/// Names of all saved characters, sorted. A missing directory has none.
pub fn list_saved_characters(dir: &Path) -> DataResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            e.file_name()
                .to_str()
                .and_then(|f| f.strip_suffix(SAVE_SUFFIX))
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Delete a character's save file.
pub fn delete_character(name: &str, dir: &Path) -> DataResult<()> {
    let path = save_path(dir, name)?;
    if !path.is_file() {
        return Err(DataError::CharacterNotFound(name.to_string()));
    }
    fs::remove_file(&path)?;
    tracing::info!(name, "character deleted");
    Ok(())
}
