//! Characters: creation, stats, and boundary validation.
//!
//! A character is created once per game and mutated by every other part of
//! the engine. Name and class are fixed at creation; everything else is
//! public state guarded by the operations in [`progression`],
//! [`crate::stats`], [`crate::inventory`], and [`crate::quest`].

pub mod class;
pub mod progression;

pub use class::{BaseStats, CharacterClass};
pub use progression::{gain_experience, heal_character, revive_character, xp_threshold};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemId, QuestId};
use crate::error::{GameError, GameResult};
use crate::inventory::MAX_INVENTORY_SIZE;

/// Gold every new character starts with.
pub const STARTING_GOLD: u32 = 100;

/// The player's character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    class: CharacterClass,
    /// Current level (1-based).
    pub level: u32,
    /// Current health, between 0 and `max_health`.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Physical power, used by basic attacks.
    pub strength: i32,
    /// Magical power.
    pub magic: i32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Gold held.
    pub gold: u32,
    /// Carried item ids, in pickup order. Duplicates allowed.
    pub inventory: Vec<ItemId>,
    /// Quests in progress, in acceptance order.
    pub active_quests: Vec<QuestId>,
    /// Quests finished, in completion order.
    pub completed_quests: Vec<QuestId>,
    /// Item in the weapon slot.
    pub equipped_weapon: Option<ItemId>,
    /// Item in the armor slot.
    pub equipped_armor: Option<ItemId>,
}

impl Character {
    /// Create a level 1 character with the class's base stats.
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            name: name.into(),
            class,
            level: 1,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    /// The character's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The character's class.
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    /// Returns true if health has dropped to zero or below.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Experience still needed to reach the next level.
    pub fn xp_to_next_level(&self) -> u32 {
        xp_threshold(self.level).saturating_sub(self.experience)
    }

    /// Check the invariants of a character restored from outside the engine.
    pub fn validate(&self) -> GameResult<()> {
        let corrupt = |msg: String| Err(GameError::CorruptedData(msg));

        if self.name.trim().is_empty() {
            return corrupt("character name is empty".to_string());
        }
        if self.level < 1 {
            return corrupt("level must be at least 1".to_string());
        }
        if self.max_health <= 0 {
            return corrupt(format!("max_health {} must be positive", self.max_health));
        }
        if self.health < 0 || self.health > self.max_health {
            return corrupt(format!(
                "health {} outside 0..={}",
                self.health, self.max_health
            ));
        }
        if self.strength < 0 || self.magic < 0 {
            return corrupt(format!(
                "strength {} and magic {} must not be negative",
                self.strength, self.magic
            ));
        }
        if self.experience >= xp_threshold(self.level) {
            return corrupt(format!(
                "experience {} not below level {} threshold",
                self.experience, self.level
            ));
        }
        if self.inventory.len() > MAX_INVENTORY_SIZE {
            return corrupt(format!(
                "inventory holds {} items, limit is {MAX_INVENTORY_SIZE}",
                self.inventory.len()
            ));
        }

        let mut seen = HashSet::new();
        for id in &self.active_quests {
            if !seen.insert(id) {
                return corrupt(format!("quest '{id}' listed twice as active"));
            }
        }
        let mut done = HashSet::new();
        for id in &self.completed_quests {
            if !done.insert(id) {
                return corrupt(format!("quest '{id}' listed twice as completed"));
            }
            if seen.contains(id) {
                return corrupt(format!("quest '{id}' is both active and completed"));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} the {} (level {}, HP {}/{})",
            self.name, self.class, self.level, self.health, self.max_health
        )
    }
}

/// Create a new character from a class name.
pub fn create_character(name: &str, class_name: &str) -> GameResult<Character> {
    let class: CharacterClass = class_name.parse()?;
    tracing::info!(name, %class, "character created");
    Ok(Character::new(name, class))
}
