//! Read-only catalogs of item and quest definitions.
//!
//! Catalogs are loaded once at startup and shared by every operation that
//! needs to look up an id. Entries are validated when they are inserted, so
//! the engine never re-checks their shape.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::stats::Effect;

/// Unique key of an item definition.
pub type ItemId = String;

/// Unique key of a quest definition.
pub type QuestId = String;

/// A record that can be stored in a [`Catalog`].
pub trait CatalogEntry {
    /// The entry's unique key.
    fn id(&self) -> &str;
}

/// The category of an item, which decides how it can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Occupies the weapon slot.
    Weapon,
    /// Occupies the armor slot.
    Armor,
    /// Used up on use.
    Consumable,
}

impl ItemKind {
    /// Parse an item kind from its record name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Some(Self::Weapon),
            "armor" => Some(Self::Armor),
            "consumable" => Some(Self::Consumable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Consumable => write!(f, "consumable"),
        }
    }
}

/// An item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique key.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: ItemKind,
    /// Stat change applied on use or equip.
    pub effect: Effect,
    /// Shop price in gold.
    pub cost: u32,
    /// Flavor text.
    pub description: String,
}

impl CatalogEntry for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A quest definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique key.
    pub id: QuestId,
    /// Display title.
    pub title: String,
    /// Flavor text.
    pub description: String,
    /// Experience granted on completion.
    pub reward_xp: u32,
    /// Gold granted on completion.
    pub reward_gold: u32,
    /// Minimum character level to accept.
    pub required_level: u32,
    /// Quest that must be completed first, if any.
    pub prerequisite: Option<QuestId>,
}

impl CatalogEntry for Quest {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A keyed, immutable-after-load collection of definitions.
///
/// Iteration is ordered by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog<T> {
    entries: BTreeMap<String, T>,
}

/// Catalog of item definitions.
pub type ItemCatalog = Catalog<Item>;

/// Catalog of quest definitions.
pub type QuestCatalog = Catalog<Quest>;

impl<T: CatalogEntry> Catalog<T> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry. Fails if the id is already present.
    pub fn insert(&mut self, entry: T) -> GameResult<()> {
        let id = entry.id().to_string();
        if self.entries.contains_key(&id) {
            return Err(GameError::CorruptedData(format!("duplicate id '{id}'")));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Build a catalog from entries, rejecting duplicate ids.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> GameResult<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate over all entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: CatalogEntry> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog<Item> {
    /// Look up an item, failing with `ItemNotFound` if absent.
    pub fn item(&self, id: &str) -> GameResult<&Item> {
        self.get(id)
            .ok_or_else(|| GameError::ItemNotFound(id.to_string()))
    }
}

impl Catalog<Quest> {
    /// Look up a quest, failing with `QuestNotFound` if absent.
    pub fn quest(&self, id: &str) -> GameResult<&Quest> {
        self.get(id)
            .ok_or_else(|| GameError::QuestNotFound(id.to_string()))
    }

    /// Check that every prerequisite exists and the prerequisite graph has no
    /// cycles.
    pub fn validate_prerequisites(&self) -> GameResult<()> {
        let missing = self
            .iter()
            .filter_map(|q| q.prerequisite.as_ref())
            .find(|prereq| !self.contains(prereq));
        if let Some(prereq) = missing {
            return Err(GameError::QuestNotFound(prereq.clone()));
        }

        // Each quest has at most one outgoing edge, so walking every chain
        // with a visited set finds any cycle.
        let mut acyclic: HashSet<&str> = HashSet::new();
        for quest in self.iter() {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut current = Some(quest);
            while let Some(q) = current {
                if acyclic.contains(q.id.as_str()) {
                    break;
                }
                if !seen.insert(q.id.as_str()) {
                    return Err(GameError::CorruptedData(format!(
                        "prerequisite cycle through quest '{}'",
                        q.id
                    )));
                }
                current = q.prerequisite.as_deref().and_then(|p| self.get(p));
            }
            acyclic.extend(seen);
        }
        Ok(())
    }
}
