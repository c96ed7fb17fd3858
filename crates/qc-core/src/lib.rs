//! Game engine for Quest Chronicles, a single-player turn-based text RPG.
//!
//! Provides characters and their progression, a stat effect resolver, a
//! bounded inventory with equipment slots, a quest graph with prerequisite
//! chains, and a turn-based combat engine. A [`GameSession`] ties them
//! together as the explicit game context.

pub mod catalog;
pub mod chance;
pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod inventory;
pub mod quest;
pub mod session;
pub mod stats;

pub use catalog::{Catalog, Item, ItemCatalog, ItemId, ItemKind, Quest, QuestCatalog, QuestId};
pub use chance::{Chance, FixedChance};
pub use character::{Character, CharacterClass, create_character};
pub use combat::{
    Battle, BattleController, BattleOutcome, BattleResult, CombatAction, Enemy, EnemyKind,
};
pub use config::SessionConfig;
pub use error::{GameError, GameResult};
pub use quest::QuestStatus;
pub use session::{GameSession, REVIVE_COST, RoundReport};
pub use stats::{Effect, Stat};
