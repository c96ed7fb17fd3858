//! Error types for the game engine.

use crate::catalog::ItemKind;

/// Convenience result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while playing.
///
/// Every variant is recoverable: the caller reports it and re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The requested character class does not exist.
    #[error("{0} is not an available class")]
    InvalidCharacterClass(String),

    /// A stat name in an effect is not recognized.
    #[error("invalid stat: {0}")]
    InvalidStat(String),

    /// An effect string is not of the form `stat:value`.
    #[error("invalid effect '{0}', expected 'stat:value'")]
    InvalidEffect(String),

    /// The item is not held, or not present in the catalog.
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    /// The item exists but cannot be used this way.
    #[error("item '{item}' is {found}, not {expected}")]
    InvalidItemType {
        /// The offending item id.
        item: String,
        /// The kind the operation needs.
        expected: ItemKind,
        /// The kind the catalog records.
        found: ItemKind,
    },

    /// The inventory has no free space.
    #[error("inventory is full ({capacity} items)")]
    InventoryFull {
        /// Maximum number of items.
        capacity: usize,
    },

    /// Not enough gold for the operation.
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientResources {
        /// Gold required.
        needed: u32,
        /// Gold held.
        available: u32,
    },

    /// The character's level is below the quest requirement.
    #[error("quest '{quest}' requires level {required}, character is level {current}")]
    InsufficientLevel {
        /// Quest id.
        quest: String,
        /// Level the quest requires.
        required: u32,
        /// The character's level.
        current: u32,
    },

    /// The quest id is not in the catalog.
    #[error("quest '{0}' not found")]
    QuestNotFound(String),

    /// The quest's prerequisite has not been completed.
    #[error("quest '{quest}' requires completing '{prerequisite}' first")]
    QuestRequirementsNotMet {
        /// Quest id.
        quest: String,
        /// The prerequisite quest id.
        prerequisite: String,
    },

    /// The quest is already in progress.
    #[error("quest '{0}' is already active")]
    QuestAlreadyActive(String),

    /// The quest was already completed.
    #[error("quest '{0}' is already completed")]
    QuestAlreadyCompleted(String),

    /// The quest is not currently active.
    #[error("quest '{0}' is not active")]
    QuestNotActive(String),

    /// The character is dead and cannot act.
    #[error("{0} is dead")]
    CharacterDead(String),

    /// A combat operation was attempted outside of the right battle phase.
    #[error("combat is not active")]
    CombatNotActive,

    /// A non-combat operation was attempted during a battle.
    #[error("a battle is in progress")]
    BattleInProgress,

    /// The enemy type does not exist.
    #[error("invalid enemy type: {0}")]
    InvalidTarget(String),

    /// Catalog or save data violates an invariant.
    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// Invalid choice or command usage.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
