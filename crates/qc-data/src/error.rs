//! Error types for data files and save records.

use std::path::PathBuf;

use qc_core::GameError;
use thiserror::Error;

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while reading or writing game data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A catalog file does not exist.
    #[error("data file not found: {}", .0.display())]
    MissingDataFile(PathBuf),

    /// A catalog record is malformed.
    #[error("line {line}: {message}")]
    InvalidDataFormat {
        /// 1-based line number of the offending line or block.
        line: usize,
        /// What is wrong with it.
        message: String,
    },

    /// Records are well-formed but inconsistent (duplicate ids, broken
    /// prerequisite graph, impossible character state).
    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// No save file exists for this character.
    #[error("character '{0}' not found")]
    CharacterNotFound(String),

    /// A save file is missing fields or holds unreadable values.
    #[error("invalid save data: {0}")]
    InvalidSaveData(String),

    /// Game engine error.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Convert an engine error, surfacing integrity failures as
    /// [`DataError::CorruptedData`].
    pub(crate) fn from_game(err: GameError) -> Self {
        match err {
            GameError::CorruptedData(msg) => Self::CorruptedData(msg),
            other => Self::Game(other),
        }
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidDataFormat {
            line,
            message: message.into(),
        }
    }
}
