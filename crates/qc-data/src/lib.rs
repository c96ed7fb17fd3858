//! File formats for Quest Chronicles.
//!
//! Reads the quest and item catalogs (blank-line separated `KEY: value`
//! blocks), writes and restores character save files, and bootstraps a data
//! directory with starter content. Everything is validated here, so the
//! engine in `qc-core` only ever sees well-formed records.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod records;
pub mod save;

pub use catalog::{load_items, load_quests, parse_items, parse_quests};
pub use defaults::{ITEMS_FILE, QUESTS_FILE, create_default_data_files, load_catalogs};
pub use error::{DataError, DataResult};
pub use save::{
    decode_character, delete_character, encode_character, list_saved_characters,
    load_character, save_character,
};
