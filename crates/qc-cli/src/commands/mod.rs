pub mod catalog;
pub mod delete;
pub mod init;
pub mod list;
pub mod new;
pub mod play;
pub mod show;

use std::path::Path;

use qc_core::{ItemCatalog, QuestCatalog};

/// Load both catalogs, writing the starter files first if they are missing.
fn load_catalogs(data_dir: &Path) -> Result<(QuestCatalog, ItemCatalog), String> {
    qc_data::create_default_data_files(data_dir)
        .map_err(|e| format!("cannot prepare data directory: {e}"))?;
    qc_data::load_catalogs(data_dir).map_err(|e| e.to_string())
}

/// Render a list for display, or a dash when empty.
fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}
