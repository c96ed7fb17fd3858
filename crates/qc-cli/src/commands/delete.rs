use std::path::Path;

pub fn run(save_dir: &Path, name: &str) -> Result<(), String> {
    qc_data::delete_character(name, save_dir).map_err(|e| e.to_string())?;
    println!("  Deleted {name}");
    Ok(())
}
