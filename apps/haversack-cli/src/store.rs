//! # Character File Store
//!
//! One JSON `Inventory` per file, standing in for the host's per-character
//! record store.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, info};

use haversack_core::Inventory;

/// Reads a character file.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read character file {}", path.display()))?;
    let inventory = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid inventory", path.display()))?;

    debug!(path = %path.display(), "Inventory loaded");
    Ok(inventory)
}

/// Writes a character file as pretty JSON, creating parent directories.
pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(inventory)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write character file {}", path.display()))?;

    debug!(path = %path.display(), "Inventory saved");
    Ok(())
}

/// Creates a character file holding the default inventory.
///
/// Refuses to overwrite an existing file.
pub fn init_inventory(path: &Path) -> Result<Inventory> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let inventory = Inventory::default();
    save_inventory(path, &inventory)?;
    info!(path = %path.display(), "Created character file");
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversack_core::{ItemCategory, ItemDraft};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party").join("brom.json");

        let mut inv = Inventory::default();
        inv.add_item(ItemDraft::new("Torch", ItemCategory::Consumable), &mut || {
            "torch-1".to_string()
        })
        .unwrap();

        save_inventory(&path, &inv).unwrap();
        assert_eq!(load_inventory(&path).unwrap(), inv);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brom.json");

        let created = init_inventory(&path).unwrap();
        assert_eq!(created, Inventory::default());
        assert!(init_inventory(&path).is_err());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_inventory(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid inventory"));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.json");
        std::fs::write(&path, r#"{ "items": [] }"#).unwrap();

        let inv = load_inventory(&path).unwrap();
        assert_eq!(inv.pack_type_id, "standard-pack");
    }
}
