//! Variant store commands

use crate::cli::error::CliError;
use crate::config::ShowcaseConfig;
use crate::store::{ShowcaseInfo, ShowcaseStore};
use std::path::Path;

/// Open the store configured for a workspace
pub fn open_store(workspace: &Path, config: &ShowcaseConfig) -> ShowcaseStore {
    ShowcaseStore::from_config(config, workspace)
}

/// Handle the list command
pub fn handle_list(store: &ShowcaseStore) -> Result<Vec<String>, CliError> {
    let names = store.list()?;
    if names.is_empty() {
        println!("No showcases in {}", store.dir().display());
    }
    for name in &names {
        if store.is_baseline(name) {
            println!("{} (baseline)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(names)
}

/// Handle the create command
///
/// The variant is copied from `source`, or from the baseline when no source is given.
pub fn handle_create(
    store: &ShowcaseStore,
    variant: &str,
    source: Option<&str>,
    description: &str,
) -> Result<(), CliError> {
    let source = source.unwrap_or(store.baseline());
    store.create_variant(source, variant, description)?;
    println!("Created variant '{}' from '{}'", variant, source);
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(store: &ShowcaseStore, name: &str) -> Result<(), CliError> {
    store.delete(name)?;
    println!("Deleted showcase '{}'", name);
    Ok(())
}

/// Handle the rename command
pub fn handle_rename(
    store: &ShowcaseStore,
    old_name: &str,
    new_name: &str,
) -> Result<(), CliError> {
    store.rename(old_name, new_name)?;
    println!("Renamed showcase '{}' to '{}'", old_name, new_name);
    Ok(())
}

/// Handle the info command, printing the details as JSON
pub fn handle_info(store: &ShowcaseStore, name: &str) -> Result<ShowcaseInfo, CliError> {
    let info = store.info(name)?;
    let json = serde_json::to_string_pretty(&info).map_err(|e| {
        CliError::SerializationError(format!("Failed to serialize showcase info: {}", e))
    })?;
    println!("{}", json);
    Ok(info)
}
