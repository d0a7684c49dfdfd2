use std::fs;
use std::path::{Path, PathBuf};

use crate::io::outline_io::StoreError;
use crate::model::config::OutlineConfig;

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("outline").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<OutlineConfig, StoreError> {
    if !path.exists() {
        return Ok(OutlineConfig::default());
    }
    Ok(read_config(path)?.0)
}

/// Read the config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(path: &Path) -> Result<(OutlineConfig, toml_edit::DocumentMut), StoreError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| StoreError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let config: OutlineConfig = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), StoreError> {
    let write_err = |e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, doc.to_string()).map_err(write_err)?;
    Ok(())
}

/// Update `file.default` in the config document
pub fn set_default_file(doc: &mut toml_edit::DocumentMut, file: &str) {
    if !doc.contains_key("file") {
        doc["file"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["file"]["default"] = toml_edit::value(file);
}
