use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::config::OutlineConfig;
use crate::model::outline::Outline;
use crate::parse::{parse_outline, serialize_outline};

/// Environment variable naming the outline file when `--file` is absent
pub const FILE_ENV: &str = "OUTLINE_FILE";

/// Error type for outline and config I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit config: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Pick the outline file: explicit flag, then `OUTLINE_FILE`, then config.
pub fn resolve_path(flag: Option<&str>, config: &OutlineConfig) -> PathBuf {
    if let Some(path) = flag {
        return PathBuf::from(path);
    }
    match std::env::var(FILE_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(&config.file.default),
    }
}

/// Read and parse an outline file
pub fn load_outline(path: &Path) -> Result<Outline, StoreError> {
    let source = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (outline, dropped) = parse_outline(&source);
    log::debug!(
        "loaded {} item(s) from {} ({} line(s) ignored)",
        outline.len(),
        path.display(),
        dropped.len()
    );
    Ok(outline)
}

/// Load an outline, creating an empty file first when it is missing and
/// `auto_create` is set.
pub fn load_or_create(path: &Path, auto_create: bool) -> Result<Outline, StoreError> {
    if auto_create && !path.exists() {
        create_empty(path)?;
        return Ok(Outline::default());
    }
    load_outline(path)
}

fn create_empty(path: &Path) -> Result<(), StoreError> {
    let write_err = |e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::File::create(path).map_err(write_err)?;
    log::info!("created empty outline at {}", path.display());
    Ok(())
}

/// Serialize an outline and write it over `path` in one step
pub fn save_outline(path: &Path, outline: &Outline) -> Result<(), StoreError> {
    let content = serialize_outline(&outline.items);
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("saved {} item(s) to {}", outline.len(), path.display());
    Ok(())
}

/// Write to a temp file in the target directory, then rename over the target
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
