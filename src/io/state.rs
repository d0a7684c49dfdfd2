use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::outline_io::atomic_write;
use crate::ops::visibility::CollapseState;

/// Name of the sidecar file kept next to outline files
pub const STATE_FILE: &str = ".outline-state.json";

/// Persisted view state for every outline file in one directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiState {
    /// Collapse state keyed by outline file name
    #[serde(default)]
    pub files: HashMap<String, CollapseState>,
}

impl UiState {
    pub fn collapse_state(&self, outline_path: &Path) -> CollapseState {
        self.files
            .get(&file_key(outline_path))
            .cloned()
            .unwrap_or_default()
    }

    /// Store the state for a file, dropping the entry once nothing is collapsed
    pub fn set_collapse_state(&mut self, outline_path: &Path, state: CollapseState) {
        let key = file_key(outline_path);
        if state.collapsed.is_empty() {
            self.files.remove(&key);
        } else {
            self.files.insert(key, state);
        }
    }
}

fn file_key(outline_path: &Path) -> String {
    outline_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The sidecar path for an outline file
pub fn state_path(outline_path: &Path) -> PathBuf {
    match outline_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(STATE_FILE),
        _ => PathBuf::from(STATE_FILE),
    }
}

/// Read the sidecar next to `outline_path`. Missing or unreadable state is
/// treated as "nothing collapsed".
pub fn read_ui_state(outline_path: &Path) -> UiState {
    let path = state_path(outline_path);
    let Ok(content) = fs::read_to_string(&path) else {
        return UiState::default();
    };
    match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("ignoring unreadable state file {}: {}", path.display(), e);
            UiState::default()
        }
    }
}

/// Write the sidecar next to `outline_path`, replacing it in one step
pub fn write_ui_state(outline_path: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = state_path(outline_path);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let outline = dir.path().join("TODO.md");

        let mut collapse = CollapseState::default();
        collapse.collapsed.insert("# Work".into());
        collapse.collapsed.insert("## Later".into());

        let mut state = UiState::default();
        state.set_collapse_state(&outline, collapse.clone());
        write_ui_state(&outline, &state).unwrap();

        assert!(dir.path().join(STATE_FILE).exists());
        let loaded = read_ui_state(&outline);
        assert_eq!(loaded.collapse_state(&outline), collapse);
    }

    #[test]
    fn rewrite_replaces_sidecar_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let outline = dir.path().join("TODO.md");

        let mut collapse = CollapseState::default();
        collapse.collapsed.insert("# Work".into());
        let mut state = UiState::default();
        state.set_collapse_state(&outline, collapse);
        write_ui_state(&outline, &state).unwrap();

        state.set_collapse_state(&outline, CollapseState::default());
        write_ui_state(&outline, &state).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(STATE_FILE)]);
        assert!(read_ui_state(&outline).files.is_empty());
    }

    #[test]
    fn files_in_one_directory_are_separate() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");

        let mut collapse = CollapseState::default();
        collapse.collapsed.insert("# Only A".into());
        let mut state = UiState::default();
        state.set_collapse_state(&a, collapse);

        assert_eq!(state.collapse_state(&a).collapsed.len(), 1);
        assert!(state.collapse_state(&b).collapsed.is_empty());
    }

    #[test]
    fn empty_state_removes_entry() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let mut collapse = CollapseState::default();
        collapse.collapsed.insert("# X".into());
        let mut state = UiState::default();
        state.set_collapse_state(&a, collapse);
        state.set_collapse_state(&a, CollapseState::default());
        assert!(state.files.is_empty());
    }

    #[test]
    fn read_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let state = read_ui_state(&dir.path().join("TODO.md"));
        assert!(state.files.is_empty());
    }

    #[test]
    fn read_malformed_json_returns_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not json {{{").unwrap();
        let state = read_ui_state(&dir.path().join("TODO.md"));
        assert!(state.files.is_empty());
    }

    #[test]
    fn relative_outline_path_uses_current_dir() {
        assert_eq!(state_path(Path::new("TODO.md")), PathBuf::from(STATE_FILE));
        assert_eq!(
            state_path(Path::new("notes/TODO.md")),
            Path::new("notes").join(STATE_FILE)
        );
    }
}
