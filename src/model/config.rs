use serde::{Deserialize, Serialize};

/// Configuration from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default)]
    pub file: FileConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Outline file used when `--file` is not given
    #[serde(default = "default_file")]
    pub default: String,
    /// Create the outline file (and its parent directories) when missing
    #[serde(default = "default_true")]
    pub auto_create: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            default: default_file(),
            auto_create: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Width of the id column in listings
    #[serde(default = "default_id_width")]
    pub id_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            id_width: default_id_width(),
        }
    }
}

fn default_file() -> String {
    "TODO.md".to_string()
}

fn default_true() -> bool {
    true
}

fn default_id_width() -> usize {
    5
}
