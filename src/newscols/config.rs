use crate::block::{get_block_type, BlockType};
use crate::error::{NewscolsError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const LOCAL_DIR: &str = ".newscols";
const DEFAULT_DOCUMENT_EXT: &str = ".html";

/// Configuration for newscols, stored in .newscols/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewscolsConfig {
    /// Block type inserted by `new` when none is given
    #[serde(default = "default_block")]
    pub default_block: String,

    /// File extension of stored documents (e.g. ".html")
    #[serde(default = "default_document_ext")]
    pub document_ext: String,
}

fn default_block() -> String {
    BlockType::NEWSPAPER_COLUMNS.name.to_string()
}

fn default_document_ext() -> String {
    DEFAULT_DOCUMENT_EXT.to_string()
}

impl Default for NewscolsConfig {
    fn default() -> Self {
        Self {
            default_block: default_block(),
            document_ext: default_document_ext(),
        }
    }
}

/// Keys accepted by [`NewscolsConfig::get`] and [`NewscolsConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["default-block", "document-ext"];

impl NewscolsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NewscolsError::Io)?;
        let config: NewscolsConfig =
            serde_json::from_str(&content).map_err(NewscolsError::Serialization)?;
        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NewscolsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NewscolsError::Serialization)?;
        fs::write(config_path, content).map_err(NewscolsError::Io)?;
        Ok(())
    }

    /// Directory holding the config that applies to `work_dir`: the local
    /// `.newscols/` if it has a config file, else the user config directory
    /// if it has one, else the local directory (where `set` will create it).
    pub fn locate(work_dir: &Path) -> PathBuf {
        let local = work_dir.join(LOCAL_DIR);
        if local.join(CONFIG_FILENAME).exists() {
            return local;
        }
        if let Some(global) = global_config_dir() {
            if global.join(CONFIG_FILENAME).exists() {
                return global;
            }
        }
        local
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-block" => Some(self.default_block.clone()),
            "document-ext" => Some(self.document_ext.clone()),
            _ => None,
        }
    }

    /// Set a value by key. Returns a user-facing message on invalid input.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-block" => {
                if get_block_type(value).is_none() {
                    return Err(format!("Unknown block type: {}", value));
                }
                self.default_block = value.to_string();
                Ok(())
            }
            "document-ext" => {
                self.set_document_ext(value);
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Set the document extension (normalizes to start with a dot)
    pub fn set_document_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.document_ext = ext.to_string();
        } else {
            self.document_ext = format!(".{}", ext);
        }
    }

    /// Block type used by `new`; an unknown stored name falls back to the default.
    pub fn default_block_type(&self) -> &'static BlockType {
        get_block_type(&self.default_block).unwrap_or(&BlockType::NEWSPAPER_COLUMNS)
    }
}

fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "newscols", "newscols").map(|dirs| dirs.config_dir().to_path_buf())
}
