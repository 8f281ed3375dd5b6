//! REPL configuration
//!
//! Settings for the interactive driver, loaded from `config.toml` under the
//! user configuration directory:
//!
//! ```toml
//! prompt_prefix = "pre"
//! continuation_prompt = "...> "
//! history_size = 500
//! ```
//!
//! A missing file means defaults; a malformed file is reported and ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const APP_DIR: &str = "preflight";

/// Driver configuration (the whole `config.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ReplConfig {
    /// Prefix of the numbered prompt, rendered as `prefix[n]> `.
    #[serde(default = "default_prompt_prefix")]
    pub prompt_prefix: String,

    /// Prompt shown while the pipeline is buffering or a string is open.
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,

    /// Maximum number of entries kept in the history file.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_prompt_prefix() -> String {
    "pre".to_string()
}

fn default_continuation_prompt() -> String {
    "...> ".to_string()
}

fn default_history_size() -> usize {
    1000
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt_prefix: default_prompt_prefix(),
            continuation_prompt: default_continuation_prompt(),
            history_size: default_history_size(),
        }
    }
}

impl ReplConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists or it cannot be read.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from_path(&path))
            .unwrap_or_default()
    }

    /// `<config dir>/preflight/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// `<data dir>/preflight/history.txt`
    pub fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join("history.txt"))
    }

    /// Load from an explicit path. Returns `None` if the file is missing or
    /// unparseable (a parse error is reported, not fatal).
    pub fn load_from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(path).ok()?;
        match Self::parse(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render the numbered prompt for entry `n`.
    pub fn prompt(&self, n: usize) -> String {
        format!("{}[{}]> ", self.prompt_prefix, n)
    }
}
