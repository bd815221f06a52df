// config.rs
use dotenv::dotenv;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Per-message matching switches. Owned by [`ConfigStore`]; readers get a
/// snapshot and never write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    pub enabled: bool,
    pub case_sensitive: bool,
    pub session_whitelist: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            enabled: true,
            case_sensitive: true,
            session_whitelist: Vec::new(),
        }
    }
}

impl MatchConfig {
    /// Field-by-field parse. Bad fields fall back to their default instead of
    /// discarding the whole document; a whitelist that is not a list allows nobody.
    pub fn from_value(value: &Value) -> Self {
        let defaults = MatchConfig::default();
        let Some(obj) = value.as_object() else {
            warn!("Match config is not a JSON object, using defaults");
            return defaults;
        };

        let enabled = bool_field(obj.get("enabled"), "enabled", defaults.enabled);
        let case_sensitive =
            bool_field(obj.get("case_sensitive"), "case_sensitive", defaults.case_sensitive);

        let session_whitelist = match obj.get("session_whitelist") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item.as_str() {
                    Some(s) => Some(s.to_string()),
                    None => {
                        warn!("Ignoring non-string session_whitelist entry: {}", item);
                        None
                    }
                })
                .collect(),
            Some(other) => {
                warn!("session_whitelist is not a list ({}), no session will be processed", other);
                Vec::new()
            }
        };

        MatchConfig { enabled, case_sensitive, session_whitelist }
    }

    pub fn allows_session(&self, session_id: &str) -> bool {
        self.session_whitelist.iter().any(|s| s == session_id)
    }
}

fn bool_field(value: Option<&Value>, name: &str, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            warn!("Config field {} should be a bool, got {}; using {}", name, other, default);
            default
        }
    }
}

/// File-backed holder of the live [`MatchConfig`]. Cloning shares the same
/// underlying snapshot, so a reload is seen by every clone.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    current: Arc<RwLock<MatchConfig>>,
}

impl ConfigStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = read_config_file(&path);
        ConfigStore { path, current: Arc::new(RwLock::new(config)) }
    }

    /// In-memory store, mainly for tests and embedding.
    pub fn fixed(config: MatchConfig) -> Self {
        ConfigStore { path: PathBuf::new(), current: Arc::new(RwLock::new(config)) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> MatchConfig {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-reads the backing file and swaps in the result.
    pub fn reload(&self) -> MatchConfig {
        let config = read_config_file(&self.path);
        self.replace(config.clone());
        info!(
            "Match config reloaded: enabled={}, case_sensitive={}, sessions={}",
            config.enabled,
            config.case_sensitive,
            config.session_whitelist.len()
        );
        config
    }

    pub fn replace(&self, config: MatchConfig) {
        match self.current.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}

fn read_config_file(path: &Path) -> MatchConfig {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No match config at {}, using defaults", path.display());
            return MatchConfig::default();
        }
        Err(e) => {
            warn!("Failed to read match config {}: {}; using defaults", path.display(), e);
            return MatchConfig::default();
        }
    };
    match serde_json::from_str::<Value>(&contents) {
        Ok(value) => MatchConfig::from_value(&value),
        Err(e) => {
            warn!("Failed to parse match config {}: {}; using defaults", path.display(), e);
            MatchConfig::default()
        }
    }
}

/// Process-level settings taken from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub card_dir: PathBuf,
    pub rev_index_path: PathBuf,
    pub match_config_path: PathBuf,
    pub bind_addr: String,
    pub api_key: Option<String>,
    pub console_session_id: String,
    pub interactive: bool,
}

impl AppSettings {
    pub fn from_env() -> Self {
        dotenv().ok();
        AppSettings {
            card_dir: env_or("CARD_DIR", "cards").into(),
            rev_index_path: env_or("REV_INDEX_PATH", "data/rev_index.json").into(),
            match_config_path: env_or("MATCH_CONFIG_PATH", "config/match_config.json").into(),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:8080"),
            api_key: env::var("API_KEY").ok().map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
            console_session_id: env_or("CONSOLE_SESSION_ID", "console"),
            interactive: env::var("INTERACTIVE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
