//! File-backed preference store
//!
//! Stands in for browser local storage: a flat string-to-string map kept
//! in a JSON file. The token and the theme preference each live under one
//! named key; the theme is independent of auth state.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;

/// Key under which the bearer token is persisted
pub const TOKEN_KEY: &str = "token";
/// Key under which the theme preference is persisted
pub const THEME_KEY: &str = "theme";

/// Persistent key/value store backed by a JSON file
pub struct LocalStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl LocalStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring corrupt local store {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        LocalStore {
            path,
            values: RwLock::new(values),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().expect("local store lock poisoned");
        values.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().expect("local store lock poisoned");
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().expect("local store lock poisoned");
        values.remove(key);
        self.flush(&values)
    }

    /// Theme preference, defaulting to light
    pub fn theme(&self) -> String {
        self.get(THEME_KEY).unwrap_or_else(|| "light".to_string())
    }

    pub fn set_theme(&self, theme: &str) -> Result<()> {
        self.set(THEME_KEY, theme)
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
