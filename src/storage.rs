//! File-backed string key/value store for client-side persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

pub struct LocalStorage {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Loads `path`. A missing or unreadable file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring corrupt storage file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        LocalStorage {
            path: Some(path),
            items,
        }
    }

    /// Storage that is never written anywhere.
    pub fn in_memory() -> Self {
        LocalStorage {
            path: None,
            items: BTreeMap::new(),
        }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<(), std::io::Error> {
        self.items.insert(key.to_string(), value.into());
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, text)
    }
}
