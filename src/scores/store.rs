use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use crate::scores::models::{NewScore, ScoreRecord};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Document collection of submitted scores.
pub trait ScoreStore: Send + Sync {
    fn all(&self) -> Result<Vec<ScoreRecord>, StoreError>;
    fn by_level(&self, level: i64) -> Result<Vec<ScoreRecord>, StoreError>;
    /// Stores the score under a freshly generated id.
    fn insert(&self, score: NewScore) -> Result<ScoreRecord, StoreError>;
}

struct Collection {
    records: Vec<ScoreRecord>,
    next_id: u64,
}

impl Collection {
    fn new(records: Vec<ScoreRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.strip_prefix("score-")?.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Collection { records, next_id }
    }

    fn by_level(&self, level: i64) -> Vec<ScoreRecord> {
        self.records.iter().filter(|r| r.is_for_level(level)).cloned().collect()
    }

    fn push(&mut self, score: NewScore) -> ScoreRecord {
        let record = score.into_record(format!("score-{}", self.next_id));
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }
}

pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(Collection::new(Vec::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MemoryStore {
    fn all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.inner.read().unwrap_or_else(PoisonError::into_inner).records.clone())
    }

    fn by_level(&self, level: i64) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.inner.read().unwrap_or_else(PoisonError::into_inner).by_level(level))
    }

    fn insert(&self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        Ok(self.inner.write().unwrap_or_else(PoisonError::into_inner).push(score))
    }
}

/// Keeps the whole collection in one JSON file, rewritten on every insert.
pub struct JsonFileStore {
    path: PathBuf,
    inner: RwLock<Collection>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<ScoreRecord> = match fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => serde_json::from_str(&text)?,
            Ok(_) => Vec::new(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), count = records.len(), "loaded score collection");
        Ok(JsonFileStore {
            path,
            inner: RwLock::new(Collection::new(records)),
        })
    }

    fn write(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.inner.read().unwrap_or_else(PoisonError::into_inner).records.clone())
    }

    fn by_level(&self, level: i64) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.inner.read().unwrap_or_else(PoisonError::into_inner).by_level(level))
    }

    fn insert(&self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let record = inner.push(score);
        if let Err(err) = self.write(&inner.records) {
            inner.records.pop();
            inner.next_id -= 1;
            return Err(err);
        }
        debug!(id = %record.id, "score stored");
        Ok(record)
    }
}
