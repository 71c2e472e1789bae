//! Local persistence of chosen outputs.
//!
//! One named collection per generator, each an ordered JSON array rewritten
//! wholesale on every change. The backing key-value store is injected so the
//! same repository runs against memory in tests and files for the CLI.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PitchcraftError, Result};
use crate::kind::GeneratorKind;
use crate::request::GenerationRequest;

/// Minimal string key-value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| PitchcraftError::Storage {
            message: "memory store lock poisoned".to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| PitchcraftError::Storage {
            message: "memory store lock poisoned".to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per collection under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(PitchcraftError::Storage {
                message: format!("invalid collection name '{}'", key),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves half a collection behind
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// A request's fields plus the variant the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub output: String,
}

impl SavedItem {
    pub fn new(request: GenerationRequest, output: impl Into<String>) -> Self {
        let mut fields = request.into_fields();
        // `output` is reserved for the saved text
        fields.remove("output");
        Self {
            fields,
            output: output.into(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Saved-item repository over an injected store
pub struct SavedItems<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SavedItems<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_all(&self, kind: GeneratorKind) -> Result<Vec<SavedItem>> {
        match self.store.get(kind.collection())? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|e| PitchcraftError::Storage {
                    message: format!("collection {} is corrupt: {}", kind.collection(), e),
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Append and return the new collection length
    pub fn append(&self, kind: GeneratorKind, item: SavedItem) -> Result<usize> {
        let mut items = self.load_all(kind)?;
        items.push(item);
        self.write(kind, &items)?;
        tracing::debug!(collection = kind.collection(), len = items.len(), "saved item appended");
        Ok(items.len())
    }

    pub fn get(&self, kind: GeneratorKind, index: usize) -> Result<Option<SavedItem>> {
        Ok(self.load_all(kind)?.into_iter().nth(index))
    }

    /// Remove the item at `index`, keeping the order of the rest.
    /// Out-of-range indexes leave the collection untouched.
    pub fn delete(&self, kind: GeneratorKind, index: usize) -> Result<Option<SavedItem>> {
        let mut items = self.load_all(kind)?;
        if index >= items.len() {
            return Ok(None);
        }
        let removed = items.remove(index);
        self.write(kind, &items)?;
        Ok(Some(removed))
    }

    fn write(&self, kind: GeneratorKind, items: &[SavedItem]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(kind.collection(), &raw)
    }
}
