//! File-backed snapshot store: one JSON object mapping keys to blobs.

use crate::domain::error::FincalcError;
use crate::ports::snapshot_port::SnapshotPort;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct JsonSnapshotAdapter {
    path: PathBuf,
}

impl JsonSnapshotAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, FincalcError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no snapshot file at {}", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(FincalcError::Snapshot {
                    reason: format!("failed to read {}: {}", self.path.display(), e),
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| FincalcError::Snapshot {
            reason: format!("{} is not a snapshot file: {}", self.path.display(), e),
        })
    }
}

impl SnapshotPort for JsonSnapshotAdapter {
    fn load(&self, key: &str) -> Result<Option<String>, FincalcError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), FincalcError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), blob.to_string());
        let content =
            serde_json::to_string_pretty(&entries).map_err(|e| FincalcError::Snapshot {
                reason: format!("failed to encode snapshot: {}", e),
            })?;
        fs::write(&self.path, content).map_err(|e| FincalcError::Snapshot {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })?;
        log::debug!("saved snapshot key {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotAdapter::new(dir.path().join("state.json"));
        assert_eq!(store.load("anything").unwrap(), None);
    }

    #[test]
    fn save_then_load_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotAdapter::new(dir.path().join("state.json"));
        store.save("a", "{\"x\":1}").unwrap();
        store.save("b", "two").unwrap();
        store.save("a", "replaced").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("replaced"));
        assert_eq!(store.load("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn corrupt_file_is_snapshot_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonSnapshotAdapter::new(path);
        assert!(matches!(store.load("a"), Err(FincalcError::Snapshot { .. })));
    }
}
