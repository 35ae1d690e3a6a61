//! Best-effort persistence of in-progress answers.
//!
//! The draft is one JSON document under a single fixed storage key. Failures
//! never cross the adapter boundary: saves and clears log and continue, loads
//! degrade to "no draft".

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::values::FormValues;

/// Fixed storage key; also the on-disk file stem.
pub const DRAFT_KEY: &str = "onboarding-form-data";

/// Bumped whenever the field schema changes shape. Snapshots written under a
/// different version are discarded rather than silently populating unknown
/// or missing keys.
pub const DRAFT_SCHEMA_VERSION: u32 = 1;

const APP_DIR: &str = "blueprint-onboarding";
const TMP_SUFFIX: &str = "tmp";

/// Durable local slot for the in-progress value set.
pub trait DraftStore {
    /// Fire-and-forget write of the full value set.
    fn save(&self, values: &FormValues);
    /// Reads the stored value set, if present and parseable. Invoked once,
    /// at controller construction.
    fn load(&self) -> Option<FormValues>;
    /// Removes the stored snapshot, if any.
    fn clear(&self);
}

#[derive(Debug, Serialize, Deserialize)]
struct DraftEnvelope {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    values: FormValues,
}

/// File-backed draft store staging writes through a temporary file.
#[derive(Debug, Clone)]
pub struct JsonDraftStore {
    path: PathBuf,
}

impl JsonDraftStore {
    /// Store rooted at the platform data directory.
    pub fn new_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at_dir(base.join(APP_DIR))
    }

    /// Store rooted at an explicit directory. The snapshot lives at
    /// `<dir>/<DRAFT_KEY>.json`.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{}.json", DRAFT_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, values: &FormValues) -> Result<(), StoreError> {
        let envelope = DraftEnvelope {
            schema_version: DRAFT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            values: values.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn try_load(&self) -> Result<Option<FormValues>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let envelope: DraftEnvelope = serde_json::from_str(&data)?;
        if envelope.schema_version != DRAFT_SCHEMA_VERSION {
            return Err(StoreError::VersionMismatch {
                found: envelope.schema_version,
                expected: DRAFT_SCHEMA_VERSION,
            });
        }
        Ok(Some(envelope.values))
    }

    fn try_clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl DraftStore for JsonDraftStore {
    fn save(&self, values: &FormValues) {
        if let Err(err) = self.try_save(values) {
            tracing::warn!(error = %err, path = %self.path.display(), "draft save failed");
        }
    }

    fn load(&self) -> Option<FormValues> {
        match self.try_load() {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "draft load failed, starting empty"
                );
                None
            }
        }
    }

    fn clear(&self) {
        if let Err(err) = self.try_clear() {
            tracing::warn!(error = %err, path = %self.path.display(), "draft clear failed");
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use tempfile::tempdir;

    fn sample_values() -> FormValues {
        let mut values = FormValues::empty(schema::onboarding());
        values.set(schema::FULL_NAME, "Ada Lovelace");
        values.set(schema::EMAIL, "ada@example.com");
        values.set(schema::BUSINESS_STATUS, "starting-from-scratch");
        values
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        let values = sample_values();
        store.save(&values);
        assert_eq!(store.load(), Some(values));
    }

    #[test]
    fn load_without_snapshot_is_absent() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_snapshot_is_treated_as_absent() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        fs::create_dir_all(temp.path()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn version_mismatch_discards_snapshot() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        let stale = serde_json::json!({
            "schema_version": DRAFT_SCHEMA_VERSION + 1,
            "saved_at": Utc::now(),
            "values": { "fullName": "Ada" }
        });
        fs::write(store.path(), stale.to_string()).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        store.save(&sample_values());
        assert!(store.path().exists());
        store.clear();
        assert!(!store.path().exists());
        assert_eq!(store.load(), None);
        // Clearing again is a no-op, not an error.
        store.clear();
    }

    #[test]
    fn save_failure_does_not_panic() {
        let temp = tempdir().unwrap();
        let store = JsonDraftStore::at_dir(temp.path());
        // A directory squatting on the temp file path forces the staged
        // write to fail; the store must swallow it.
        fs::create_dir_all(tmp_path(store.path())).unwrap();
        store.save(&sample_values());
        assert_eq!(store.load(), None);
    }
}
