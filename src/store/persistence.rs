// ABOUTME: File-per-record session persistence surviving host process restarts
// One <id>.json per record in the storage directory; lookups scan, no index

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::models::SessionRecord;
use crate::store::{SessionStore, StoreError};

pub struct FileSessionStore {
    storage_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(config: &RelayConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.storage_dir).map_err(StoreError::WriteFailed)?;

        Ok(Self {
            storage_dir: config.storage_dir.clone(),
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.storage_dir.join(format!("{}.json", id))
    }

    /// Load every parseable record. Unreadable or corrupt files are logged
    /// and skipped so one bad record cannot take down every lookup.
    fn load_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let mut records = Vec::new();

        let entries = match fs::read_dir(&self.storage_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(records),
            Err(error) => return Err(StoreError::ReadFailed(error)),
        };

        for entry in entries {
            let entry = entry.map_err(StoreError::ReadFailed)?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<SessionRecord>(&content) {
                    Ok(record) => records.push(record),
                    Err(error) => {
                        tracing::warn!("failed to parse session record {:?}: {}", path, error);
                    }
                },
                Err(error) => {
                    tracing::warn!("failed to read session record {:?}: {}", path, error);
                }
            }
        }

        Ok(records)
    }
}

impl SessionStore for FileSessionStore {
    fn create(&self, record: &SessionRecord) -> Result<Uuid, StoreError> {
        let path = self.record_path(record.id);
        let json = serde_json::to_string_pretty(record)?;

        // create_new keeps records write-once: an existing file is a failure,
        // never an overwrite
        let result = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| {
                use std::io::Write;
                file.write_all(json.as_bytes())
            });

        match result {
            Ok(()) => Ok(record.id),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::DuplicateId(record.id))
            }
            Err(error) => Err(StoreError::WriteFailed(error)),
        }
    }

    fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        let now = Utc::now();

        let found = self
            .load_all()?
            .into_iter()
            .filter(|record| record.token == token && !record.is_expired(now))
            .max_by_key(|record| record.created);

        Ok(found)
    }

    fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StoreError::WriteFailed(error)),
        }
    }

    fn sweep_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let mut removed = 0;

        for record in self.load_all()? {
            if record.is_expired(now) {
                self.remove(record.id)?;
                removed += 1;
                tracing::debug!(id = %record.id, "swept expired session record");
            }
        }

        Ok(removed)
    }
}
