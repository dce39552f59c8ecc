use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::ScoringConfig;

/// Storage abstraction for the user's rubric, so the service can be exercised in isolation.
///
/// Stores treat the configuration as an opaque blob: they serialize it and hand it back, nothing
/// more. Validation happens before a configuration reaches `save`.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<Option<ScoringConfig>, StoreError>;
    fn save(&self, config: &ScoringConfig) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("config store i/o failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode configuration for storage: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored configuration at {} is unreadable: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keeps the rubric in `<dir>/<key>.json`, wrapped in a small envelope.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    dir: PathBuf,
    key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    key: &'a str,
    saved_at: DateTime<Utc>,
    config: &'a ScoringConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    key: String,
    saved_at: DateTime<Utc>,
    config: ScoringConfig,
}

impl JsonFileConfigStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn load(&self) -> Result<Option<ScoringConfig>, StoreError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(&path)(err)),
        };

        let envelope: Envelope =
            serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;

        if envelope.key != self.key {
            warn!(
                expected = %self.key,
                found = %envelope.key,
                path = %path.display(),
                "stored configuration was written under a different key"
            );
        }
        debug!(saved_at = %envelope.saved_at, path = %path.display(), "loaded stored configuration");

        Ok(Some(envelope.config))
    }

    fn save(&self, config: &ScoringConfig) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let envelope = EnvelopeRef {
            key: &self.key,
            saved_at: Utc::now(),
            config,
        };
        let encoded = serde_json::to_string_pretty(&envelope).map_err(StoreError::Encode)?;

        let path = self.path();
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(io_error(&staging))?;
        if let Err(err) = fs::rename(&staging, &path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(path = %staging.display(), error = %cleanup, "could not remove staging file");
            }
            return Err(io_error(&path)(err));
        }

        debug!(path = %path.display(), "stored configuration");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path)(err)),
        }
    }
}
