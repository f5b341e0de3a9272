//! Versioned dataset store
//!
//! Each dataset is one JSON document on disk, wrapped in an envelope that
//! carries the schema version, a save timestamp and a payload checksum.
//! Loading never fails on bad stored data: a missing, stale, corrupt or
//! invalid document is replaced from seed data and the caller is told a
//! reseed happened.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Producer of seed/default content for a dataset
pub type SeedFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Structural validator applied before any write is accepted
pub type ValidateFn<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Counter used by health reporting
pub type CountFn<T> = Arc<dyn Fn(&T) -> usize + Send + Sync>;

/// On-disk envelope around a dataset payload
///
/// The schema version lives inside the document rather than in a side
/// channel, so staleness and corruption are detected in a single read.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    checksum: String,
    payload: serde_json::Value,
}

/// Why a load fell back to seed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReseedReason {
    /// No document existed at the dataset path
    Missing,
    /// Stored schema version differs from the configured one
    StaleVersion { found: u32, expected: u32 },
    /// Document was unreadable or failed checksum/deserialization
    Corrupt(String),
    /// Document parsed but was rejected by the validator
    Invalid(String),
}

impl std::fmt::Display for ReseedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReseedReason::Missing => write!(f, "no stored document"),
            ReseedReason::StaleVersion { found, expected } => {
                write!(f, "schema version {} (expected {})", found, expected)
            }
            ReseedReason::Corrupt(msg) => write!(f, "corrupt document: {}", msg),
            ReseedReason::Invalid(msg) => write!(f, "invalid document: {}", msg),
        }
    }
}

/// Result of a load, with the self-repair event made observable
#[derive(Debug)]
pub struct LoadOutcome<T> {
    pub data: T,
    /// Present when the stored document was discarded and reseeded
    pub reseeded: Option<ReseedReason>,
}

/// Advisory per-dataset health snapshot, produced without side effects
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetHealth {
    pub name: String,
    pub file_present: bool,
    pub parseable: bool,
    pub current_version: bool,
    pub structurally_valid: bool,
    pub record_count: Option<usize>,
}

impl DatasetHealth {
    pub fn is_healthy(&self) -> bool {
        self.file_present && self.parseable && self.current_version && self.structurally_valid
    }
}

/// Errors surfaced by store operations
///
/// Load-time defects in stored data are not errors (they reseed); these
/// cover environmental failures and rejected writes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read dataset '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write dataset '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dataset '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset '{name}' rejected by validator: {reason}")]
    Validation { name: String, reason: String },
}

/// A versioned store for one named dataset
///
/// Cheaply cloneable; clones share the seed/validator closures and point
/// at the same document. Single-writer-per-process; concurrent writers
/// race last-write-wins, which is accepted for this local-first tool.
#[derive(Clone)]
pub struct DatasetStore<T> {
    name: String,
    path: PathBuf,
    version: u32,
    default_data: T,
    seed: Option<SeedFn<T>>,
    validator: Option<ValidateFn<T>>,
    counter: Option<CountFn<T>>,
}

impl<T> DatasetStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Create a store for `<dir>/<name>.json`
    pub fn new(dir: &Path, name: &str, version: u32, default_data: T) -> Self {
        Self {
            name: name.to_string(),
            path: dir.join(format!("{}.json", name)),
            version,
            default_data,
            seed: None,
            validator: None,
            counter: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.seed = Some(Arc::new(seed));
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn with_counter(mut self, counter: impl Fn(&T) -> usize + Send + Sync + 'static) -> Self {
        self.counter = Some(Arc::new(counter));
        self
    }

    /// Dataset name (doubles as the document file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, reseeding from defaults when the stored document
    /// is missing, stale, corrupt or invalid
    pub fn load(&self) -> Result<LoadOutcome<T>, StoreError> {
        match self.read_stored()? {
            Ok(data) => Ok(LoadOutcome {
                data,
                reseeded: None,
            }),
            Err(reason) => {
                let data = self.seed_data();
                self.persist(&data)?;
                Ok(LoadOutcome {
                    data,
                    reseeded: Some(reason),
                })
            }
        }
    }

    /// Like `load()`, but never writes: an unusable stored document is
    /// answered with seed data while the file stays untouched. Used by
    /// read-only flows such as export.
    pub fn current(&self) -> Result<T, StoreError> {
        Ok(self.read_stored()?.unwrap_or_else(|_| self.seed_data()))
    }

    /// Validate and atomically replace the whole document
    pub fn save(&self, data: &T) -> Result<(), StoreError> {
        if let Some(validator) = &self.validator {
            validator(data).map_err(|reason| StoreError::Validation {
                name: self.name.clone(),
                reason,
            })?;
        }
        self.persist(data)
    }

    /// Rewrite the document from seed data, ignoring whatever is stored
    pub fn force_reseed(&self) -> Result<T, StoreError> {
        let data = self.seed_data();
        self.persist(&data)?;
        Ok(data)
    }

    /// Delete the stored document; the next load reseeds
    pub fn wipe(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| StoreError::Write {
                name: self.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Inspect the stored document without mutating anything
    pub fn health(&self) -> DatasetHealth {
        let mut health = DatasetHealth {
            name: self.name.clone(),
            file_present: self.path.exists(),
            parseable: false,
            current_version: false,
            structurally_valid: false,
            record_count: None,
        };

        if !health.file_present {
            return health;
        }

        let data = match self.read_stored() {
            Ok(Ok(data)) => {
                health.parseable = true;
                health.current_version = true;
                health.structurally_valid = true;
                Some(data)
            }
            Ok(Err(reason)) => {
                match reason {
                    ReseedReason::StaleVersion { .. } => health.parseable = true,
                    ReseedReason::Invalid(_) => {
                        health.parseable = true;
                        health.current_version = true;
                    }
                    _ => {}
                }
                None
            }
            Err(_) => None,
        };

        if let (Some(data), Some(counter)) = (data.as_ref(), &self.counter) {
            health.record_count = Some(counter(data));
        }

        health
    }

    fn seed_data(&self) -> T {
        match &self.seed {
            Some(seed) => seed(),
            None => self.default_data.clone(),
        }
    }

    /// Read and verify the stored document.
    ///
    /// Outer Err = environmental I/O failure. Inner Err = the document is
    /// unusable and should be reseeded.
    fn read_stored(&self) -> Result<Result<T, ReseedReason>, StoreError> {
        if !self.path.exists() {
            return Ok(Err(ReseedReason::Missing));
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            name: self.name.clone(),
            source,
        })?;

        let envelope: Envelope = match serde_json::from_str(&raw) {
            Ok(e) => e,
            Err(e) => return Ok(Err(ReseedReason::Corrupt(e.to_string()))),
        };

        if envelope.schema_version != self.version {
            return Ok(Err(ReseedReason::StaleVersion {
                found: envelope.schema_version,
                expected: self.version,
            }));
        }

        let payload_text = envelope.payload.to_string();
        if payload_checksum(&payload_text) != envelope.checksum {
            return Ok(Err(ReseedReason::Corrupt(
                "payload checksum mismatch".to_string(),
            )));
        }

        let data: T = match serde_json::from_value(envelope.payload) {
            Ok(d) => d,
            Err(e) => return Ok(Err(ReseedReason::Corrupt(e.to_string()))),
        };

        if let Some(validator) = &self.validator {
            if let Err(reason) = validator(&data) {
                return Ok(Err(ReseedReason::Invalid(reason)));
            }
        }

        Ok(Ok(data))
    }

    /// Serialize and replace the document via temp file + rename
    fn persist(&self, data: &T) -> Result<(), StoreError> {
        let payload = serde_json::to_value(data).map_err(|source| StoreError::Serialize {
            name: self.name.clone(),
            source,
        })?;
        let checksum = payload_checksum(&payload.to_string());

        let envelope = Envelope {
            schema_version: self.version,
            saved_at: Utc::now(),
            checksum,
            payload,
        };

        let text =
            serde_json::to_string_pretty(&envelope).map_err(|source| StoreError::Serialize {
                name: self.name.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                name: self.name.clone(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|source| StoreError::Write {
            name: self.name.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            name: self.name.clone(),
            source,
        })?;

        Ok(())
    }
}

/// SHA-256 hex digest of the canonical payload text
fn payload_checksum(payload_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload_text.as_bytes());
    format!("{:x}", hasher.finalize())
}
