//! Seeding registry
//!
//! An explicitly constructed registry of dataset handles, passed to
//! whatever orchestrates startup, health checks and recovery. One failing
//! dataset never aborts work on the others.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::store::{DatasetHealth, DatasetStore, StoreError};

/// Type-erased view over one registered dataset store
pub trait DatasetHandle: Send + Sync {
    fn name(&self) -> &str;
    fn force_reseed(&self) -> Result<(), StoreError>;
    fn wipe(&self) -> Result<(), StoreError>;
    fn health(&self) -> DatasetHealth;
}

impl<T> DatasetHandle for DatasetStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn name(&self) -> &str {
        DatasetStore::name(self)
    }

    fn force_reseed(&self) -> Result<(), StoreError> {
        DatasetStore::force_reseed(self).map(|_| ())
    }

    fn wipe(&self) -> Result<(), StoreError> {
        DatasetStore::wipe(self)
    }

    fn health(&self) -> DatasetHealth {
        DatasetStore::health(self)
    }
}

/// Outcome of reseeding (or wiping) one dataset
#[derive(Debug)]
pub struct DatasetOutcome {
    pub name: String,
    pub error: Option<String>,
}

impl DatasetOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary returned by bulk registry operations
#[derive(Debug, Default)]
pub struct RegistryReport {
    pub outcomes: Vec<DatasetOutcome>,
}

impl RegistryReport {
    pub fn failures(&self) -> impl Iterator<Item = &DatasetOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded())
    }
}

/// Registry of every managed dataset
#[derive(Default)]
pub struct SeedRegistry {
    handles: Vec<Box<dyn DatasetHandle>>,
}

impl SeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: Box<dyn DatasetHandle>) {
        self.handles.push(handle);
    }

    pub fn names(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn DatasetHandle> {
        self.handles
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }

    /// Force-reseed every registered dataset; per-dataset failures are
    /// collected, not propagated
    pub fn seed_all(&self) -> RegistryReport {
        let mut report = RegistryReport::default();
        for handle in &self.handles {
            report.outcomes.push(DatasetOutcome {
                name: handle.name().to_string(),
                error: handle.force_reseed().err().map(|e| e.to_string()),
            });
        }
        report
    }

    /// Delete every managed document; subsequent loads reseed
    pub fn wipe_all(&self) -> RegistryReport {
        let mut report = RegistryReport::default();
        for handle in &self.handles {
            report.outcomes.push(DatasetOutcome {
                name: handle.name().to_string(),
                error: handle.wipe().err().map(|e| e.to_string()),
            });
        }
        report
    }

    /// Advisory health snapshot of every dataset; performs no writes
    pub fn system_health(&self) -> Vec<DatasetHealth> {
        self.handles.iter().map(|h| h.health()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_store(dir: &std::path::Path, name: &str) -> DatasetStore<Vec<String>> {
        DatasetStore::new(dir, name, 1, Vec::new())
            .with_seed(|| vec!["default".to_string()])
            .with_counter(|v: &Vec<String>| v.len())
    }

    fn sample_registry(dir: &std::path::Path) -> SeedRegistry {
        let mut registry = SeedRegistry::new();
        registry.register(Box::new(sample_store(dir, "alpha")));
        registry.register(Box::new(sample_store(dir, "beta")));
        registry
    }

    #[test]
    fn test_seed_all_populates_every_dataset() {
        let tmp = tempdir().unwrap();
        let registry = sample_registry(tmp.path());

        let report = registry.seed_all();
        assert!(report.all_succeeded());
        assert!(tmp.path().join("alpha.json").exists());
        assert!(tmp.path().join("beta.json").exists());
    }

    #[test]
    fn test_seed_all_isolates_failures() {
        let tmp = tempdir().unwrap();
        let mut registry = SeedRegistry::new();
        // A store rooted at an unwritable path fails; the healthy one
        // must still be seeded.
        registry.register(Box::new(sample_store(
            std::path::Path::new("/dev/null/nope"),
            "broken",
        )));
        registry.register(Box::new(sample_store(tmp.path(), "healthy")));

        let report = registry.seed_all();
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
        assert!(tmp.path().join("healthy.json").exists());
    }

    #[test]
    fn test_system_health_has_no_side_effects() {
        let tmp = tempdir().unwrap();
        let registry = sample_registry(tmp.path());

        let health = registry.system_health();
        assert_eq!(health.len(), 2);
        assert!(health.iter().all(|h| !h.file_present));
        // No files appeared just from asking
        assert!(!tmp.path().join("alpha.json").exists());
    }

    #[test]
    fn test_wipe_all_leaves_system_loadable() {
        let tmp = tempdir().unwrap();
        let registry = sample_registry(tmp.path());
        registry.seed_all();

        let report = registry.wipe_all();
        assert!(report.all_succeeded());
        assert!(!tmp.path().join("alpha.json").exists());

        // A fresh load must succeed, not throw
        let store = sample_store(tmp.path(), "alpha");
        let outcome = store.load().unwrap();
        assert_eq!(outcome.data, vec!["default".to_string()]);
    }

    #[test]
    fn test_get_by_name() {
        let tmp = tempdir().unwrap();
        let registry = sample_registry(tmp.path());
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["alpha", "beta"]);
    }
}
