//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory where dataset documents live, relative to the workspace root
pub const DATASETS_DIR: &str = "datasets";

/// Represents an MDT workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .mdt/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        loop {
            let mdt_dir = current.join(".mdt");
            if mdt_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let mdt_dir = root.join(".mdt");
        if mdt_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&mdt_dir).map_err(|e| WorkspaceError::Io(e.to_string()))?;
        std::fs::create_dir_all(root.join(DATASETS_DIR))
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        let config_path = mdt_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# MDT Workspace Configuration

# Author recorded in the provenance of imported records.
# Overridden by the MDT_AUTHOR environment variable; defaults to
# `git config user.name`, then the login user.
# author: ""
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .mdt configuration directory
    pub fn mdt_dir(&self) -> PathBuf {
        self.root.join(".mdt")
    }

    /// Directory holding the persisted dataset documents
    pub fn datasets_dir(&self) -> PathBuf {
        self.root.join(DATASETS_DIR)
    }

    /// Path of one dataset document
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.datasets_dir().join(format!("{}.json", name))
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not an MDT workspace (searched from {searched_from:?}). Run 'mdt init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("MDT workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();

        assert!(ws.mdt_dir().exists());
        assert!(ws.mdt_dir().join("config.yaml").exists());
        assert!(ws.datasets_dir().is_dir());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let err = Workspace::init(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_discover_finds_mdt_dir() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let ws = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            ws.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_fails_without_mdt_dir() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }

    #[test]
    fn test_dataset_path() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let path = ws.dataset_path("domain_groups");
        assert!(path.ends_with("datasets/domain_groups.json"));
    }
}
