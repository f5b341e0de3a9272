//! Author resolution from layered configuration
//!
//! Records created by the merge engine carry a provenance note naming who
//! imported them. The name is resolved from, in order: the `MDT_AUTHOR`
//! environment variable, the workspace config, the global user config,
//! git, and finally the login user.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::workspace::Workspace;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name stamped into the provenance of imported records
    pub author: Option<String>,
}

impl Config {
    /// Load the configuration for one workspace
    pub fn load(workspace: &Workspace) -> Self {
        let author = std::env::var("MDT_AUTHOR")
            .ok()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| read_author(&workspace.mdt_dir().join("config.yaml")))
            .or_else(|| global_config_path().as_deref().and_then(read_author));

        Self { author }
    }

    /// Resolved author name, falling back to git config or the login user
    pub fn author(&self) -> String {
        if let Some(author) = &self.author {
            return author.clone();
        }

        git_user_name()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Pull `author:` out of one YAML config file, if it has a usable value
fn read_author(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let config: Config = serde_yml::from_str(&contents).ok()?;
    config.author.filter(|a| !a.trim().is_empty())
}

fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mdt")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

fn git_user_name() -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["config", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
