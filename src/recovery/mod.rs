//! Recovery center: backup export/import, health checks, emergency reset
//!
//! Export never writes to any dataset. Import is all-or-nothing: every
//! sub-document is validated before the first store is touched. Both
//! reset operations leave every dataset loadable afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::registry::{RegistryReport, SeedRegistry};
use crate::core::store::{DatasetHealth, StoreError};
use crate::core::workspace::Workspace;
use crate::datasets::capability::{validate_levels, CapabilityLevel};
use crate::datasets::hierarchy::{validate_segments, DomainGroupsData, IndustrySegment};
use crate::datasets::reference::{
    validate_countries, validate_organization_types, Country, OrganizationType,
};
use crate::datasets::MasterDatasets;

/// Format version stamped into every backup document
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Portable backup of the full managed dataset set
///
/// `domainGroups`, `countries` and `organizationTypes` are required on
/// import; the remaining sub-documents are restored when present.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub domain_groups: DomainGroupsData,
    pub countries: Vec<Country>,
    pub organization_types: Vec<OrganizationType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_segments: Option<Vec<IndustrySegment>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_levels: Option<Vec<CapabilityLevel>>,

    pub export_timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("failed to read backup file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write backup file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid backup document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("backup document rejected: {0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serialize the full dataset set; read-only with respect to every store
pub fn export_backup(datasets: &MasterDatasets) -> Result<BackupDocument, RecoveryError> {
    Ok(BackupDocument {
        domain_groups: datasets.domain_groups.current()?,
        countries: datasets.countries.current()?,
        organization_types: datasets.organization_types.current()?,
        industry_segments: Some(datasets.industry_segments.current()?),
        capability_levels: Some(datasets.capability_levels.current()?),
        export_timestamp: Utc::now(),
        version: BACKUP_FORMAT_VERSION.to_string(),
    })
}

/// Export straight to a file
pub fn write_backup_file(datasets: &MasterDatasets, path: &Path) -> Result<(), RecoveryError> {
    let document = export_backup(datasets)?;
    let text = serde_json::to_string_pretty(&document)?;
    fs::write(path, text).map_err(|source| RecoveryError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

/// What an import wrote
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub datasets_restored: Vec<String>,
}

/// Parse and validate a backup document from disk
pub fn read_backup_file(path: &Path) -> Result<BackupDocument, RecoveryError> {
    let text = fs::read_to_string(path).map_err(|source| RecoveryError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let document: BackupDocument = serde_json::from_str(&text)?;
    validate_backup(&document)?;
    Ok(document)
}

/// Reject a document before any store is touched
fn validate_backup(document: &BackupDocument) -> Result<(), RecoveryError> {
    document
        .domain_groups
        .validate()
        .map_err(RecoveryError::Invalid)?;
    validate_countries(&document.countries).map_err(RecoveryError::Invalid)?;
    validate_organization_types(&document.organization_types).map_err(RecoveryError::Invalid)?;
    if let Some(segments) = &document.industry_segments {
        validate_segments(segments).map_err(RecoveryError::Invalid)?;
    }
    if let Some(levels) = &document.capability_levels {
        validate_levels(levels).map_err(RecoveryError::Invalid)?;
    }
    Ok(())
}

/// Restore every recognized sub-document through its owning store
pub fn import_backup(
    datasets: &MasterDatasets,
    document: &BackupDocument,
) -> Result<ImportSummary, RecoveryError> {
    // All validation happened at parse time; a second pass here keeps
    // programmatic callers honest too.
    validate_backup(document)?;

    let mut summary = ImportSummary::default();

    datasets.domain_groups.save(&document.domain_groups)?;
    summary
        .datasets_restored
        .push(datasets.domain_groups.name().to_string());

    datasets.countries.save(&document.countries)?;
    summary
        .datasets_restored
        .push(datasets.countries.name().to_string());

    datasets.organization_types.save(&document.organization_types)?;
    summary
        .datasets_restored
        .push(datasets.organization_types.name().to_string());

    if let Some(segments) = &document.industry_segments {
        datasets.industry_segments.save(segments)?;
        summary
            .datasets_restored
            .push(datasets.industry_segments.name().to_string());
    }

    if let Some(levels) = &document.capability_levels {
        datasets.capability_levels.save(levels)?;
        summary
            .datasets_restored
            .push(datasets.capability_levels.name().to_string());
    }

    Ok(summary)
}

/// Restore from a backup file, all-or-nothing
pub fn restore_from_file(
    datasets: &MasterDatasets,
    path: &Path,
) -> Result<ImportSummary, RecoveryError> {
    let document = read_backup_file(path)?;
    import_backup(datasets, &document)
}

/// Advisory system-wide health summary
#[derive(Debug)]
pub struct HealthSummary {
    pub datasets: Vec<DatasetHealth>,
    /// Dangling references inside the hierarchy document
    pub referential_errors: Vec<String>,
    /// Documents in datasets/ that no registered store owns
    pub stray_files: Vec<String>,
}

impl HealthSummary {
    pub fn all_healthy(&self) -> bool {
        self.datasets.iter().all(|d| d.is_healthy())
            && self.referential_errors.is_empty()
            && self.stray_files.is_empty()
    }
}

/// Collect health for every dataset without mutating anything
pub fn system_health(
    workspace: &Workspace,
    datasets: &MasterDatasets,
    registry: &SeedRegistry,
) -> Result<HealthSummary, RecoveryError> {
    let dataset_health = registry.system_health();

    let hierarchy = datasets.domain_groups.current()?;
    let referential_errors = hierarchy.referential_errors();

    let managed: HashSet<String> = registry
        .names()
        .iter()
        .map(|name| format!("{}.json", name))
        .collect();

    let mut stray_files = Vec::new();
    for entry in WalkDir::new(workspace.datasets_dir())
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.ends_with(".json") && !managed.contains(&file_name) {
            stray_files.push(file_name);
        }
    }
    stray_files.sort();

    Ok(HealthSummary {
        datasets: dataset_health,
        referential_errors,
        stray_files,
    })
}

/// Reseed every registered dataset from defaults
pub fn restore_defaults(registry: &SeedRegistry) -> RegistryReport {
    registry.seed_all()
}

/// Delete every managed document; subsequent loads reseed
pub fn clear_all(registry: &SeedRegistry) -> RegistryReport {
    registry.wipe_all()
}
