//! Hierarchy merge engine
//!
//! Reconciles a parsed hierarchy map with the persisted collections:
//! reuse on a name match, create on a miss, never duplicate. Matching is
//! top-down — a row's segment must be resolved before its group, the
//! group before its category, the category before its sub-category — and
//! running the same hierarchy twice creates nothing on the second pass.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::backend::{ChangeNotifier, CollectionStore, Record};
use crate::core::store::StoreError;
use crate::datasets::hierarchy::{
    Category, DomainGroup, DomainGroupsData, IndustrySegment, SubCategory,
};
use crate::datasets::{MasterDatasets, DOMAIN_GROUPS, INDUSTRY_SEGMENTS};
use crate::ingest::parser::HierarchyMap;

/// Per-level created/merged accounting for one merge run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub segments_created: usize,
    pub groups_created: usize,
    pub groups_merged: usize,
    pub categories_created: usize,
    pub categories_merged: usize,
    pub sub_categories_created: usize,
    pub sub_categories_merged: usize,
    /// Incoming groups that collapsed case-insensitively with an earlier
    /// group in the same run and were skipped outright
    pub duplicate_groups_skipped: usize,
}

impl MergeStats {
    pub fn total_created(&self) -> usize {
        self.segments_created
            + self.groups_created
            + self.categories_created
            + self.sub_categories_created
    }
}

/// Successful merge result; nothing is persisted yet
#[derive(Debug)]
pub struct MergeOutcome {
    pub data: DomainGroupsData,
    pub segments: Vec<IndustrySegment>,
    pub stats: MergeStats,
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("nothing to merge: the hierarchy is empty")]
    EmptyHierarchy,

    /// The normalized match pass found several distinct existing segments.
    /// Deciding between them would silently merge data that may belong
    /// apart, so the whole operation is refused.
    #[error("segment '{name}' matches multiple existing segments: {}", .candidates.join(", "))]
    AmbiguousSegment { name: String, candidates: Vec<String> },
}

/// Lowercase and strip non-alphanumerics for the fuzzy segment pass
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Merge a hierarchy map into the current collections
///
/// `origin` is a human-readable provenance label ("file competencies.csv",
/// "bulk template", "manual entry") and `author` the resolved importer
/// name; both are stamped into the description of every created record.
pub fn merge_hierarchy(
    hierarchy: &HierarchyMap,
    current: &DomainGroupsData,
    current_segments: &[IndustrySegment],
    origin: &str,
    author: &str,
) -> Result<MergeOutcome, MergeError> {
    if hierarchy.is_empty() {
        return Err(MergeError::EmptyHierarchy);
    }

    let mut data = current.clone();
    let mut segments = current_segments.to_vec();
    let mut stats = MergeStats::default();
    let provenance = format!("Imported from {} by {}", origin, author);

    for (segment_name, groups) in hierarchy {
        let segment = resolve_segment(segment_name, &mut segments, &mut stats, &provenance)?;

        // Collapse incoming groups that differ only by case within one run
        let mut seen_groups: HashSet<String> = HashSet::new();

        for (group_name, categories) in groups {
            if !seen_groups.insert(group_name.to_lowercase()) {
                stats.duplicate_groups_skipped += 1;
                continue;
            }

            let group_id = match data.domain_groups.iter().find(|g| {
                g.name.eq_ignore_ascii_case(group_name) && g.industry_segment_id == segment.id
            }) {
                Some(existing) => {
                    stats.groups_merged += 1;
                    existing.id.clone()
                }
                None => {
                    let group = DomainGroup::new(group_name, Some(provenance.clone()), &segment);
                    let id = group.id.clone();
                    data.domain_groups.push(group);
                    stats.groups_created += 1;
                    id
                }
            };

            for (category_name, subs) in categories {
                let category_id = match data.categories.iter().find(|c| {
                    c.name.eq_ignore_ascii_case(category_name) && c.domain_group_id == group_id
                }) {
                    Some(existing) => {
                        stats.categories_merged += 1;
                        existing.id.clone()
                    }
                    None => {
                        let category =
                            Category::new(category_name, Some(provenance.clone()), group_id.clone());
                        let id = category.id.clone();
                        data.categories.push(category);
                        stats.categories_created += 1;
                        id
                    }
                };

                for sub_name in subs {
                    let exists = data.sub_categories.iter().any(|s| {
                        s.name.eq_ignore_ascii_case(sub_name) && s.category_id == category_id
                    });
                    if exists {
                        stats.sub_categories_merged += 1;
                    } else {
                        data.sub_categories.push(SubCategory::new(
                            sub_name,
                            Some(provenance.clone()),
                            category_id.clone(),
                        ));
                        stats.sub_categories_created += 1;
                    }
                }
            }
        }
    }

    Ok(MergeOutcome {
        data,
        segments,
        stats,
    })
}

/// Resolve one segment name: exact case-insensitive pass first, then the
/// normalized pass, then create. The two passes are ordered so distinct
/// segments that happen to normalize identically are never merged by
/// accident.
fn resolve_segment(
    name: &str,
    segments: &mut Vec<IndustrySegment>,
    stats: &mut MergeStats,
    provenance: &str,
) -> Result<IndustrySegment, MergeError> {
    if let Some(exact) = segments.iter().find(|s| s.name.eq_ignore_ascii_case(name)) {
        return Ok(exact.clone());
    }

    let normalized = normalize(name);
    let candidates: Vec<&IndustrySegment> = segments
        .iter()
        .filter(|s| normalize(&s.name) == normalized)
        .collect();

    match candidates.len() {
        0 => {
            let segment = IndustrySegment::new(name, Some(provenance.to_string()));
            segments.push(segment.clone());
            stats.segments_created += 1;
            Ok(segment)
        }
        1 => Ok(candidates[0].clone()),
        _ => Err(MergeError::AmbiguousSegment {
            name: name.to_string(),
            candidates: candidates.iter().map(|s| s.name.clone()).collect(),
        }),
    }
}

/// Errors from the persisting merge pipeline
#[derive(Debug, Error)]
pub enum MergePipelineError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a persisted merge, including tolerated mirror failures
#[derive(Debug)]
pub struct MergeReport {
    pub stats: MergeStats,
    pub mirror_warnings: Vec<String>,
}

/// Merge, persist and notify
///
/// Reads the current collections, merges, then persists segments before
/// the hierarchy triple (group records reference segment ids, so segments
/// must land first). The triple itself is replaced atomically. An
/// optional backend mirror is attempted afterwards; its failures are
/// reported, never fatal.
pub fn merge_and_store(
    datasets: &MasterDatasets,
    hierarchy: &HierarchyMap,
    origin: &str,
    author: &str,
    mirror: Option<&dyn CollectionStore>,
    notifier: &dyn ChangeNotifier,
) -> Result<MergeReport, MergePipelineError> {
    let current = datasets.domain_groups.load()?.data;
    let segments = datasets.industry_segments.load()?.data;

    let outcome = merge_hierarchy(hierarchy, &current, &segments, origin, author)?;

    datasets.industry_segments.save(&outcome.segments)?;
    datasets.domain_groups.save(&outcome.data)?;

    let mut mirror_warnings = Vec::new();
    if let Some(store) = mirror {
        mirror_collections(store, &outcome, &mut mirror_warnings);
    }

    notifier.dataset_replaced(INDUSTRY_SEGMENTS);
    notifier.dataset_replaced(DOMAIN_GROUPS);

    Ok(MergeReport {
        stats: outcome.stats,
        mirror_warnings,
    })
}

/// Replace-all push of the merged collections into a keyed-record backend
fn mirror_collections(store: &dyn CollectionStore, outcome: &MergeOutcome, warnings: &mut Vec<String>) {
    let pushes: [(&str, Result<Vec<Record>, serde_json::Error>); 4] = [
        (INDUSTRY_SEGMENTS, to_records(&outcome.segments)),
        (DOMAIN_GROUPS, to_records(&outcome.data.domain_groups)),
        ("categories", to_records(&outcome.data.categories)),
        ("sub_categories", to_records(&outcome.data.sub_categories)),
    ];

    for (collection, records) in pushes {
        match records {
            Ok(records) => match store.save_items(collection, records) {
                Ok(true) => {}
                Ok(false) => warnings.push(format!("backend declined replace of '{}'", collection)),
                Err(e) => warnings.push(format!("backend error on '{}': {}", collection, e)),
            },
            Err(e) => warnings.push(format!("could not encode '{}': {}", collection, e)),
        }
    }
}

fn to_records<T: serde::Serialize>(items: &[T]) -> Result<Vec<Record>, serde_json::Error> {
    items
        .iter()
        .map(|item| {
            serde_json::to_value(item).map(|value| match value {
                serde_json::Value::Object(map) => map,
                other => {
                    let mut map = Record::new();
                    map.insert("value".to_string(), other);
                    map
                }
            })
        })
        .collect()
}
