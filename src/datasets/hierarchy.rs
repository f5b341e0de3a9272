//! Competency hierarchy records
//!
//! Three nesting levels under an industry segment: DomainGroup → Category
//! → SubCategory. The aggregate document persists the three collections
//! together and is always replaced as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};

/// Top-level classification owning one or more domain groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustrySegment {
    pub id: RecordId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl IndustrySegment {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Seg),
            name: name.to_string(),
            description,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Mid-level grouping of competency categories under one industry segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGroup {
    pub id: RecordId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub industry_segment_id: RecordId,
    /// Denormalized display copy of the owning segment name
    pub industry_segment_name: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainGroup {
    pub fn new(name: &str, description: Option<String>, segment: &IndustrySegment) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(RecordPrefix::Grp),
            name: name.to_string(),
            description,
            industry_segment_id: segment.id.clone(),
            industry_segment_name: segment.name.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Second hierarchy level beneath a domain group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub domain_group_id: RecordId,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: &str, description: Option<String>, domain_group_id: RecordId) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(RecordPrefix::Cat),
            name: name.to_string(),
            description,
            domain_group_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Leaf hierarchy level beneath a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: RecordId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category_id: RecordId,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubCategory {
    pub fn new(name: &str, description: Option<String>, category_id: RecordId) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(RecordPrefix::Sub),
            name: name.to_string(),
            description,
            category_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Counts removed by a cascading delete
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemovalStats {
    pub domain_groups: usize,
    pub categories: usize,
    pub sub_categories: usize,
}

/// Aggregate document holding the three hierarchy collections
///
/// Every Category.domainGroupId must reference a present DomainGroup and
/// every SubCategory.categoryId a present Category. The invariant is
/// maintained by routing writes through the merge engine and the cascade
/// helpers below; saves only re-check structure, not references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGroupsData {
    pub domain_groups: Vec<DomainGroup>,
    pub categories: Vec<Category>,
    pub sub_categories: Vec<SubCategory>,
}

impl DomainGroupsData {
    /// Structural validation applied before any write is accepted
    pub fn validate(&self) -> Result<(), String> {
        for group in &self.domain_groups {
            if group.name.trim().is_empty() {
                return Err(format!("domain group {} has an empty name", group.id));
            }
            if group.industry_segment_name.trim().is_empty() {
                return Err(format!(
                    "domain group '{}' has an empty industry segment name",
                    group.name
                ));
            }
        }
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(format!("category {} has an empty name", category.id));
            }
        }
        for sub in &self.sub_categories {
            if sub.name.trim().is_empty() {
                return Err(format!("sub-category {} has an empty name", sub.id));
            }
        }
        Ok(())
    }

    /// Deep referential check, used by diagnostics rather than every save
    pub fn referential_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for category in &self.categories {
            if !self
                .domain_groups
                .iter()
                .any(|g| g.id == category.domain_group_id)
            {
                errors.push(format!(
                    "category '{}' references missing domain group {}",
                    category.name, category.domain_group_id
                ));
            }
        }
        for sub in &self.sub_categories {
            if !self.categories.iter().any(|c| c.id == sub.category_id) {
                errors.push(format!(
                    "sub-category '{}' references missing category {}",
                    sub.name, sub.category_id
                ));
            }
        }
        errors
    }

    pub fn categories_of(&self, group_id: &RecordId) -> impl Iterator<Item = &Category> {
        let group_id = group_id.clone();
        self.categories
            .iter()
            .filter(move |c| c.domain_group_id == group_id)
    }

    pub fn sub_categories_of(&self, category_id: &RecordId) -> impl Iterator<Item = &SubCategory> {
        let category_id = category_id.clone();
        self.sub_categories
            .iter()
            .filter(move |s| s.category_id == category_id)
    }

    /// Remove a domain group together with its categories and their
    /// sub-categories. Returns None when the id matches nothing.
    pub fn remove_domain_group(&mut self, id: &RecordId) -> Option<RemovalStats> {
        if !self.domain_groups.iter().any(|g| &g.id == id) {
            return None;
        }

        let category_ids: Vec<RecordId> = self
            .categories
            .iter()
            .filter(|c| &c.domain_group_id == id)
            .map(|c| c.id.clone())
            .collect();

        let subs_before = self.sub_categories.len();
        self.sub_categories
            .retain(|s| !category_ids.contains(&s.category_id));
        let cats_before = self.categories.len();
        self.categories.retain(|c| &c.domain_group_id != id);
        self.domain_groups.retain(|g| &g.id != id);

        Some(RemovalStats {
            domain_groups: 1,
            categories: cats_before - self.categories.len(),
            sub_categories: subs_before - self.sub_categories.len(),
        })
    }

    /// Remove a category and its sub-categories
    pub fn remove_category(&mut self, id: &RecordId) -> Option<RemovalStats> {
        if !self.categories.iter().any(|c| &c.id == id) {
            return None;
        }

        let subs_before = self.sub_categories.len();
        self.sub_categories.retain(|s| &s.category_id != id);
        self.categories.retain(|c| &c.id != id);

        Some(RemovalStats {
            domain_groups: 0,
            categories: 1,
            sub_categories: subs_before - self.sub_categories.len(),
        })
    }

    /// Remove one leaf sub-category
    pub fn remove_sub_category(&mut self, id: &RecordId) -> bool {
        let before = self.sub_categories.len();
        self.sub_categories.retain(|s| &s.id != id);
        self.sub_categories.len() != before
    }
}

/// Validator for the separately-maintained industry segment list
pub fn validate_segments(segments: &[IndustrySegment]) -> Result<(), String> {
    for segment in segments {
        if segment.name.trim().is_empty() {
            return Err(format!("industry segment {} has an empty name", segment.id));
        }
    }
    Ok(())
}

/// Default industry segments used when the list is first created or repaired
pub fn seed_industry_segments() -> Vec<IndustrySegment> {
    [
        "Life Sciences",
        "Financial Services",
        "Manufacturing",
        "Technology",
        "Energy & Utilities",
    ]
    .iter()
    .map(|name| IndustrySegment::new(name, Some("Default industry segment".to_string())))
    .collect()
}
