//! Capability levels for the competency-rating subsystem
//!
//! Independent of the hierarchy but persisted through the same versioned
//! store; score ranges must not overlap across active levels.

use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};

/// One rung of the competency rating ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityLevel {
    pub id: RecordId,
    pub label: String,
    pub min_score: u32,
    pub max_score: u32,
    /// Display color, hex notation
    pub color: String,
    pub order: u32,
    pub is_active: bool,
}

impl CapabilityLevel {
    pub fn new(label: &str, min_score: u32, max_score: u32, color: &str, order: u32) -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Lvl),
            label: label.to_string(),
            min_score,
            max_score,
            color: color.to_string(),
            order,
            is_active: true,
        }
    }
}

/// Structural validation: labels present, min < max, and no overlapping
/// score ranges among active levels
pub fn validate_levels(levels: &[CapabilityLevel]) -> Result<(), String> {
    for level in levels {
        if level.label.trim().is_empty() {
            return Err(format!("capability level {} has an empty label", level.id));
        }
        if level.min_score >= level.max_score {
            return Err(format!(
                "capability level '{}' has min score {} >= max score {}",
                level.label, level.min_score, level.max_score
            ));
        }
    }

    let mut active: Vec<&CapabilityLevel> = levels.iter().filter(|l| l.is_active).collect();
    active.sort_by_key(|l| l.min_score);
    for pair in active.windows(2) {
        if pair[1].min_score <= pair[0].max_score {
            return Err(format!(
                "capability levels '{}' and '{}' have overlapping score ranges",
                pair[0].label, pair[1].label
            ));
        }
    }

    Ok(())
}

/// Default five-level ladder
pub fn seed_capability_levels() -> Vec<CapabilityLevel> {
    vec![
        CapabilityLevel::new("Novice", 0, 20, "#d9534f", 1),
        CapabilityLevel::new("Beginner", 21, 40, "#f0ad4e", 2),
        CapabilityLevel::new("Intermediate", 41, 60, "#5bc0de", 3),
        CapabilityLevel::new("Advanced", 61, 80, "#428bca", 4),
        CapabilityLevel::new("Expert", 81, 100, "#5cb85c", 5),
    ]
}
