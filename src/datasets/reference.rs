//! Reference datasets: countries and organization types
//!
//! Small flat lists shipped with seed content; both travel in the backup
//! document alongside the hierarchy.

use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: RecordId,
    pub name: String,
    /// ISO 3166-1 alpha-2 code
    pub code: String,
    pub is_active: bool,
}

impl Country {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Cty),
            name: name.to_string(),
            code: code.to_string(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationType {
    pub id: RecordId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_active: bool,
}

impl OrganizationType {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Org),
            name: name.to_string(),
            description,
            is_active: true,
        }
    }
}

pub fn validate_countries(countries: &[Country]) -> Result<(), String> {
    for country in countries {
        if country.name.trim().is_empty() {
            return Err(format!("country {} has an empty name", country.id));
        }
        if country.code.len() != 2 {
            return Err(format!(
                "country '{}' has a malformed code '{}'",
                country.name, country.code
            ));
        }
    }
    Ok(())
}

pub fn validate_organization_types(types: &[OrganizationType]) -> Result<(), String> {
    for org_type in types {
        if org_type.name.trim().is_empty() {
            return Err(format!("organization type {} has an empty name", org_type.id));
        }
    }
    Ok(())
}

pub fn seed_countries() -> Vec<Country> {
    [
        ("United States", "US"),
        ("United Kingdom", "GB"),
        ("Germany", "DE"),
        ("France", "FR"),
        ("Netherlands", "NL"),
        ("Switzerland", "CH"),
        ("Ireland", "IE"),
        ("Spain", "ES"),
        ("Italy", "IT"),
        ("Sweden", "SE"),
        ("Denmark", "DK"),
        ("Norway", "NO"),
        ("Finland", "FI"),
        ("Poland", "PL"),
        ("Canada", "CA"),
        ("Mexico", "MX"),
        ("Brazil", "BR"),
        ("India", "IN"),
        ("China", "CN"),
        ("Japan", "JP"),
        ("South Korea", "KR"),
        ("Singapore", "SG"),
        ("Australia", "AU"),
        ("New Zealand", "NZ"),
        ("South Africa", "ZA"),
        ("United Arab Emirates", "AE"),
    ]
    .iter()
    .map(|(name, code)| Country::new(name, code))
    .collect()
}

pub fn seed_organization_types() -> Vec<OrganizationType> {
    [
        ("Enterprise", "Large established organization"),
        ("Mid-Market", "Mid-sized organization"),
        ("Small Business", "Small organization"),
        ("Startup", "Early-stage company"),
        ("Government", "Public sector body"),
        ("Non-Profit", "Non-profit organization"),
        ("Academic", "University or research institution"),
        ("Consultancy", "Professional services firm"),
    ]
    .iter()
    .map(|(name, description)| OrganizationType::new(name, Some(description.to_string())))
    .collect()
}
