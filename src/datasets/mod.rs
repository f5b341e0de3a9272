//! Managed datasets and their store wiring

pub mod capability;
pub mod hierarchy;
pub mod reference;

pub use capability::{seed_capability_levels, validate_levels, CapabilityLevel};
pub use hierarchy::{
    seed_industry_segments, validate_segments, Category, DomainGroup, DomainGroupsData,
    IndustrySegment, RemovalStats, SubCategory,
};
pub use reference::{
    seed_countries, seed_organization_types, validate_countries, validate_organization_types,
    Country, OrganizationType,
};

use crate::core::registry::SeedRegistry;
use crate::core::store::DatasetStore;
use crate::core::workspace::Workspace;

/// Dataset document names (file stems under datasets/)
pub const DOMAIN_GROUPS: &str = "domain_groups";
pub const INDUSTRY_SEGMENTS: &str = "industry_segments";
pub const CAPABILITY_LEVELS: &str = "capability_levels";
pub const COUNTRIES: &str = "countries";
pub const ORGANIZATION_TYPES: &str = "organization_types";

/// Schema versions; bumping one discards stored documents of that dataset
/// on next load and reseeds them
const DOMAIN_GROUPS_VERSION: u32 = 2;
const INDUSTRY_SEGMENTS_VERSION: u32 = 2;
const CAPABILITY_LEVELS_VERSION: u32 = 1;
const COUNTRIES_VERSION: u32 = 1;
const ORGANIZATION_TYPES_VERSION: u32 = 1;

/// Every dataset this tool manages, wired to one workspace
pub struct MasterDatasets {
    pub domain_groups: DatasetStore<DomainGroupsData>,
    pub industry_segments: DatasetStore<Vec<IndustrySegment>>,
    pub capability_levels: DatasetStore<Vec<CapabilityLevel>>,
    pub countries: DatasetStore<Vec<Country>>,
    pub organization_types: DatasetStore<Vec<OrganizationType>>,
}

impl MasterDatasets {
    pub fn open(workspace: &Workspace) -> Self {
        let dir = workspace.datasets_dir();

        let domain_groups = DatasetStore::new(
            &dir,
            DOMAIN_GROUPS,
            DOMAIN_GROUPS_VERSION,
            DomainGroupsData::default(),
        )
        .with_validator(|data: &DomainGroupsData| data.validate())
        .with_counter(|data: &DomainGroupsData| {
            data.domain_groups.len() + data.categories.len() + data.sub_categories.len()
        });

        let industry_segments = DatasetStore::new(
            &dir,
            INDUSTRY_SEGMENTS,
            INDUSTRY_SEGMENTS_VERSION,
            Vec::new(),
        )
        .with_seed(seed_industry_segments)
        .with_validator(|segments: &Vec<IndustrySegment>| validate_segments(segments))
        .with_counter(Vec::len);

        let capability_levels = DatasetStore::new(
            &dir,
            CAPABILITY_LEVELS,
            CAPABILITY_LEVELS_VERSION,
            Vec::new(),
        )
        .with_seed(seed_capability_levels)
        .with_validator(|levels: &Vec<CapabilityLevel>| validate_levels(levels))
        .with_counter(Vec::len);

        let countries = DatasetStore::new(&dir, COUNTRIES, COUNTRIES_VERSION, Vec::new())
            .with_seed(seed_countries)
            .with_validator(|countries: &Vec<Country>| validate_countries(countries))
            .with_counter(Vec::len);

        let organization_types = DatasetStore::new(
            &dir,
            ORGANIZATION_TYPES,
            ORGANIZATION_TYPES_VERSION,
            Vec::new(),
        )
        .with_seed(seed_organization_types)
        .with_validator(|types: &Vec<OrganizationType>| validate_organization_types(types))
        .with_counter(Vec::len);

        Self {
            domain_groups,
            industry_segments,
            capability_levels,
            countries,
            organization_types,
        }
    }

    /// Build the seeding registry over clones of every store
    pub fn registry(&self) -> SeedRegistry {
        let mut registry = SeedRegistry::new();
        registry.register(Box::new(self.domain_groups.clone()));
        registry.register(Box::new(self.industry_segments.clone()));
        registry.register(Box::new(self.capability_levels.clone()));
        registry.register(Box::new(self.countries.clone()));
        registry.register(Box::new(self.organization_types.clone()));
        registry
    }
}
