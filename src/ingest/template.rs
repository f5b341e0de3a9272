//! Canned bulk hierarchy for one-click population
//!
//! A fixed Life Sciences hierarchy: 4 domain groups, 13 categories and 52
//! sub-categories. The generator returns real records with fresh ids, but
//! consumers route the output through the merge engine as a name map so
//! duplicate-name collapsing still applies.

use crate::datasets::hierarchy::{
    Category, DomainGroup, DomainGroupsData, IndustrySegment, SubCategory,
};
use crate::ingest::parser::HierarchyMap;

/// Industry segment the canned hierarchy belongs to
pub const TEMPLATE_SEGMENT: &str = "Life Sciences";

/// Description stamped on every generated record
const TEMPLATE_ORIGIN: &str = "Loaded from bulk template";

type GroupSpec = (&'static str, &'static [(&'static str, &'static [&'static str])]);

/// The full canned hierarchy: group → categories → sub-categories
const TEMPLATE: &[GroupSpec] = &[
    (
        "Commercial Strategy",
        &[
            (
                "Market Access",
                &[
                    "Payer Engagement",
                    "Health Economics",
                    "Reimbursement Strategy",
                    "Access Analytics",
                ],
            ),
            (
                "Brand Management",
                &[
                    "Brand Planning",
                    "Campaign Execution",
                    "Customer Insights",
                    "Portfolio Positioning",
                ],
            ),
            (
                "Launch Excellence",
                &[
                    "Launch Readiness",
                    "Cross-Functional Alignment",
                    "Launch Metrics",
                    "Post-Launch Review",
                ],
            ),
            (
                "Pricing & Contracting",
                &[
                    "Price Setting",
                    "Contract Strategy",
                    "Tender Management",
                    "Gross-to-Net Analysis",
                ],
            ),
        ],
    ),
    (
        "Medical Affairs",
        &[
            (
                "Scientific Communications",
                &[
                    "Publication Planning",
                    "Medical Writing",
                    "Congress Strategy",
                    "Scientific Platforms",
                ],
            ),
            (
                "Evidence Generation",
                &[
                    "Real-World Evidence",
                    "Investigator Studies",
                    "Data Partnerships",
                    "Outcomes Research",
                ],
            ),
            (
                "Field Medical",
                &[
                    "KOL Engagement",
                    "Medical Education",
                    "Insight Gathering",
                    "Advisory Boards",
                ],
            ),
        ],
    ),
    (
        "Regulatory & Quality",
        &[
            (
                "Submissions",
                &[
                    "Dossier Preparation",
                    "Agency Interactions",
                    "Lifecycle Submissions",
                    "Labeling",
                ],
            ),
            (
                "Compliance",
                &[
                    "Promotional Review",
                    "Pharmacovigilance Liaison",
                    "Audit Readiness",
                    "Policy Monitoring",
                ],
            ),
            (
                "Quality Systems",
                &[
                    "Document Control",
                    "Deviation Management",
                    "CAPA Tracking",
                    "Supplier Quality",
                ],
            ),
        ],
    ),
    (
        "Clinical Development",
        &[
            (
                "Trial Design",
                &[
                    "Protocol Development",
                    "Endpoint Selection",
                    "Feasibility Assessment",
                    "Adaptive Designs",
                ],
            ),
            (
                "Site Operations",
                &[
                    "Site Selection",
                    "Patient Recruitment",
                    "Monitoring",
                    "Site Relationships",
                ],
            ),
            (
                "Biostatistics",
                &[
                    "Statistical Analysis Plans",
                    "Sample Size Modeling",
                    "Interim Analyses",
                    "Data Standards",
                ],
            ),
        ],
    ),
];

/// Generated template output: one segment plus a consistent triple
#[derive(Debug)]
pub struct BulkTemplate {
    pub segment: IndustrySegment,
    pub data: DomainGroupsData,
}

impl BulkTemplate {
    /// Name map view, suitable for the merge engine
    pub fn hierarchy(&self) -> HierarchyMap {
        let mut hierarchy = HierarchyMap::new();
        let groups = hierarchy.entry(self.segment.name.clone()).or_default();

        for group in &self.data.domain_groups {
            let categories = groups.entry(group.name.clone()).or_default();
            for category in self.data.categories_of(&group.id) {
                let subs = categories.entry(category.name.clone()).or_default();
                for sub in self.data.sub_categories_of(&category.id) {
                    subs.push(sub.name.clone());
                }
            }
        }

        hierarchy
    }
}

/// Generate the canned hierarchy with fresh ids
pub fn bulk_template() -> BulkTemplate {
    let segment = IndustrySegment::new(TEMPLATE_SEGMENT, Some(TEMPLATE_ORIGIN.to_string()));
    let mut data = DomainGroupsData::default();

    for (group_name, categories) in TEMPLATE {
        let group = DomainGroup::new(group_name, Some(TEMPLATE_ORIGIN.to_string()), &segment);
        for (category_name, subs) in *categories {
            let category = Category::new(
                category_name,
                Some(TEMPLATE_ORIGIN.to_string()),
                group.id.clone(),
            );
            for sub_name in *subs {
                data.sub_categories.push(SubCategory::new(
                    sub_name,
                    Some(TEMPLATE_ORIGIN.to_string()),
                    category.id.clone(),
                ));
            }
            data.categories.push(category);
        }
        data.domain_groups.push(group);
    }

    BulkTemplate { segment, data }
}
