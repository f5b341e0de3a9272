//! `mdt group` command - Domain group hierarchy management

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::helpers::{format_short_id_str, open_datasets, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::identity::RecordId;
use crate::datasets::DOMAIN_GROUPS;

#[derive(clap::Subcommand, Debug)]
pub enum GroupCommands {
    /// List domain groups
    List(ListArgs),

    /// Print the full hierarchy as a tree
    Tree(TreeArgs),

    /// Remove a domain group, cascading to its categories and sub-categories
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by industry segment name (case-insensitive)
    #[arg(long, short = 's')]
    pub segment: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Domain group id (GRP-...)
    pub id: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Categories")]
    categories: usize,
    #[tabled(rename = "Sub-Categories")]
    sub_categories: usize,
}

pub fn run(cmd: GroupCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        GroupCommands::List(args) => list(args, global),
        GroupCommands::Tree(args) => tree(args, global),
        GroupCommands::Remove(args) => remove(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let data = datasets.domain_groups.load().into_diagnostic()?.data;

    let rows: Vec<GroupRow> = data
        .domain_groups
        .iter()
        .filter(|g| match &args.segment {
            Some(filter) => g.industry_segment_name.eq_ignore_ascii_case(filter),
            None => true,
        })
        .map(|group| {
            let category_ids: Vec<&RecordId> = data
                .categories_of(&group.id)
                .map(|c| &c.id)
                .collect();
            let sub_count = data
                .sub_categories
                .iter()
                .filter(|s| category_ids.contains(&&s.category_id))
                .count();
            GroupRow {
                id: format_short_id_str(&group.id.to_string()),
                name: truncate_str(&group.name, 40),
                segment: truncate_str(&group.industry_segment_name, 30),
                categories: category_ids.len(),
                sub_categories: sub_count,
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No domain groups found");
        return Ok(());
    }

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    println!("{}", table);
    if !global.quiet {
        println!("{} group(s)", rows.len());
    }

    Ok(())
}

fn tree(_args: TreeArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let data = datasets.domain_groups.load().into_diagnostic()?.data;
    let segments = datasets.industry_segments.load().into_diagnostic()?.data;

    if data.domain_groups.is_empty() {
        println!("Hierarchy is empty. Try 'mdt bootstrap' or 'mdt import'.");
        return Ok(());
    }

    for segment in &segments {
        let groups: Vec<_> = data
            .domain_groups
            .iter()
            .filter(|g| g.industry_segment_id == segment.id)
            .collect();
        if groups.is_empty() {
            continue;
        }

        println!("{}", style(&segment.name).bold());
        for group in groups {
            println!("├── {}", style(&group.name).cyan());
            for category in data.categories_of(&group.id) {
                println!("│   ├── {}", category.name);
                for sub in data.sub_categories_of(&category.id) {
                    println!("│   │   └── {}", style(&sub.name).dim());
                }
            }
        }
        println!();
    }

    Ok(())
}

fn remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let id: RecordId = args.id.parse().into_diagnostic()?;

    let mut data = datasets.domain_groups.load().into_diagnostic()?.data;
    let stats = data
        .remove_domain_group(&id)
        .ok_or_else(|| miette::miette!("no domain group with id {}", id))?;

    datasets.domain_groups.save(&data).into_diagnostic()?;

    println!(
        "{} Removed 1 group, {} categor{}, {} sub-categor{} from '{}'",
        style("✓").green(),
        stats.categories,
        if stats.categories == 1 { "y" } else { "ies" },
        stats.sub_categories,
        if stats.sub_categories == 1 { "y" } else { "ies" },
        DOMAIN_GROUPS
    );

    Ok(())
}
