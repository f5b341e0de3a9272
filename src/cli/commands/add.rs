//! `mdt add` command - Manual hierarchy entry
//!
//! A hand-entered row goes through the same merge contract as a sheet
//! import, so repeating an add never duplicates records.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_datasets, print_merge_stats, resolve_author, ConsoleNotifier};
use crate::cli::GlobalOpts;
use crate::ingest::parser::HierarchyMap;
use crate::merge::merge_and_store;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Industry segment name (created if missing)
    #[arg(long, short = 's')]
    pub segment: String,

    /// Domain group name
    #[arg(long, short = 'g')]
    pub group: String,

    /// Category name
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sub-category name (requires --category)
    #[arg(long, requires = "category")]
    pub sub: Option<String>,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let (workspace, datasets) = open_datasets(global)?;
    let author = resolve_author(&workspace);

    let mut hierarchy = HierarchyMap::new();
    let categories = hierarchy
        .entry(args.segment.trim().to_string())
        .or_default()
        .entry(args.group.trim().to_string())
        .or_default();
    if let Some(category) = &args.category {
        let subs = categories.entry(category.trim().to_string()).or_default();
        if let Some(sub) = &args.sub {
            subs.push(sub.trim().to_string());
        }
    }

    let notifier = ConsoleNotifier { quiet: true };
    let report = merge_and_store(&datasets, &hierarchy, "manual entry", &author, None, &notifier)
        .into_diagnostic()?;

    if report.stats.total_created() == 0 {
        println!(
            "{} Nothing new: every name already existed",
            style("○").dim()
        );
    }
    print_merge_stats(&report.stats, global.quiet);

    Ok(())
}
