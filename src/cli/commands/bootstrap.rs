//! `mdt bootstrap` command - One-click population from the built-in template

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_datasets, print_merge_stats, resolve_author, ConsoleNotifier};
use crate::cli::GlobalOpts;
use crate::ingest::bulk_template;
use crate::merge::merge_and_store;

#[derive(clap::Args, Debug)]
pub struct BootstrapArgs {}

pub fn run(_args: BootstrapArgs, global: &GlobalOpts) -> Result<()> {
    let (workspace, datasets) = open_datasets(global)?;
    let author = resolve_author(&workspace);

    let template = bulk_template();
    let notifier = ConsoleNotifier {
        quiet: global.quiet,
    };
    let report = merge_and_store(
        &datasets,
        &template.hierarchy(),
        "bulk template",
        &author,
        None,
        &notifier,
    )
    .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Loaded template hierarchy for '{}'",
            style("✓").green(),
            template.segment.name
        );
    }
    print_merge_stats(&report.stats, global.quiet);

    Ok(())
}
