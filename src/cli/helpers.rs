//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::backend::ChangeNotifier;
use crate::core::config::Config;
use crate::core::workspace::Workspace;
use crate::datasets::MasterDatasets;
use crate::merge::MergeStats;

/// Resolve the workspace from --workspace or by discovery
pub fn resolve_workspace(global: &GlobalOpts) -> Result<Workspace> {
    match &global.workspace {
        Some(path) => Workspace::discover_from(path).into_diagnostic(),
        None => Workspace::discover().into_diagnostic(),
    }
}

/// Author name stamped into the provenance of created records
pub fn resolve_author(workspace: &Workspace) -> String {
    Config::load(workspace).author()
}

/// Open every dataset store for the resolved workspace
pub fn open_datasets(global: &GlobalOpts) -> Result<(Workspace, MasterDatasets)> {
    let workspace = resolve_workspace(global)?;
    let datasets = MasterDatasets::open(&workspace);
    Ok((workspace, datasets))
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Format a record id for display, truncating if too long
pub fn format_short_id_str(id: &str) -> String {
    if id.len() > 16 {
        format!("{}...", &id[..13])
    } else {
        id.to_string()
    }
}

/// Print one merge summary line per hierarchy level
pub fn print_merge_stats(stats: &MergeStats, quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "{} Segments: {} created · Groups: {} created, {} merged · Categories: {} created, {} merged · Sub-categories: {} created, {} merged",
        style("✓").green(),
        stats.segments_created,
        stats.groups_created,
        stats.groups_merged,
        stats.categories_created,
        stats.categories_merged,
        stats.sub_categories_created,
        stats.sub_categories_merged,
    );
    if stats.duplicate_groups_skipped > 0 {
        println!(
            "{} {} duplicate group row(s) skipped",
            style("!").yellow(),
            stats.duplicate_groups_skipped
        );
    }
}

/// Notifier that tells the terminal when a dataset was replaced
pub struct ConsoleNotifier {
    pub quiet: bool,
}

impl ChangeNotifier for ConsoleNotifier {
    fn dataset_replaced(&self, dataset: &str) {
        if !self.quiet {
            eprintln!("{} dataset '{}' replaced", style("↻").blue(), dataset);
        }
    }
}
