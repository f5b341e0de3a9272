//! `mdt segment` command - Industry segment management

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::helpers::{format_short_id_str, open_datasets, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::identity::RecordId;

#[derive(clap::Subcommand, Debug)]
pub enum SegmentCommands {
    /// List industry segments
    List(ListArgs),

    /// Remove a segment (refused while domain groups reference it)
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include inactive segments
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Segment id (SEG-...)
    pub id: String,
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Groups")]
    groups: usize,
    #[tabled(rename = "Active")]
    active: String,
}

pub fn run(cmd: SegmentCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SegmentCommands::List(args) => list(args, global),
        SegmentCommands::Remove(args) => remove(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let segments = datasets.industry_segments.load().into_diagnostic()?.data;
    let hierarchy = datasets.domain_groups.load().into_diagnostic()?.data;

    let rows: Vec<SegmentRow> = segments
        .iter()
        .filter(|s| args.all || s.is_active)
        .map(|segment| SegmentRow {
            id: format_short_id_str(&segment.id.to_string()),
            name: truncate_str(&segment.name, 40),
            groups: hierarchy
                .domain_groups
                .iter()
                .filter(|g| g.industry_segment_id == segment.id)
                .count(),
            active: if segment.is_active { "yes" } else { "no" }.to_string(),
        })
        .collect();

    if rows.is_empty() {
        println!("No segments found");
        return Ok(());
    }

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    println!("{}", table);
    if !global.quiet {
        println!("{} segment(s)", rows.len());
    }

    Ok(())
}

fn remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let id: RecordId = args.id.parse().into_diagnostic()?;

    let hierarchy = datasets.domain_groups.load().into_diagnostic()?.data;
    let referencing = hierarchy
        .domain_groups
        .iter()
        .filter(|g| g.industry_segment_id == id)
        .count();
    if referencing > 0 {
        return Err(miette::miette!(
            "segment {} is referenced by {} domain group(s); remove them first",
            id,
            referencing
        ));
    }

    let mut segments = datasets.industry_segments.load().into_diagnostic()?.data;
    let before = segments.len();
    segments.retain(|s| s.id != id);
    if segments.len() == before {
        return Err(miette::miette!("no segment with id {}", id));
    }

    datasets
        .industry_segments
        .save(&segments)
        .into_diagnostic()?;

    println!("{} Removed segment {}", style("✓").green(), id);
    Ok(())
}
