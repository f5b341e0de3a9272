//! `mdt level` command - Capability level management

use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;

#[derive(clap::Subcommand, Debug)]
pub enum LevelCommands {
    /// List capability levels in ladder order
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include inactive levels
    #[arg(long)]
    pub all: bool,
}

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Order")]
    order: u32,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Score Range")]
    range: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Active")]
    active: String,
}

pub fn run(cmd: LevelCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LevelCommands::List(args) => list(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let mut levels = datasets.capability_levels.load().into_diagnostic()?.data;
    levels.sort_by_key(|l| l.order);

    let rows: Vec<LevelRow> = levels
        .iter()
        .filter(|l| args.all || l.is_active)
        .map(|level| LevelRow {
            order: level.order,
            label: level.label.clone(),
            range: format!("{}-{}", level.min_score, level.max_score),
            color: level.color.clone(),
            active: if level.is_active { "yes" } else { "no" }.to_string(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    println!("{}", table);
    if !global.quiet {
        println!("{} level(s)", rows.len());
    }

    Ok(())
}
