//! `mdt health` command - Advisory per-dataset status

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;
use crate::recovery::system_health;

#[derive(clap::Args, Debug)]
pub struct HealthArgs {}

#[derive(Tabled)]
struct HealthRow {
    #[tabled(rename = "Dataset")]
    name: String,
    #[tabled(rename = "Present")]
    present: String,
    #[tabled(rename = "Parseable")]
    parseable: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Valid")]
    valid: String,
    #[tabled(rename = "Records")]
    records: String,
}

fn mark(ok: bool) -> String {
    if ok { "✓" } else { "✗" }.to_string()
}

pub fn run(_args: HealthArgs, global: &GlobalOpts) -> Result<()> {
    let (workspace, datasets) = open_datasets(global)?;
    let registry = datasets.registry();

    let summary = system_health(&workspace, &datasets, &registry).into_diagnostic()?;

    let rows: Vec<HealthRow> = summary
        .datasets
        .iter()
        .map(|health| HealthRow {
            name: health.name.clone(),
            present: mark(health.file_present),
            parseable: mark(health.parseable),
            version: mark(health.current_version),
            valid: mark(health.structurally_valid),
            records: health
                .record_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    println!("{}", table);

    for error in &summary.referential_errors {
        eprintln!("{} {}", style("✗").red(), error);
    }
    for stray in &summary.stray_files {
        eprintln!(
            "{} unmanaged document in datasets/: {}",
            style("!").yellow(),
            stray
        );
    }

    if summary.all_healthy() {
        println!("{} All datasets healthy", style("✓").green());
    } else {
        println!(
            "{} Some datasets need attention (a load will self-repair; 'mdt seed' forces it)",
            style("!").yellow()
        );
    }

    Ok(())
}
