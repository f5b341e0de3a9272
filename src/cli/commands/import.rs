//! `mdt import` command - Import the hierarchy from a CSV sheet

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{open_datasets, print_merge_stats, resolve_author, ConsoleNotifier};
use crate::cli::GlobalOpts;
use crate::ingest::{ingest_file, ParseOutput};
use crate::merge::{merge_and_store, merge_hierarchy};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import (4 columns: Industry Segment, Domain Group, Category, Sub-Category)
    #[arg(required_unless_present = "template")]
    pub file: Option<PathBuf>,

    /// Print a CSV template instead of importing
    #[arg(long)]
    pub template: bool,

    /// Parse and show what would merge without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        return generate_template();
    }

    let Some(file) = args.file.as_ref() else {
        return Err(miette::miette!("a CSV file is required unless --template is given"));
    };
    let output = ingest_file(file).into_diagnostic()?;

    report_parse(&output, global.quiet);

    if output.hierarchy.is_empty() {
        return Err(miette::miette!(
            "nothing to import from '{}'",
            file.display()
        ));
    }

    let (workspace, datasets) = open_datasets(global)?;
    let author = resolve_author(&workspace);
    let origin = format!(
        "file {}",
        file.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string())
    );

    if args.dry_run {
        let current = datasets.domain_groups.load().into_diagnostic()?.data;
        let segments = datasets.industry_segments.load().into_diagnostic()?.data;
        let outcome = merge_hierarchy(&output.hierarchy, &current, &segments, &origin, &author)
            .into_diagnostic()?;
        println!("{} Dry run: no changes written", style("○").dim());
        print_merge_stats(&outcome.stats, false);
        return Ok(());
    }

    let notifier = ConsoleNotifier {
        quiet: global.quiet,
    };
    let report = merge_and_store(&datasets, &output.hierarchy, &origin, &author, None, &notifier)
        .into_diagnostic()?;

    print_merge_stats(&report.stats, global.quiet);
    for warning in &report.mirror_warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    Ok(())
}

/// Per-row ingestion summary before any merge happens
fn report_parse(output: &ParseOutput, quiet: bool) {
    for error in &output.result.errors {
        eprintln!("{} {}", style("✗").red(), error);
    }
    for warning in &output.result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
    if !quiet {
        println!(
            "{} Parsed {} row(s), {} fully valid",
            style("→").blue(),
            output.result.total_rows,
            output.result.valid_rows
        );
    }
}

/// Print headers and one example row to stdout (redirect to a file)
fn generate_template() -> Result<()> {
    println!("Industry Segment,Domain Group,Category,Sub-Category");
    println!("Life Sciences,Commercial Strategy,Market Access,Payer Engagement");

    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: mdt import --template > hierarchy.csv",
        style("→").blue()
    );

    Ok(())
}
