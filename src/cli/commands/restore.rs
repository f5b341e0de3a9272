//! `mdt restore` command - Restore datasets from a backup document
//!
//! All-or-nothing: a malformed or invalid document is rejected before any
//! dataset is touched.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;
use crate::recovery::restore_from_file;

#[derive(clap::Args, Debug)]
pub struct RestoreArgs {
    /// Backup document to restore from
    pub file: PathBuf,
}

pub fn run(args: RestoreArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;

    let summary = restore_from_file(&datasets, &args.file).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Restored {} dataset(s): {}",
            style("✓").green(),
            summary.datasets_restored.len(),
            summary.datasets_restored.join(", ")
        );
    }

    Ok(())
}
