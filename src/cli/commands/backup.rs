//! `mdt backup` command - Export every dataset to one document

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;
use crate::recovery::write_backup_file;

#[derive(clap::Args, Debug)]
pub struct BackupArgs {
    /// Destination file for the backup document
    pub file: PathBuf,
}

pub fn run(args: BackupArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;

    write_backup_file(&datasets, &args.file).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Exported all datasets to {}",
            style("✓").green(),
            style(args.file.display()).cyan()
        );
    }

    Ok(())
}
