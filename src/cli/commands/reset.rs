//! `mdt reset` command - Emergency reset operations
//!
//! Both variants are destructive and prompt for confirmation unless
//! --yes is passed. Either way the system stays loadable: a wiped
//! dataset reseeds itself on the next load.

use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;
use crate::recovery::{clear_all, restore_defaults};

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Rewrite every dataset from its seed/default content
    #[arg(long, conflicts_with = "wipe")]
    pub defaults: bool,

    /// Delete every managed dataset document
    #[arg(long, conflicts_with = "defaults")]
    pub wipe: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    if !args.defaults && !args.wipe {
        return Err(miette::miette!("choose --defaults or --wipe"));
    }

    let (_workspace, datasets) = open_datasets(global)?;
    let registry = datasets.registry();

    let action = if args.defaults {
        "rewrite every dataset from defaults"
    } else {
        "delete every dataset document"
    };

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("This will {}. Continue?", action))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let report = if args.defaults {
        restore_defaults(&registry)
    } else {
        clear_all(&registry)
    };

    for outcome in &report.outcomes {
        match &outcome.error {
            None => {
                if !global.quiet {
                    println!("{} '{}'", style("✓").green(), outcome.name);
                }
            }
            Some(error) => eprintln!("{} '{}' failed: {}", style("✗").red(), outcome.name, error),
        }
    }

    if !report.all_succeeded() {
        return Err(miette::miette!("reset completed with failures"));
    }

    if !global.quiet {
        println!(
            "{} Done. Datasets will self-seed on next use.",
            style("✓").green()
        );
    }

    Ok(())
}
