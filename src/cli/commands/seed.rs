//! `mdt seed` command - Force-reseed datasets from defaults

use console::style;
use miette::Result;

use crate::cli::helpers::open_datasets;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct SeedArgs {
    /// Dataset to reseed (see 'mdt health' for names)
    #[arg(required_unless_present = "all")]
    pub name: Option<String>,

    /// Reseed every registered dataset
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: SeedArgs, global: &GlobalOpts) -> Result<()> {
    let (_workspace, datasets) = open_datasets(global)?;
    let registry = datasets.registry();

    if args.all {
        let report = registry.seed_all();
        for outcome in &report.outcomes {
            match &outcome.error {
                None => println!("{} reseeded '{}'", style("✓").green(), outcome.name),
                Some(error) => {
                    eprintln!("{} '{}' failed: {}", style("✗").red(), outcome.name, error)
                }
            }
        }
        if !report.all_succeeded() {
            return Err(miette::miette!("some datasets could not be reseeded"));
        }
        return Ok(());
    }

    let Some(name) = args.name.as_ref() else {
        return Err(miette::miette!("a dataset name is required unless --all is given"));
    };
    let handle = registry
        .get(name)
        .ok_or_else(|| miette::miette!("unknown dataset '{}'; run 'mdt health' for names", name))?;

    handle
        .force_reseed()
        .map_err(|e| miette::miette!("reseed failed: {}", e))?;

    println!("{} reseeded '{}'", style("✓").green(), name);
    Ok(())
}
