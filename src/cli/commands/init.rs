//! `mdt init` command - Initialize a new MDT workspace

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::workspace::Workspace;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let workspace = Workspace::init(&path).into_diagnostic()?;

    println!(
        "{} Initialized MDT workspace at {}",
        style("✓").green(),
        style(workspace.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!("  mdt bootstrap              # load the built-in hierarchy");
    println!("  mdt import sheet.csv       # import your own 4-column sheet");
    println!("  mdt health                 # check dataset status");

    Ok(())
}
