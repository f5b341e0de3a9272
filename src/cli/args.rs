//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs,
    backup::BackupArgs,
    bootstrap::BootstrapArgs,
    completions::CompletionsArgs,
    group::GroupCommands,
    health::HealthArgs,
    import::ImportArgs,
    init::InitArgs,
    level::LevelCommands,
    reset::ResetArgs,
    restore::RestoreArgs,
    seed::SeedArgs,
    segment::SegmentCommands,
};

#[derive(Parser)]
#[command(name = "mdt")]
#[command(author, version, about = "Master Data Toolkit")]
#[command(
    long_about = "A Unix-style toolkit for managing competency master data hierarchies as plain text JSON datasets with versioned, self-healing storage."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Workspace root (default: auto-detect by finding .mdt/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new MDT workspace
    Init(InitArgs),

    /// Add one hierarchy row by hand (merged, never duplicated)
    Add(AddArgs),

    /// Import a 4-column CSV sheet into the hierarchy
    Import(ImportArgs),

    /// Populate the hierarchy from the built-in template
    Bootstrap(BootstrapArgs),

    /// Industry segment management
    #[command(subcommand)]
    Segment(SegmentCommands),

    /// Domain group hierarchy management
    #[command(subcommand)]
    Group(GroupCommands),

    /// Capability level management
    #[command(subcommand)]
    Level(LevelCommands),

    /// Export every dataset to one backup document
    Backup(BackupArgs),

    /// Restore datasets from a backup document
    Restore(RestoreArgs),

    /// Show per-dataset health status
    Health(HealthArgs),

    /// Force-reseed one dataset or all of them
    Seed(SeedArgs),

    /// Emergency reset: restore defaults or wipe everything
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
