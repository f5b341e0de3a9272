use clap::Parser;
use mdt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => mdt::cli::commands::init::run(args),
        Commands::Add(args) => mdt::cli::commands::add::run(args, &global),
        Commands::Import(args) => mdt::cli::commands::import::run(args, &global),
        Commands::Bootstrap(args) => mdt::cli::commands::bootstrap::run(args, &global),
        Commands::Segment(cmd) => mdt::cli::commands::segment::run(cmd, &global),
        Commands::Group(cmd) => mdt::cli::commands::group::run(cmd, &global),
        Commands::Level(cmd) => mdt::cli::commands::level::run(cmd, &global),
        Commands::Backup(args) => mdt::cli::commands::backup::run(args, &global),
        Commands::Restore(args) => mdt::cli::commands::restore::run(args, &global),
        Commands::Health(args) => mdt::cli::commands::health::run(args, &global),
        Commands::Seed(args) => mdt::cli::commands::seed::run(args, &global),
        Commands::Reset(args) => mdt::cli::commands::reset::run(args, &global),
        Commands::Completions(args) => mdt::cli::commands::completions::run(args),
    }
}
