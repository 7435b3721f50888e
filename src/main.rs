use clap::Parser;
use inventory::cli::{Cli, Commands};
use inventory::core::Config;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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

    // Logs go to stderr so list output stays pipeable
    let filter = if cli.global.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("INV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load();
    let global = cli.global.with_config(&config);

    match cli.command {
        Commands::Part(cmd) => inventory::cli::commands::part::run(cmd, &global),
        Commands::Product(cmd) => inventory::cli::commands::product::run(cmd, &global),
        Commands::Shell(args) => inventory::cli::commands::shell::run(args, &global, &config),
        Commands::Completions(args) => inventory::cli::commands::completions::run(args),
    }
}
