use clap::Parser;
use miette::Result;
use ora2level::cli::{Cli, Commands};
use ora2level::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => ora2level::cli::convert::run(args, &printer)?,
        Commands::Inspect(args) => ora2level::cli::inspect::run(args, &printer)?,
        Commands::Completions(args) => ora2level::cli::completions::run(args)?,
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "ora2level=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
