use clap::Parser;
use tracing_subscriber::EnvFilter;

mod align;
mod cli;
mod core;
mod dedup;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("contig_dedup=debug,info")
    } else {
        EnvFilter::new("contig_dedup=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Rmdup(args) => {
            cli::rmdup::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Stats(args) => {
            cli::stats::run(args, cli.format)?;
        }
    }

    Ok(())
}
