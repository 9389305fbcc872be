use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::assembly::AssemblyStats;
use crate::parsing::fasta::read_assembly;

#[derive(Args)]
pub struct StatsArgs {
    /// Input assembly (FASTA, optionally gzip compressed)
    #[arg(required = true)]
    pub input: PathBuf,
}

/// Execute stats subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read as FASTA.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let assembly = read_assembly(&args.input)?;
    let stats = assembly.stats();

    match format {
        OutputFormat::Text => print_text_stats(&args, &stats),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": args.input.display().to_string(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv_stats(&args, &stats),
    }

    Ok(())
}

fn print_text_stats(args: &StatsArgs, stats: &AssemblyStats) {
    println!("Assembly: {}", args.input.display());
    println!("  Contigs: {}", stats.num_contigs);
    println!("  Total length: {} bp", stats.total_length);
    println!("  N50: {} bp", stats.n50);
    println!("  Shortest: {} bp", stats.shortest);
    println!("  Longest: {} bp", stats.longest);
}

fn print_tsv_stats(args: &StatsArgs, stats: &AssemblyStats) {
    println!("path\tnum_contigs\ttotal_length\tn50\tshortest\tlongest");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        args.input.display(),
        stats.num_contigs,
        stats.total_length,
        stats.n50,
        stats.shortest,
        stats.longest
    );
}
