//! Command-line interface for contig-dedup.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **rmdup**: Remove contigs duplicated by larger contigs in the same assembly
//! - **stats**: Print contig count, size and N50 of an assembly
//!
//! ## Usage
//!
//! ```text
//! # Remove duplicated contigs with default thresholds (95% identity, 95% coverage)
//! contig-dedup rmdup -i assembly.fasta -o assembly.rmdup.fasta
//!
//! # Check every contig, not only those up to N50, with 8 aligner threads
//! contig-dedup rmdup -i assembly.fasta -o cleaned.fasta --exhaustive --cpus 8
//!
//! # Use MUMmer (nucmer + show-coords) instead of minimap2
//! contig-dedup rmdup -i assembly.fasta -o cleaned.fasta --method mummer
//!
//! # JSON run summary for scripting
//! contig-dedup --format json rmdup -i assembly.fasta -o cleaned.fasta
//!
//! # Assembly statistics
//! contig-dedup stats assembly.fasta
//! ```

use clap::{Parser, Subcommand};

pub mod rmdup;
pub mod stats;

#[derive(Parser)]
#[command(name = "contig-dedup")]
#[command(version)]
#[command(about = "Remove duplicated contigs from a genome assembly")]
#[command(
    long_about = "contig-dedup removes short contigs that are duplicated elsewhere in an assembly.\n\nContigs are visited shortest to longest; each one up to the assembly N50 is aligned with minimap2 (or nucmer) against the larger contigs and dropped if an alignment exceeds both the identity and coverage thresholds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for reports
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove duplicated contigs from an assembly
    Rmdup(rmdup::RmdupArgs),

    /// Show assembly statistics
    Stats(stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
