use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::align::minimap2::{
    Minimap2Aligner, Minimap2Options, DEFAULT_PREFIX, DEFAULT_PRESET, DEFAULT_PROGRAM,
};
use crate::align::nucmer::{NucmerAligner, NucmerOptions, DEFAULT_NUCMER, DEFAULT_SHOW_COORDS};
use crate::align::{AlignError, Aligner};
use crate::cli::OutputFormat;
use crate::dedup::engine::DEFAULT_MIN_LENGTH;
use crate::dedup::{DedupConfig, DedupSummary, Deduplicator};
use crate::parsing::fasta::{read_assembly, write_assembly};
use crate::utils::validation::{parse_percent, parse_positive};

#[derive(Args)]
pub struct RmdupArgs {
    /// Input assembly (FASTA, optionally gzip compressed)
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Output cleaned assembly (FASTA)
    #[arg(short, long, required = true)]
    pub out: PathBuf,

    /// Minimum contig length to keep
    #[arg(short, long = "minlen", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Percent identity above which a contig counts as duplicated
    #[arg(short = 'p', long, default_value = "95", value_parser = parse_percent)]
    pub percent_id: f64,

    /// Percent of the contig that must be covered to count as duplicated
    #[arg(short = 'c', long, default_value = "95", value_parser = parse_percent)]
    pub percent_cov: f64,

    /// Check every contig, instead of stopping at N50
    #[arg(long)]
    pub exhaustive: bool,

    /// Program used to find overlaps between contigs
    #[arg(long, value_enum, default_value = "minimap2")]
    pub method: AlignMethod,

    /// Number of threads for each minimap2 call
    #[arg(short = 't', long, default_value = "1", value_parser = parse_positive)]
    pub cpus: usize,

    /// Directory for scratch files (a temporary directory by default)
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Prefix for scratch file names
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// minimap2 executable
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub minimap2: PathBuf,

    /// minimap2 preset
    #[arg(long, default_value = DEFAULT_PRESET)]
    pub preset: String,

    /// nucmer executable (with --method mummer)
    #[arg(long, default_value = DEFAULT_NUCMER)]
    pub nucmer: PathBuf,

    /// show-coords executable (with --method mummer)
    #[arg(long, default_value = DEFAULT_SHOW_COORDS)]
    pub show_coords: PathBuf,

    /// Bases per line in the output FASTA
    #[arg(long, default_value = "80", value_parser = parse_positive)]
    pub line_width: usize,
}

/// Overlap back end
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AlignMethod {
    /// minimap2 with an assembly preset
    Minimap2,
    /// MUMmer nucmer plus show-coords
    Mummer,
}

impl RmdupArgs {
    fn dedup_config(&self) -> DedupConfig {
        DedupConfig {
            min_length: self.min_length,
            percent_identity: self.percent_id,
            percent_coverage: self.percent_cov,
            exhaustive: self.exhaustive,
        }
    }

    fn minimap2_options(&self) -> Minimap2Options {
        Minimap2Options {
            program: self.minimap2.clone(),
            threads: self.cpus,
            preset: self.preset.clone(),
            work_dir: self.workdir.clone(),
            prefix: self.prefix.clone(),
            ..Minimap2Options::default()
        }
    }

    fn nucmer_options(&self) -> NucmerOptions {
        NucmerOptions {
            nucmer: self.nucmer.clone(),
            show_coords: self.show_coords.clone(),
            work_dir: self.workdir.clone(),
            prefix: self.prefix.clone(),
            ..NucmerOptions::default()
        }
    }

    /// Build the selected back end, checking its programs are installed.
    /// Also returns the scratch directory for reporting.
    fn aligner(&self) -> Result<(Box<dyn Aligner>, PathBuf), AlignError> {
        Ok(match self.method {
            AlignMethod::Minimap2 => {
                let aligner = Minimap2Aligner::new(self.minimap2_options())?;
                let work_dir = aligner.work_dir().to_path_buf();
                (Box::new(aligner) as Box<dyn Aligner>, work_dir)
            }
            AlignMethod::Mummer => {
                let aligner = NucmerAligner::new(self.nucmer_options())?;
                let work_dir = aligner.work_dir().to_path_buf();
                (Box::new(aligner) as Box<dyn Aligner>, work_dir)
            }
        })
    }
}

/// Execute rmdup subcommand
///
/// # Errors
///
/// Returns an error if the aligner is missing, the input cannot be read, any
/// alignment fails, or the output cannot be written. No output file is
/// written unless the whole run succeeds.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RmdupArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Fail on a missing aligner before reading anything
    let (aligner, work_dir) = args.aligner()?;
    let assembly = read_assembly(&args.input)?;

    if verbose {
        eprintln!(
            "Read {} contigs from {}; aligning with {:?}; scratch files in {}",
            assembly.len(),
            args.input.display(),
            args.method,
            work_dir.display()
        );
    }

    let config = args.dedup_config();
    let outcome = Deduplicator::new(&aligner, config.clone()).run(&assembly)?;
    write_assembly(&args.out, &outcome.cleaned, args.line_width)?;

    let summary = outcome.summary(&assembly, &config);
    info!(
        "Cleaned assembly is {} contigs and {} bp",
        summary.output.num_contigs, summary.output.total_length
    );

    match format {
        OutputFormat::Text => print_text_summary(&args, &summary, verbose),
        OutputFormat::Json => print_json_summary(&args, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(args: &RmdupArgs, summary: &DedupSummary, verbose: bool) {
    println!("Duplicate Contig Removal");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", args.input.display());
    println!(
        "  {} contigs; {} bp; N50 {} bp",
        summary.input.num_contigs, summary.input.total_length, summary.input.n50
    );
    if summary.exhaustive {
        println!("  Checked duplication of {} contigs", summary.checked);
    } else {
        println!(
            "  Checked duplication of {} contigs up to {} bp",
            summary.checked, summary.length_bound
        );
    }

    println!("\nOutput: {}", args.out.display());
    println!(
        "  {} contigs; {} bp; N50 {} bp",
        summary.output.num_contigs, summary.output.total_length, summary.output.n50
    );

    println!("\n{}", summary.headline());

    if verbose && !summary.duplicates.is_empty() {
        println!("\nDuplicated contigs:");
        for dup in &summary.duplicates {
            println!(
                "  {} ({} bp) -> {}: {:.1}% identity over {:.1}%",
                dup.name, dup.length, dup.target, dup.percent_identity, dup.percent_coverage
            );
        }
    }
}

fn print_json_summary(args: &RmdupArgs, summary: &DedupSummary) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "output": args.out.display().to_string(),
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &DedupSummary) {
    println!("name\tlength\ttarget\tpercent_identity\tpercent_coverage");
    for dup in &summary.duplicates {
        println!(
            "{}\t{}\t{}\t{:.2}\t{:.2}",
            dup.name, dup.length, dup.target, dup.percent_identity, dup.percent_coverage
        );
    }
}
