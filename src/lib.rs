//! # contig-dedup
//!
//! A library for removing duplicated contigs from genome assemblies.
//!
//! Short-read and hybrid assemblers often emit small contigs that are fully
//! contained in a larger contig of the same assembly, for example haplotype
//! copies or assembly artifacts. `contig-dedup` finds them by aligning each
//! contig against the larger ones and dropping those that are covered and
//! matched beyond configurable thresholds.
//!
//! ## Algorithm
//!
//! - Compute the assembly N50 (length-weighted median).
//! - Visit contigs shortest to longest. Contigs under the minimum length are
//!   dropped; contigs longer than N50 are kept unchecked (unless exhaustive).
//! - Align every other contig against the contigs not yet visited and drop it
//!   if the first hit exceeding both identity and coverage thresholds is found.
//! - Write the retained contigs in their original order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use contig_dedup::{deduplicate, DedupConfig, Minimap2Aligner, Minimap2Options};
//! use contig_dedup::parsing::fasta::{read_assembly, write_assembly};
//! use std::path::Path;
//!
//! let aligner = Minimap2Aligner::new(Minimap2Options::default()).unwrap();
//! let assembly = read_assembly(Path::new("assembly.fasta")).unwrap();
//!
//! let outcome = deduplicate(&assembly, DedupConfig::default(), &aligner).unwrap();
//! write_assembly(Path::new("cleaned.fasta"), &outcome.cleaned, 80).unwrap();
//!
//! for name in outcome.classifications.redundant_names() {
//!     println!("duplicated: {name}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Contigs, assemblies, N50 and alignment hit types
//! - [`parsing`]: FASTA, PAF and show-coords readers/writers
//! - [`align`]: The `Aligner` trait and the minimap2 and MUMmer back ends
//! - [`dedup`]: The deduplication engine and run summaries
//! - [`cli`]: Command-line interface implementation

pub mod align;
pub mod cli;
pub mod core;
pub mod dedup;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use align::minimap2::{Minimap2Aligner, Minimap2Options};
pub use align::nucmer::{NucmerAligner, NucmerOptions};
pub use align::{AlignError, Aligner};
pub use core::assembly::{Assembly, AssemblyStats};
pub use core::contig::Contig;
pub use core::types::*;
pub use dedup::{deduplicate, DedupConfig, DedupError, DedupOutcome, Deduplicator};
