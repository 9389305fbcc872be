//! Duplicate-contig detection and removal.
//!
//! Contigs are visited shortest to longest. Each contig at or below the
//! assembly N50 is aligned against the contigs that have not been visited yet;
//! if any alignment covers and matches it beyond the configured thresholds it
//! is redundant and dropped. Contigs shorter than the minimum length are
//! dropped without alignment, and contigs longer than N50 are kept without
//! alignment unless exhaustive mode is on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use contig_dedup::align::minimap2::{Minimap2Aligner, Minimap2Options};
//! use contig_dedup::dedup::{DedupConfig, Deduplicator};
//! use contig_dedup::parsing::fasta::read_assembly;
//! use std::path::Path;
//!
//! let aligner = Minimap2Aligner::new(Minimap2Options::default()).unwrap();
//! let assembly = read_assembly(Path::new("assembly.fasta")).unwrap();
//!
//! let outcome = Deduplicator::new(&aligner, DedupConfig::default())
//!     .run(&assembly)
//!     .unwrap();
//! println!("{} duplicated contigs", outcome.classifications.redundant_names().len());
//! ```

use thiserror::Error;

use crate::align::AlignError;
use crate::parsing::ParseError;
use crate::utils::validation::ValidationError;

pub mod classification;
pub mod engine;
pub mod summary;

pub use classification::ClassificationSet;
pub use engine::{deduplicate, DedupConfig, DedupOutcome, Deduplicator};
pub use summary::DedupSummary;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Input error: {0}")]
    Input(#[from] ParseError),

    #[error("Input error: assembly contains no contigs")]
    EmptyAssembly,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),

    #[error(transparent)]
    Alignment(#[from] AlignError),
}
