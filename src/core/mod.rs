//! Core data types for duplicate-contig removal.
//!
//! - [`Contig`]: one FASTA record (name and sequence)
//! - [`Assembly`]: contigs of one input file, in input order, plus N50 and
//!   size ranking helpers
//! - [`AlignmentHit`]: one row of aligner output with identity/coverage metrics
//! - [`Classification`]: the final call made for each contig
//!
//! [`Contig`]: contig::Contig
//! [`Assembly`]: assembly::Assembly
//! [`AlignmentHit`]: types::AlignmentHit
//! [`Classification`]: types::Classification

pub mod assembly;
pub mod contig;
pub mod types;
