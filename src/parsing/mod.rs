//! Readers and writers for the file formats the deduplicator touches.
//!
//! - **FASTA**: assemblies in (plain, gzip or bgzip), cleaned assemblies out
//!   with fixed-width line wrapping
//! - **PAF**: tabular alignment output from minimap2, parsed into
//!   [`AlignmentHit`](crate::core::types::AlignmentHit) rows
//! - **coords**: tab-delimited `show-coords` output from MUMmer, parsed into
//!   the same rows
//!
//! ## Example
//!
//! ```rust,no_run
//! use contig_dedup::parsing::fasta::{read_assembly, write_assembly};
//! use std::path::Path;
//!
//! let assembly = read_assembly(Path::new("assembly.fasta")).unwrap();
//! write_assembly(Path::new("copy.fasta"), &assembly, 80).unwrap();
//! ```

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod coords;
pub mod fasta;
pub mod paf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Duplicate contig name: {0}")]
    DuplicateName(String),

    #[error("Invalid PAF line {line}: {reason}")]
    InvalidPaf { line: usize, reason: String },

    #[error("Invalid show-coords line {line}: {reason}")]
    InvalidCoords { line: usize, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),
}
