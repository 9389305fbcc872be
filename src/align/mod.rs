//! Pairwise alignment back ends.
//!
//! The deduplicator only needs one capability from an aligner: align a single
//! query contig against a set of reference contigs and report every alignment
//! found. [`Aligner`] captures that, so the engine can run against
//! [`Minimap2Aligner`](minimap2::Minimap2Aligner) or
//! [`NucmerAligner`](nucmer::NucmerAligner) in production and against an
//! in-memory fake in tests.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::core::contig::Contig;
use crate::core::types::AlignmentHit;
use crate::parsing::ParseError;
use crate::utils::validation::ValidationError;

pub mod minimap2;
pub mod nucmer;
pub mod scratch;

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Missing dependency: '{program}' not found or not executable. Please install it and re-run")]
    MissingDependency { program: String },

    #[error("{program} exited with status {status}: {stderr}")]
    Invocation {
        program: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Unparsable aligner output: {0}")]
    MalformedOutput(ParseError),

    #[error("Failed to write scratch FASTA: {0}")]
    Scratch(ParseError),

    #[error("Invalid aligner option: {0}")]
    InvalidOption(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Aligns one query contig against a reference set
pub trait Aligner {
    /// Return every alignment of `query` against `references`, in the order the
    /// aligner reports them. `references` is never empty and never contains
    /// `query`.
    ///
    /// # Errors
    ///
    /// Returns an `AlignError` if the alignment could not be run or its output
    /// could not be interpreted.
    fn align(&self, query: &Contig, references: &[&Contig])
        -> Result<Vec<AlignmentHit>, AlignError>;
}

impl<A: Aligner + ?Sized> Aligner for &A {
    fn align(
        &self,
        query: &Contig,
        references: &[&Contig],
    ) -> Result<Vec<AlignmentHit>, AlignError> {
        (**self).align(query, references)
    }
}

impl<A: Aligner + ?Sized> Aligner for Box<A> {
    fn align(
        &self,
        query: &Contig,
        references: &[&Contig],
    ) -> Result<Vec<AlignmentHit>, AlignError> {
        (**self).align(query, references)
    }
}

/// Resolve an executable on `PATH` (or check an explicit path)
///
/// # Errors
///
/// Returns `AlignError::MissingDependency` if it cannot be found or run.
pub fn resolve_program(program: &Path) -> Result<PathBuf, AlignError> {
    which::which(program).map_err(|_| AlignError::MissingDependency {
        program: program.display().to_string(),
    })
}

/// Run an external tool to completion and return its stdout
///
/// # Errors
///
/// Returns `AlignError::MissingDependency` if the program vanished or lost its
/// execute bit, `AlignError::Invocation` on a non-zero exit, or
/// `AlignError::Io` for any other spawn failure.
pub(crate) fn run_tool(program: &Path, command: &mut Command) -> Result<Vec<u8>, AlignError> {
    let output = command.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => AlignError::MissingDependency {
            program: program.display().to_string(),
        },
        _ => AlignError::Io(e),
    })?;

    if !output.status.success() {
        return Err(AlignError::Invocation {
            program: program.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
