//! minimap2 subprocess back end.
//!
//! Each call writes the query and the reference set to scratch FASTA files,
//! runs `minimap2 -t <threads> -x <preset> -N<n> reference.fasta query.fasta`
//! and parses PAF from stdout. Scratch files are removed when the call
//! returns, whether or not it succeeded.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::align::scratch::ScratchDir;
use crate::align::{resolve_program, run_tool, AlignError, Aligner};
use crate::core::contig::Contig;
use crate::core::types::AlignmentHit;
use crate::parsing::paf::parse_paf;
use crate::utils::validation::validate_threads;

/// Default executable name looked up on `PATH`
pub const DEFAULT_PROGRAM: &str = "minimap2";

/// Default preset: assembly-to-assembly, up to ~0.1% divergence
pub const DEFAULT_PRESET: &str = "asm5";

/// Default number of secondary alignments to report (`-N`)
pub const DEFAULT_MAX_SECONDARY: usize = 5;

/// Default scratch file prefix
pub const DEFAULT_PREFIX: &str = "contig_dedup_";

/// Options passed through to minimap2
#[derive(Debug, Clone)]
pub struct Minimap2Options {
    /// Executable name or path
    pub program: PathBuf,
    /// Worker threads for a single alignment call (`-t`)
    pub threads: usize,
    /// Preset (`-x`)
    pub preset: String,
    /// Secondary alignments to report (`-N`)
    pub max_secondary: usize,
    /// Directory for scratch files; a private temporary directory if `None`
    pub work_dir: Option<PathBuf>,
    /// Scratch file name prefix
    pub prefix: String,
}

impl Default for Minimap2Options {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            threads: 1,
            preset: DEFAULT_PRESET.to_string(),
            max_secondary: DEFAULT_MAX_SECONDARY,
            work_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Runs minimap2 as an external process
#[derive(Debug)]
pub struct Minimap2Aligner {
    program: PathBuf,
    options: Minimap2Options,
    scratch: ScratchDir,
}

impl Minimap2Aligner {
    /// Resolve the executable and prepare the scratch directory.
    ///
    /// The executable is checked once here so that a missing aligner fails the
    /// run before any contig is processed.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidOption` for a zero thread count,
    /// `AlignError::MissingDependency` if the program cannot be found or is not
    /// executable, or `AlignError::Io` if the work directory cannot be created.
    pub fn new(options: Minimap2Options) -> Result<Self, AlignError> {
        validate_threads(options.threads)?;
        let program = resolve_program(&options.program)?;
        let scratch = ScratchDir::new(options.work_dir.as_deref(), &options.prefix)?;

        debug!(program = %program.display(), "Using aligner");

        Ok(Self {
            program,
            options,
            scratch,
        })
    }

    /// Resolved path of the executable
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn options(&self) -> &Minimap2Options {
        &self.options
    }

    #[must_use]
    pub fn work_dir(&self) -> &Path {
        self.scratch.path()
    }
}

impl Aligner for Minimap2Aligner {
    fn align(
        &self,
        query: &Contig,
        references: &[&Contig],
    ) -> Result<Vec<AlignmentHit>, AlignError> {
        let query_file = self.scratch.write_fasta("query.fasta", [query])?;
        let reference_file = self
            .scratch
            .write_fasta("reference.fasta", references.iter().copied())?;

        debug!(
            query = %query.name,
            references = references.len(),
            "Running {} -x {}",
            self.program.display(),
            self.options.preset
        );

        let stdout = run_tool(
            &self.program,
            Command::new(&self.program)
                .arg("-t")
                .arg(self.options.threads.to_string())
                .arg("-x")
                .arg(&self.options.preset)
                .arg(format!("-N{}", self.options.max_secondary))
                .arg(reference_file.path())
                .arg(query_file.path()),
        )?;

        parse_paf(stdout.as_slice()).map_err(AlignError::MalformedOutput)
    }
}
