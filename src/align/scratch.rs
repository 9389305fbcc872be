//! Scratch space for subprocess aligners.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

use crate::align::AlignError;
use crate::core::contig::Contig;
use crate::parsing::fasta::{write_contigs, DEFAULT_LINE_WIDTH};

/// Where scratch files go
#[derive(Debug)]
enum Location {
    /// Removed with the aligner
    Owned(TempDir),
    /// Caller-supplied; left in place
    Given(PathBuf),
}

/// Directory holding per-call query and reference files
#[derive(Debug)]
pub struct ScratchDir {
    location: Location,
    prefix: String,
}

impl ScratchDir {
    /// Use `work_dir` (created if missing), or a private temporary directory.
    /// `prefix` gets a trailing `_` if it lacks one.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::Io` if the directory cannot be created.
    pub fn new(work_dir: Option<&Path>, prefix: &str) -> Result<Self, AlignError> {
        let location = match work_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Location::Given(dir.to_path_buf())
            }
            None => Location::Owned(TempDir::new()?),
        };

        let mut prefix = prefix.to_string();
        if !prefix.ends_with('_') {
            prefix.push('_');
        }

        Ok(Self { location, prefix })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match &self.location {
            Location::Owned(dir) => dir.path(),
            Location::Given(path) => path,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Write `contigs` to a uniquely named FASTA file, removed on drop
    ///
    /// # Errors
    ///
    /// Returns `AlignError::Io` or `AlignError::Scratch` on write failure.
    pub fn write_fasta<'a, I>(&self, suffix: &str, contigs: I) -> Result<NamedTempFile, AlignError>
    where
        I: IntoIterator<Item = &'a Contig>,
    {
        let mut file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(suffix)
            .tempfile_in(self.path())?;

        {
            let mut out = BufWriter::new(file.as_file_mut());
            write_contigs(&mut out, contigs, DEFAULT_LINE_WIDTH).map_err(AlignError::Scratch)?;
            out.flush()?;
        }

        Ok(file)
    }

    /// Uniquely named subdirectory for tools that write several output files,
    /// removed with its contents on drop
    ///
    /// # Errors
    ///
    /// Returns `AlignError::Io` if the directory cannot be created.
    pub fn subdir(&self) -> Result<TempDir, AlignError> {
        Ok(tempfile::Builder::new()
            .prefix(&self.prefix)
            .tempdir_in(self.path())?)
    }
}
