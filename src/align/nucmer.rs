//! MUMmer subprocess back end.
//!
//! Each call writes the query and the reference set to scratch FASTA files,
//! runs `nucmer -p <dir>/out query.fasta reference.fasta`, then reports the
//! resulting delta with `show-coords -r -c -l -T -o -I <min identity>` and
//! parses the tab-delimited rows. The query goes first so that the coverage
//! columns `show-coords` prints are relative to the query contig.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::align::minimap2::DEFAULT_PREFIX;
use crate::align::scratch::ScratchDir;
use crate::align::{resolve_program, run_tool, AlignError, Aligner};
use crate::core::contig::Contig;
use crate::core::types::AlignmentHit;
use crate::parsing::coords::parse_coords;
use crate::utils::validation::validate_percent;

/// Default aligner executable
pub const DEFAULT_NUCMER: &str = "nucmer";

/// Default report executable
pub const DEFAULT_SHOW_COORDS: &str = "show-coords";

/// Alignments below this identity are not reported (`show-coords -I`)
pub const DEFAULT_MIN_IDENTITY: f64 = 75.0;

/// Options passed through to nucmer and show-coords
#[derive(Debug, Clone)]
pub struct NucmerOptions {
    pub nucmer: PathBuf,
    pub show_coords: PathBuf,
    /// Identity floor for reported alignments (`-I`)
    pub min_identity: f64,
    /// Directory for scratch files; a private temporary directory if `None`
    pub work_dir: Option<PathBuf>,
    /// Scratch file name prefix
    pub prefix: String,
}

impl Default for NucmerOptions {
    fn default() -> Self {
        Self {
            nucmer: PathBuf::from(DEFAULT_NUCMER),
            show_coords: PathBuf::from(DEFAULT_SHOW_COORDS),
            min_identity: DEFAULT_MIN_IDENTITY,
            work_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Runs nucmer and show-coords as external processes
#[derive(Debug)]
pub struct NucmerAligner {
    nucmer: PathBuf,
    show_coords: PathBuf,
    options: NucmerOptions,
    scratch: ScratchDir,
}

impl NucmerAligner {
    /// Resolve both executables and prepare the scratch directory.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidOption` for an identity floor outside
    /// `(0, 100]`, `AlignError::MissingDependency` naming the first program
    /// that cannot be found, or `AlignError::Io` if the work directory cannot
    /// be created.
    pub fn new(options: NucmerOptions) -> Result<Self, AlignError> {
        validate_percent("minimum identity", options.min_identity)?;
        let nucmer = resolve_program(&options.nucmer)?;
        let show_coords = resolve_program(&options.show_coords)?;
        let scratch = ScratchDir::new(options.work_dir.as_deref(), &options.prefix)?;

        debug!(
            nucmer = %nucmer.display(),
            show_coords = %show_coords.display(),
            "Using aligner"
        );

        Ok(Self {
            nucmer,
            show_coords,
            options,
            scratch,
        })
    }

    #[must_use]
    pub fn options(&self) -> &NucmerOptions {
        &self.options
    }

    #[must_use]
    pub fn work_dir(&self) -> &Path {
        self.scratch.path()
    }
}

impl Aligner for NucmerAligner {
    fn align(
        &self,
        query: &Contig,
        references: &[&Contig],
    ) -> Result<Vec<AlignmentHit>, AlignError> {
        let query_file = self.scratch.write_fasta("query.fasta", [query])?;
        let reference_file = self
            .scratch
            .write_fasta("reference.fasta", references.iter().copied())?;
        let out_dir = self.scratch.subdir()?;
        let out_prefix = out_dir.path().join("out");

        debug!(
            query = %query.name,
            references = references.len(),
            "Running {}",
            self.nucmer.display()
        );

        run_tool(
            &self.nucmer,
            Command::new(&self.nucmer)
                .arg("-p")
                .arg(&out_prefix)
                .arg(query_file.path())
                .arg(reference_file.path()),
        )?;

        let stdout = run_tool(
            &self.show_coords,
            Command::new(&self.show_coords)
                .args(["-r", "-c", "-l", "-T", "-o", "-I"])
                .arg(self.options.min_identity.to_string())
                .arg(out_prefix.with_extension("delta")),
        )?;

        parse_coords(stdout.as_slice()).map_err(AlignError::MalformedOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_nucmer_fails_fast() {
        let options = NucmerOptions {
            nucmer: PathBuf::from("definitely-not-nucmer-on-this-path"),
            ..NucmerOptions::default()
        };
        let err = NucmerAligner::new(options).unwrap_err();
        assert!(
            matches!(err, AlignError::MissingDependency { program } if program.contains("definitely-not-nucmer"))
        );
    }

    #[test]
    fn test_bad_identity_floor_rejected() {
        let options = NucmerOptions {
            min_identity: 0.0,
            ..NucmerOptions::default()
        };
        let err = NucmerAligner::new(options).unwrap_err();
        assert!(matches!(err, AlignError::InvalidOption(_)));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        const REPORT: &str = "printf '/q /r\\nNUCMER\\n\\n[S1]\\t[E1]\\t[S2]\\t[E2]\\t[LEN 1]\\t[LEN 2]\\t[%% IDY]\\t[LEN R]\\t[LEN Q]\\t[COV R]\\t[COV Q]\\t[TAGS]\\n1\\t4\\t1\\t4\\t4\\t4\\t100.00\\t4\\t8\\t100.00\\t50.00\\tq\\tt\\n'";

        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn aligner(nucmer: PathBuf, show_coords: PathBuf, work_dir: &Path) -> NucmerAligner {
            NucmerAligner::new(NucmerOptions {
                nucmer,
                show_coords,
                work_dir: Some(work_dir.to_path_buf()),
                prefix: "run".to_string(),
                ..NucmerOptions::default()
            })
            .unwrap()
        }

        #[test]
        fn test_missing_show_coords_fails_fast() {
            let bin = TempDir::new().unwrap();
            let nucmer = script(bin.path(), "fake-nucmer", "exit 0");
            let err = NucmerAligner::new(NucmerOptions {
                nucmer,
                show_coords: PathBuf::from("definitely-not-show-coords"),
                ..NucmerOptions::default()
            })
            .unwrap_err();
            assert!(
                matches!(err, AlignError::MissingDependency { program } if program == "definitely-not-show-coords")
            );
        }

        #[test]
        fn test_parses_report_and_cleans_scratch() {
            let bin = TempDir::new().unwrap();
            let work = TempDir::new().unwrap();
            // nucmer leaves <prefix>.delta behind; show-coords must be handed that file
            let nucmer = script(bin.path(), "fake-nucmer", r#"touch "$2.delta""#);
            let show_coords = script(
                bin.path(),
                "fake-show-coords",
                &format!(r#"test "$6" = "-I" && test "$7" = "75" && test -f "$8" || exit 4; {REPORT}"#),
            );
            let aligner = aligner(nucmer, show_coords, work.path());

            let query = Contig::new("q", "ACGT");
            let target = Contig::new("t", "ACGTACGT");
            let hits = aligner.align(&query, &[&target]).unwrap();

            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].query_name, "q");
            assert_eq!(hits[0].target_name, "t");
            assert!(hits[0].exceeds(95.0, 95.0));
            assert_eq!(fs::read_dir(work.path()).unwrap().count(), 0);
        }

        #[test]
        fn test_passes_query_before_reference() {
            let bin = TempDir::new().unwrap();
            let work = TempDir::new().unwrap();
            let nucmer = script(
                bin.path(),
                "fake-nucmer",
                r#"head -n1 "$3" >&2; head -n1 "$4" >&2; exit 2"#,
            );
            let show_coords = script(bin.path(), "fake-show-coords", REPORT);
            let aligner = aligner(nucmer, show_coords, work.path());

            let query = Contig::new("q", "ACGT");
            let target = Contig::new("t", "ACGTACGT");
            match aligner.align(&query, &[&target]).unwrap_err() {
                AlignError::Invocation { stderr, .. } => assert_eq!(stderr, ">q\n>t"),
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(fs::read_dir(work.path()).unwrap().count(), 0);
        }

        #[test]
        fn test_garbage_report_is_an_error() {
            let bin = TempDir::new().unwrap();
            let work = TempDir::new().unwrap();
            let nucmer = script(bin.path(), "fake-nucmer", "exit 0");
            let show_coords = script(
                bin.path(),
                "fake-show-coords",
                "printf 'a\\nb\\n\\nc\\nnot a coords row\\n'",
            );
            let aligner = aligner(nucmer, show_coords, work.path());

            let query = Contig::new("q", "ACGT");
            let target = Contig::new("t", "ACGT");
            let err = aligner.align(&query, &[&target]).unwrap_err();
            assert!(matches!(err, AlignError::MalformedOutput(_)));
        }
    }
}
