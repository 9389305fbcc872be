//! FASTA input and output using noodles.
//!
//! Assemblies are read fully into memory; line breaks and any other
//! whitespace inside a sequence body are dropped. Input ending in `.gz` or
//! `.bgz` is decompressed on the fly.
//!
//! Output files are written to a temporary file next to the target and
//! renamed into place once complete, so a failed write never leaves a partial
//! FASTA behind.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tempfile::NamedTempFile;

use crate::core::assembly::Assembly;
use crate::core::contig::Contig;
use crate::parsing::ParseError;
use crate::utils::validation::validate_line_width;

/// Default number of bases per output line
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read every record of a FASTA file into an [`Assembly`].
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::DuplicateName` if two records share an identifier.
pub fn read_assembly(path: &Path) -> Result<Assembly, ParseError> {
    let file = File::open(path)?;
    let assembly = if is_gzipped(path) {
        read_assembly_from(BufReader::new(MultiGzDecoder::new(file)))?
    } else {
        read_assembly_from(BufReader::new(file))?
    };

    Ok(assembly.with_source(path.display().to_string()))
}

/// Read an assembly from any buffered FASTA stream.
///
/// # Errors
///
/// See [`read_assembly`].
pub fn read_assembly_from<R: BufRead>(inner: R) -> Result<Assembly, ParseError> {
    let mut reader = fasta::io::Reader::new(inner);
    let mut contigs = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        if !seen.insert(name.clone()) {
            return Err(ParseError::DuplicateName(name));
        }

        let sequence: Vec<u8> = record
            .sequence()
            .as_ref()
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        contigs.push(Contig::new(name, sequence));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(Assembly::new(contigs))
}

/// Write an assembly to `path`, wrapping sequence lines at `line_width` bases.
///
/// The target only appears once every record has been written.
///
/// # Errors
///
/// Returns `ParseError::InvalidParameter` for a zero line width, or
/// `ParseError::Io` if the file cannot be created, written or moved into place.
pub fn write_assembly(
    path: &Path,
    assembly: &Assembly,
    line_width: usize,
) -> Result<(), ParseError> {
    validate_line_width(line_width)?;
    write_atomically(path, |out| {
        write_contigs(out, assembly.contigs.iter(), line_width)
    })
}

/// Run `write` against a temporary file in the target directory and rename it
/// to `path` on success. On error the temporary file is removed and `path` is
/// left untouched.
fn write_atomically<F>(path: &Path, write: F) -> Result<(), ParseError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), ParseError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;

    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| ParseError::Io(e.error))?;
    Ok(())
}

/// Serialize contigs as FASTA to any writer.
///
/// # Errors
///
/// Returns `ParseError::InvalidParameter` for a zero line width, or
/// `ParseError::Io` on write failure.
pub fn write_contigs<'a, W, I>(inner: W, contigs: I, line_width: usize) -> Result<(), ParseError>
where
    W: Write,
    I: IntoIterator<Item = &'a Contig>,
{
    let line_width = validate_line_width(line_width)?;
    let mut writer = fasta::io::writer::Builder::default()
        .set_line_base_count(line_width)
        .build_from_writer(inner);

    for contig in contigs {
        let definition = fasta::record::Definition::new(contig.name.as_bytes().to_vec(), None);
        let sequence = fasta::record::Sequence::from(contig.sequence.clone());
        writer.write_record(&fasta::Record::new(definition, sequence))?;
    }

    Ok(())
}
