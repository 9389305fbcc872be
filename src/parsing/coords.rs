//! Parser for tab-delimited `show-coords -r -c -l -T` output from MUMmer.
//!
//! The query contig is passed to `nucmer` as its first (reference) sequence
//! file, so the `R` columns describe the query and the `Q` columns the target:
//!
//! ```text
//! Col  Header   Description
//! 5    [LEN 1]  Aligned length on the query
//! 7    [% IDY]  Percent identity of the alignment
//! 8    [LEN R]  Query contig length
//! 9    [LEN Q]  Target contig length
//! 10   [COV R]  Percent of the query covered
//! 12   tag      Query name
//! 13   tag      Target name
//! ```
//!
//! The first four lines (file names, program, blank, column headers) are
//! skipped.

use std::io::BufRead;

use crate::core::types::AlignmentHit;
use crate::parsing::ParseError;

/// Header lines preceding the first alignment row
pub const COORDS_HEADER_LINES: usize = 4;

/// Minimum columns of a `-c -l -T` row: coordinates, lengths, identity,
/// contig lengths, coverages and both tags
pub const COORDS_MIN_FIELDS: usize = 13;

/// Matching bases implied by an identity percentage over an aligned length
fn matches_from_identity(identity: f64, aligned: u64) -> u64 {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    {
        (identity * aligned as f64 / 100.0).round().max(0.0) as u64
    }
}

/// Parse one alignment row. `line_number` is 1-based and only used for errors.
///
/// Matching bases are rebuilt from `[% IDY]` so that the hit reports the same
/// identity and coverage `show-coords` printed.
///
/// # Errors
///
/// Returns `ParseError::InvalidCoords` if the row is too short or a numeric
/// column does not parse.
pub fn parse_coords_line(line: &str, line_number: usize) -> Result<AlignmentHit, ParseError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < COORDS_MIN_FIELDS {
        return Err(ParseError::InvalidCoords {
            line: line_number,
            reason: format!(
                "expected at least {COORDS_MIN_FIELDS} fields, found {}",
                fields.len()
            ),
        });
    }

    let invalid = |what: &str, idx: usize| ParseError::InvalidCoords {
        line: line_number,
        reason: format!("invalid {what}: '{}'", fields[idx]),
    };
    let count = |idx: usize, what: &str| -> Result<u64, ParseError> {
        fields[idx].parse().map_err(|_| invalid(what, idx))
    };

    let aligned = count(4, "aligned length")?;
    let identity: f64 = fields[6].parse().map_err(|_| invalid("percent identity", 6))?;

    Ok(AlignmentHit {
        query_name: fields[11].to_string(),
        query_length: count(7, "query length")?,
        target_name: fields[12].to_string(),
        target_length: count(8, "target length")?,
        matches: matches_from_identity(identity, aligned),
        alignment_length: aligned,
    })
}

/// Parse every alignment row of a `show-coords` report
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure or `ParseError::InvalidCoords` for
/// the first malformed row.
pub fn parse_coords<R: BufRead>(reader: R) -> Result<Vec<AlignmentHit>, ParseError> {
    let mut hits = Vec::new();

    for (idx, line) in reader.lines().enumerate().skip(COORDS_HEADER_LINES) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        hits.push(parse_coords_line(&line, idx + 1)?);
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "/tmp/q.fasta /tmp/r.fasta\nNUCMER\n\n\
        [S1]\t[E1]\t[S2]\t[E2]\t[LEN 1]\t[LEN 2]\t[% IDY]\t[LEN R]\t[LEN Q]\t[COV R]\t[COV Q]\t[TAGS]\n";
    const ROW: &str = "1\t400\t101\t500\t400\t400\t99.00\t400\t1000\t100.00\t40.00\tctgB\tctgA\t[CONTAINED]";

    #[test]
    fn test_parse_coords_line() {
        let hit = parse_coords_line(ROW, 5).unwrap();
        assert_eq!(hit.query_name, "ctgB");
        assert_eq!(hit.query_length, 400);
        assert_eq!(hit.target_name, "ctgA");
        assert_eq!(hit.target_length, 1000);
        assert_eq!(hit.matches, 396);
        assert!((hit.percent_identity() - 99.0).abs() < 1e-9);
        assert!((hit.percent_coverage() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_coverage() {
        let row = "1\t250\t1\t250\t250\t250\t100.00\t1000\t5000\t25.00\t5.00\tq\tt";
        let hit = parse_coords_line(row, 5).unwrap();
        assert!((hit.percent_coverage() - 25.0).abs() < 1e-9);
        assert!(!hit.exceeds(95.0, 95.0));
    }

    #[test]
    fn test_identity_at_threshold_does_not_exceed() {
        let row = "1\t1000\t1\t1000\t1000\t1000\t95.00\t1000\t2000\t100.00\t50.00\tq\tt";
        let hit = parse_coords_line(row, 5).unwrap();
        assert!(!hit.exceeds(95.0, 95.0));
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_coords_line("1\t400\t101", 7).unwrap_err();
        assert!(matches!(err, ParseError::InvalidCoords { line: 7, .. }));
    }

    #[test]
    fn test_bad_identity() {
        let row = ROW.replace("99.00", "high");
        let err = parse_coords_line(&row, 5).unwrap_err();
        assert!(err.to_string().contains("percent identity"));
    }

    #[test]
    fn test_parse_report_skips_header() {
        let text = format!("{HEADER}{ROW}\n\n{ROW}\n");
        let hits = parse_coords(text.as_bytes()).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_header_only_report_has_no_hits() {
        assert!(parse_coords(HEADER.as_bytes()).unwrap().is_empty());
    }
}
