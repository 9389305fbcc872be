//! Parser for PAF (Pairwise mApping Format) output from minimap2.
//!
//! Only the columns needed to judge containment are kept:
//!
//! ```text
//! Col  Type    Description
//! 1    string  Query sequence name
//! 2    int     Query sequence length
//! 6    string  Target sequence name
//! 7    int     Target sequence length
//! 10   int     Number of matching bases
//! 11   int     Alignment block length
//! ```
//!
//! Lines must still carry all 12 mandatory columns; optional SAM-style tags
//! after column 12 are ignored.

use std::io::BufRead;

use crate::core::types::AlignmentHit;
use crate::parsing::ParseError;

/// Number of mandatory PAF columns
pub const PAF_MANDATORY_FIELDS: usize = 12;

/// Parse one PAF line. `line_number` is 1-based and only used for errors.
///
/// # Errors
///
/// Returns `ParseError::InvalidPaf` if the line has fewer than 12 fields or a
/// numeric column does not parse.
pub fn parse_paf_line(line: &str, line_number: usize) -> Result<AlignmentHit, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < PAF_MANDATORY_FIELDS {
        return Err(ParseError::InvalidPaf {
            line: line_number,
            reason: format!(
                "expected at least {PAF_MANDATORY_FIELDS} fields, found {}",
                fields.len()
            ),
        });
    }

    let number = |idx: usize, what: &str| -> Result<u64, ParseError> {
        fields[idx].trim().parse().map_err(|_| ParseError::InvalidPaf {
            line: line_number,
            reason: format!("invalid {what}: '{}'", fields[idx]),
        })
    };

    Ok(AlignmentHit {
        query_name: fields[0].to_string(),
        query_length: number(1, "query length")?,
        target_name: fields[5].to_string(),
        target_length: number(6, "target length")?,
        matches: number(9, "matching bases")?,
        alignment_length: number(10, "alignment block length")?,
    })
}

/// Parse all non-empty lines of a PAF stream
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure or `ParseError::InvalidPaf` for the
/// first malformed line.
pub fn parse_paf<R: BufRead>(reader: R) -> Result<Vec<AlignmentHit>, ParseError> {
    let mut hits = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        hits.push(parse_paf_line(line, idx + 1)?);
    }

    Ok(hits)
}
