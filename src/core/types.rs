use serde::{Deserialize, Serialize};

/// Convert a base count to f64 for percentage math
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// One alignment reported by the external aligner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentHit {
    pub query_name: String,
    pub query_length: u64,
    pub target_name: String,
    pub target_length: u64,
    /// Number of matching bases in the alignment
    pub matches: u64,
    /// Alignment block length, including mismatches and gaps
    pub alignment_length: u64,
}

impl AlignmentHit {
    /// `matches / alignment_length * 100`, or 0 for an empty alignment
    #[must_use]
    pub fn percent_identity(&self) -> f64 {
        if self.alignment_length == 0 {
            return 0.0;
        }
        count_to_f64(self.matches) / count_to_f64(self.alignment_length) * 100.0
    }

    /// `alignment_length / query_length * 100`, or 0 for an empty query
    #[must_use]
    pub fn percent_coverage(&self) -> f64 {
        if self.query_length == 0 {
            return 0.0;
        }
        count_to_f64(self.alignment_length) / count_to_f64(self.query_length) * 100.0
    }

    /// Both metrics must strictly exceed their thresholds
    #[must_use]
    pub fn exceeds(&self, percent_identity: f64, percent_coverage: f64) -> bool {
        self.percent_identity() > percent_identity && self.percent_coverage() > percent_coverage
    }
}

/// Final classification of a contig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    /// Shorter than the minimum length; removed without alignment
    TooShort,
    /// Contained in a larger contig; removed
    Redundant {
        target: String,
        percent_identity: f64,
        percent_coverage: f64,
    },
    /// Checked against its references and found unique
    Unique,
    /// Checked vacuously: there was nothing left to align against
    NoReferences,
    /// Longer than N50 in the default mode; kept without alignment
    AboveN50,
}

impl Classification {
    /// Whether the contig is written to the cleaned assembly
    #[must_use]
    pub fn is_retained(&self) -> bool {
        matches!(self, Self::Unique | Self::NoReferences | Self::AboveN50)
    }
}
