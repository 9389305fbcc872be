use serde::{Deserialize, Serialize};

/// A single contig/scaffold from an assembly FASTA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    /// Record identifier (first word of the FASTA definition line)
    pub name: String,

    /// Residues, as read from the input with line breaks removed
    #[serde(skip)]
    pub sequence: Vec<u8>,
}

impl Contig {
    pub fn new(name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    /// Sequence length in bases
    #[must_use]
    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Check whether the contig is shorter than `min_length`
    #[must_use]
    pub fn is_shorter_than(&self, min_length: usize) -> bool {
        self.length() < min_length
    }
}
