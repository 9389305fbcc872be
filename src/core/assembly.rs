//! Assembly container and summary statistics.
//!
//! An [`Assembly`] is the ordered list of contigs loaded from one FASTA file.
//! It is never mutated once loaded; filtering produces a new assembly via
//! [`Assembly::retain_names`].
//!
//! The N50 used here is the length-weighted median: every contig length is
//! counted once per base it contributes, and the median of that multiset is
//! taken. For an even number of bases the two middle values are averaged
//! (integer division).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::contig::Contig;

/// Ordered collection of contigs from a single FASTA file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Source file path (if known)
    pub source: Option<String>,

    /// Contigs in input order
    pub contigs: Vec<Contig>,
}

impl Assembly {
    #[must_use]
    pub fn new(contigs: Vec<Contig>) -> Self {
        Self {
            source: None,
            contigs,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    /// Contig lengths in input order
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.contigs.iter().map(Contig::length).collect()
    }

    /// Total number of bases
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.length() as u64).sum()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Contig> {
        self.contigs.iter().find(|c| c.name == name)
    }

    /// Indices of contigs sorted by ascending length.
    ///
    /// The sort is stable, so equal-length contigs keep their input order.
    #[must_use]
    pub fn size_rank(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.contigs.len()).collect();
        order.sort_by_key(|&i| self.contigs[i].length());
        order
    }

    /// Build a new assembly holding only the named contigs, in input order
    #[must_use]
    pub fn retain_names(&self, keep: &HashSet<&str>) -> Self {
        Self {
            source: self.source.clone(),
            contigs: self
                .contigs
                .iter()
                .filter(|c| keep.contains(c.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> AssemblyStats {
        AssemblyStats::from_lengths(&self.lengths())
    }
}

/// Summary statistics reported before and after cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    pub num_contigs: usize,
    pub total_length: u64,
    pub n50: usize,
    pub shortest: usize,
    pub longest: usize,
}

impl AssemblyStats {
    #[must_use]
    pub fn from_lengths(lengths: &[usize]) -> Self {
        Self {
            num_contigs: lengths.len(),
            total_length: lengths.iter().map(|&l| l as u64).sum(),
            n50: n50(lengths),
            shortest: lengths.iter().copied().min().unwrap_or(0),
            longest: lengths.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Compute the length-weighted median (N50) of a set of contig lengths.
///
/// Equivalent to expanding each length `l` into `l` copies, sorting, and
/// taking the median, but without materializing the expanded list.
/// Returns 0 for an empty set or a set of zero-length contigs.
#[must_use]
pub fn n50(lengths: &[usize]) -> usize {
    let mut sorted: Vec<usize> = lengths.iter().copied().filter(|&l| l > 0).collect();
    sorted.sort_unstable();

    let total: u64 = sorted.iter().map(|&l| l as u64).sum();
    if total == 0 {
        return 0;
    }

    let mid = total / 2;
    if total % 2 == 0 {
        (weighted_value_at(&sorted, mid - 1) + weighted_value_at(&sorted, mid)) / 2
    } else {
        weighted_value_at(&sorted, mid)
    }
}

/// Value at position `pos` of the expanded (length-weighted) multiset
fn weighted_value_at(sorted: &[usize], pos: u64) -> usize {
    let mut cumulative = 0u64;
    for &length in sorted {
        cumulative += length as u64;
        if pos < cumulative {
            return length;
        }
    }
    sorted.last().copied().unwrap_or(0)
}
