use std::collections::HashMap;

use serde::Serialize;

use crate::core::assembly::{Assembly, AssemblyStats};
use crate::core::types::Classification;
use crate::dedup::engine::{DedupConfig, DedupOutcome};

/// A contig removed as a duplicate, with the hit that condemned it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateRecord {
    pub name: String,
    pub length: usize,
    pub target: String,
    pub percent_identity: f64,
    pub percent_coverage: f64,
}

/// Counts and statistics reported at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupSummary {
    pub input: AssemblyStats,
    pub output: AssemblyStats,
    pub min_length: usize,
    /// Input contigs at least `min_length` long
    pub passing_length: usize,
    pub exhaustive: bool,
    pub length_bound: usize,
    /// Contigs aligned against a non-empty reference set
    pub checked: usize,
    pub too_short: usize,
    pub duplicated: usize,
    pub written: usize,
    pub duplicates: Vec<DuplicateRecord>,
}

impl DedupSummary {
    #[must_use]
    pub fn new(input: &Assembly, outcome: &DedupOutcome, config: &DedupConfig) -> Self {
        let calls = &outcome.classifications;
        let lengths: HashMap<&str, usize> = input
            .contigs
            .iter()
            .map(|c| (c.name.as_str(), c.length()))
            .collect();

        let duplicates = calls
            .iter()
            .filter_map(|(name, class)| match class {
                Classification::Redundant {
                    target,
                    percent_identity,
                    percent_coverage,
                } => Some(DuplicateRecord {
                    name: name.to_string(),
                    length: lengths.get(name).copied().unwrap_or_default(),
                    target: target.clone(),
                    percent_identity: *percent_identity,
                    percent_coverage: *percent_coverage,
                }),
                _ => None,
            })
            .collect::<Vec<_>>();

        let too_short = calls.too_short_names().len();

        Self {
            input: input.stats(),
            output: outcome.cleaned.stats(),
            min_length: config.min_length,
            passing_length: input.len() - too_short,
            exhaustive: config.exhaustive,
            length_bound: outcome.length_bound,
            checked: calls.aligned_count(),
            too_short,
            duplicated: duplicates.len(),
            written: outcome.cleaned.len(),
            duplicates,
        }
    }

    /// One-line summary matching the log output
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "{} input contigs; {} larger than {} bp; {} duplicated; {} written to file",
            self.input.num_contigs,
            self.passing_length,
            self.min_length,
            self.duplicated,
            self.written
        )
    }
}
