use std::collections::HashSet;

use tracing::{debug, info};

use crate::align::Aligner;
use crate::core::assembly::Assembly;
use crate::core::contig::Contig;
use crate::core::types::{AlignmentHit, Classification};
use crate::dedup::summary::DedupSummary;
use crate::dedup::{ClassificationSet, DedupError};
use crate::utils::validation::{validate_percent, ValidationError};

/// Default minimum contig length
pub const DEFAULT_MIN_LENGTH: usize = 500;

/// Default identity threshold (percent)
pub const DEFAULT_PERCENT_IDENTITY: f64 = 95.0;

/// Default coverage threshold (percent)
pub const DEFAULT_PERCENT_COVERAGE: f64 = 95.0;

/// Configuration for the deduplicator
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DedupConfig {
    /// Contigs shorter than this are dropped without alignment
    pub min_length: usize,
    /// A hit must exceed this identity to mark the query redundant
    pub percent_identity: f64,
    /// A hit must exceed this query coverage to mark the query redundant
    pub percent_coverage: f64,
    /// Check every contig instead of stopping above N50
    pub exhaustive: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            percent_identity: DEFAULT_PERCENT_IDENTITY,
            percent_coverage: DEFAULT_PERCENT_COVERAGE,
            exhaustive: false,
        }
    }
}

impl DedupConfig {
    /// Check thresholds are in `(0, 100]`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::PercentOutOfRange` for the first bad threshold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_percent("percent identity", self.percent_identity)?;
        validate_percent("percent coverage", self.percent_coverage)?;
        Ok(())
    }
}

/// Result of a deduplication run
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Retained contigs, in input order
    pub cleaned: Assembly,
    /// Call made for every input contig
    pub classifications: ClassificationSet,
    /// N50 of the input assembly
    pub n50: usize,
    /// Longest length still checked (N50, or the longest contig when exhaustive)
    pub length_bound: usize,
}

impl DedupOutcome {
    #[must_use]
    pub fn summary(&self, input: &Assembly, config: &DedupConfig) -> DedupSummary {
        DedupSummary::new(input, self, config)
    }
}

/// Size-ordered duplicate-contig remover
pub struct Deduplicator<A> {
    aligner: A,
    config: DedupConfig,
}

impl<A: Aligner> Deduplicator<A> {
    pub fn new(aligner: A, config: DedupConfig) -> Self {
        Self { aligner, config }
    }

    #[must_use]
    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Classify every contig and build the cleaned assembly.
    ///
    /// The loop is strictly sequential: which contigs a query is aligned
    /// against depends on every call made before it.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::InvalidParameter` for out-of-range thresholds,
    /// `DedupError::EmptyAssembly` for an empty input, and
    /// `DedupError::Alignment` as soon as any aligner call fails.
    pub fn run(&self, assembly: &Assembly) -> Result<DedupOutcome, DedupError> {
        self.config.validate()?;
        if assembly.is_empty() {
            return Err(DedupError::EmptyAssembly);
        }

        let stats = assembly.stats();
        let n50 = stats.n50;
        let length_bound = if self.config.exhaustive {
            stats.longest
        } else {
            n50
        };

        info!(
            "Assembly is {} contigs; {} bp; and N50 is {} bp",
            stats.num_contigs, stats.total_length, n50
        );
        info!("Looping through assembly shortest --> longest searching for duplicated contigs");

        let rank = assembly.size_rank();
        let mut calls = ClassificationSet::new();

        for (pos, &idx) in rank.iter().enumerate() {
            let contig = &assembly.contigs[idx];
            debug!(
                "Working on {} len={} remove_tally={}",
                contig.name,
                contig.length(),
                calls.removed_count()
            );

            if contig.is_shorter_than(self.config.min_length) {
                calls.record(&contig.name, Classification::TooShort);
                continue;
            }

            if contig.length() > length_bound {
                // Everything from here on is at least as long: keep it unchecked
                for &rest in &rank[pos..] {
                    calls.record(&assembly.contigs[rest].name, Classification::AboveN50);
                }
                break;
            }

            let references = self.reference_set(assembly, &rank[pos + 1..], &calls);
            if references.is_empty() {
                debug!("{} has no contigs left to align against", contig.name);
                calls.record(&contig.name, Classification::NoReferences);
                continue;
            }

            let hits = self.aligner.align(contig, &references)?;
            let classification = match self.first_qualifying_hit(&hits) {
                Some(hit) => {
                    info!(
                        "{} duplicated: {:.0}% identity over {:.0}% of the contig. length={}",
                        contig.name,
                        hit.percent_identity(),
                        hit.percent_coverage(),
                        hit.query_length
                    );
                    Classification::Redundant {
                        target: hit.target_name.clone(),
                        percent_identity: hit.percent_identity(),
                        percent_coverage: hit.percent_coverage(),
                    }
                }
                None => Classification::Unique,
            };
            calls.record(&contig.name, classification);
        }

        let keep: HashSet<&str> = calls.retained_names().into_iter().collect();
        let cleaned = assembly.retain_names(&keep);

        info!(
            "{} duplicated; {} shorter than {} bp; {} retained",
            calls.redundant_names().len(),
            calls.too_short_names().len(),
            self.config.min_length,
            cleaned.len()
        );

        Ok(DedupOutcome {
            cleaned,
            classifications: calls,
            n50,
            length_bound,
        })
    }

    /// Contigs the query at the current rank position is aligned against, in
    /// input order.
    ///
    /// Always the not-yet-visited contigs (`remaining`); in exhaustive mode also
    /// every earlier contig already found unique. Contigs kept by the N50 early
    /// stop are never part of a reference set because nothing is checked after
    /// the stop.
    fn reference_set<'a>(
        &self,
        assembly: &'a Assembly,
        remaining: &[usize],
        calls: &ClassificationSet,
    ) -> Vec<&'a Contig> {
        let mut indices: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| !calls.is_classified(&assembly.contigs[i].name))
            .collect();

        if self.config.exhaustive {
            let pool: HashSet<&str> = calls.reference_pool().iter().map(String::as_str).collect();
            indices.extend(
                assembly
                    .contigs
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| pool.contains(c.name.as_str()))
                    .map(|(i, _)| i),
            );
        }

        indices.sort_unstable();
        indices.dedup();
        indices.into_iter().map(|i| &assembly.contigs[i]).collect()
    }

    /// First hit passing both thresholds; later hits are not examined
    fn first_qualifying_hit<'h>(&self, hits: &'h [AlignmentHit]) -> Option<&'h AlignmentHit> {
        hits.iter().find(|hit| {
            debug!(
                "\tquery={} hit={} pident={:.2} coverage={:.2}",
                hit.query_name,
                hit.target_name,
                hit.percent_identity(),
                hit.percent_coverage()
            );
            hit.exceeds(self.config.percent_identity, self.config.percent_coverage)
        })
    }
}

/// Convenience wrapper around [`Deduplicator::run`].
///
/// # Errors
///
/// See [`Deduplicator::run`].
pub fn deduplicate<A: Aligner>(
    assembly: &Assembly,
    config: DedupConfig,
    aligner: A,
) -> Result<DedupOutcome, DedupError> {
    Deduplicator::new(aligner, config).run(assembly)
}
