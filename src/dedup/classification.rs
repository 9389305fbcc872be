use std::collections::HashMap;

use crate::core::types::Classification;

/// Per-contig calls made during one deduplication run.
///
/// Calls are append-only: once a contig is classified it is never revisited.
/// Contigs found unique by alignment also join the reference pool, which
/// exhaustive mode offers as extra alignment targets to later queries.
#[derive(Debug, Clone, Default)]
pub struct ClassificationSet {
    /// Calls in decision order
    calls: Vec<(String, Classification)>,
    /// Contig name -> position in `calls`
    index: HashMap<String, usize>,
    /// Contigs retained after alignment, in decision order
    reference_pool: Vec<String>,
}

impl ClassificationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call. Returns `false` and leaves the existing call untouched if
    /// the contig was already classified.
    pub fn record(&mut self, name: &str, classification: Classification) -> bool {
        if self.index.contains_key(name) {
            return false;
        }

        if matches!(
            classification,
            Classification::Unique | Classification::NoReferences
        ) {
            self.reference_pool.push(name.to_string());
        }

        self.index.insert(name.to_string(), self.calls.len());
        self.calls.push((name.to_string(), classification));
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Classification> {
        self.index.get(name).map(|&i| &self.calls[i].1)
    }

    #[must_use]
    pub fn is_classified(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls in decision order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Classification)> {
        self.calls.iter().map(|(name, class)| (name.as_str(), class))
    }

    /// Contigs found unique by (possibly vacuous) alignment
    #[must_use]
    pub fn reference_pool(&self) -> &[String] {
        &self.reference_pool
    }

    fn names_where(&self, pred: impl Fn(&Classification) -> bool) -> Vec<&str> {
        self.iter()
            .filter(|(_, class)| pred(class))
            .map(|(name, _)| name)
            .collect()
    }

    /// Contigs dropped as duplicates of a larger contig
    #[must_use]
    pub fn redundant_names(&self) -> Vec<&str> {
        self.names_where(|c| matches!(c, Classification::Redundant { .. }))
    }

    /// Contigs dropped for being shorter than the minimum length
    #[must_use]
    pub fn too_short_names(&self) -> Vec<&str> {
        self.names_where(|c| matches!(c, Classification::TooShort))
    }

    /// Contigs written to the cleaned assembly
    #[must_use]
    pub fn retained_names(&self) -> Vec<&str> {
        self.names_where(Classification::is_retained)
    }

    /// Contigs dropped for any reason
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.calls.iter().filter(|(_, c)| !c.is_retained()).count()
    }

    /// Contigs aligned against a non-empty reference set
    #[must_use]
    pub fn aligned_count(&self) -> usize {
        self.iter()
            .filter(|(_, c)| matches!(c, Classification::Unique | Classification::Redundant { .. }))
            .count()
    }
}
