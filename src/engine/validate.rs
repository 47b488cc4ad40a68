use std::collections::{BTreeMap, BTreeSet};

use crate::dump::MetricsDump;
use crate::model::{MetricFamily, MetricName, SampleId};

/// Structural anomalies found in a single dump. Purely derived from the dump
/// it borrows from; duplicates are data here, never errors.
#[derive(Debug)]
pub struct ValidationResult<'a> {
    duplicate_families: BTreeMap<MetricName, Vec<&'a MetricFamily>>,
    duplicate_samples: BTreeSet<SampleId>,
}

impl<'a> ValidationResult<'a> {
    /// Family names that appear more than once, with every entry sharing the
    /// name. Covers both a name declared under two types and a name that
    /// reappears in a disjoint block of the source.
    pub fn duplicate_families(&self) -> &BTreeMap<MetricName, Vec<&'a MetricFamily>> {
        &self.duplicate_families
    }

    /// Sample identities (name + label set) that occur more than once across
    /// the whole dump, irrespective of family grouping.
    pub fn duplicate_samples(&self) -> &BTreeSet<SampleId> {
        &self.duplicate_samples
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_families.is_empty() && self.duplicate_samples.is_empty()
    }
}

pub fn validate(dump: &MetricsDump) -> ValidationResult<'_> {
    // Explicit name-to-entries grouping, then keep the names with more than
    // one entry.
    let mut groups: BTreeMap<MetricName, Vec<&MetricFamily>> = BTreeMap::new();
    for family in dump.families() {
        groups.entry(family.name().clone()).or_default().push(family);
    }

    let duplicate_families = groups
        .into_iter()
        .filter(|(_, entries)| entries.len() > 1)
        .collect();

    // Count identities over the multiset of all samples; value and timestamp
    // never participate.
    let mut counts: BTreeMap<SampleId, usize> = BTreeMap::new();
    for family in dump.families() {
        for sample in family.samples() {
            *counts.entry(sample.id()).or_insert(0) += 1;
        }
    }

    let duplicate_samples = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect();

    ValidationResult {
        duplicate_families,
        duplicate_samples,
    }
}
