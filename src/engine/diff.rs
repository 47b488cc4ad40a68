use std::collections::BTreeSet;

use crate::dump::MetricsDump;
use crate::model::{MetricName, SampleId};

/// The semantic difference between two dumps. All collections are sets, so
/// the result is deterministic and compared as sets, never as sequences.
#[derive(Debug, PartialEq, Eq)]
pub struct DiffResult {
    added_families: BTreeSet<MetricName>,
    removed_families: BTreeSet<MetricName>,
    added_samples: BTreeSet<SampleId>,
    removed_samples: BTreeSet<SampleId>,
}

impl DiffResult {
    pub fn added_families(&self) -> &BTreeSet<MetricName> {
        &self.added_families
    }

    pub fn removed_families(&self) -> &BTreeSet<MetricName> {
        &self.removed_families
    }

    pub fn added_samples(&self) -> &BTreeSet<SampleId> {
        &self.added_samples
    }

    pub fn removed_samples(&self) -> &BTreeSet<SampleId> {
        &self.removed_samples
    }

    pub fn is_empty(&self) -> bool {
        self.added_families.is_empty()
            && self.removed_families.is_empty()
            && self.added_samples.is_empty()
            && self.removed_samples.is_empty()
    }
}

pub fn diff(from: &MetricsDump, to: &MetricsDump) -> DiffResult {
    let from_names: BTreeSet<&MetricName> = from.families().iter().map(|f| f.name()).collect();
    let to_names: BTreeSet<&MetricName> = to.families().iter().map(|f| f.name()).collect();

    let added_families: BTreeSet<MetricName> = to_names
        .difference(&from_names)
        .map(|name| (*name).clone())
        .collect();
    let removed_families: BTreeSet<MetricName> = from_names
        .difference(&to_names)
        .map(|name| (*name).clone())
        .collect();

    // Samples of a wholly added/removed family are reported via the family
    // sets only, so the sample walk skips those families.
    let added_samples = sample_difference(to, from, &added_families);
    let removed_samples = sample_difference(from, to, &removed_families);

    DiffResult {
        added_families,
        removed_families,
        added_samples,
        removed_samples,
    }
}

// Identities present in `dump` but not in `other`, skipping families whose
// name is in `wholly_changed`.
fn sample_difference(
    dump: &MetricsDump,
    other: &MetricsDump,
    wholly_changed: &BTreeSet<MetricName>,
) -> BTreeSet<SampleId> {
    let other_ids: BTreeSet<SampleId> = other
        .families()
        .iter()
        .flat_map(|f| f.samples())
        .map(|s| s.id())
        .collect();

    let mut difference = BTreeSet::new();
    for family in dump.families() {
        if wholly_changed.contains(family.name()) {
            continue;
        }
        for sample in family.samples() {
            let id = sample.id();
            if !other_ids.contains(&id) {
                difference.insert(id);
            }
        }
    }
    difference
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(text: &str) -> MetricsDump {
        text.parse().unwrap()
    }

    #[test]
    fn test_diff_with_self_is_empty() {
        let a = dump("# TYPE foo counter\nfoo{x=\"1\"} 1 0\nbar 2");
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn test_value_changes_are_not_reported() {
        let a = dump(r#"foo{hello="world"} 0 0"#);
        let b = dump(r#"foo{hello="world"} 42 1234"#);

        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn test_added_and_removed_samples() {
        let a = dump("foo{x=\"1\"} 0\nfoo{x=\"2\"} 0");
        let b = dump("foo{x=\"2\"} 0\nfoo{x=\"3\"} 0");

        let result = diff(&a, &b);

        assert!(result.added_families().is_empty());
        assert!(result.removed_families().is_empty());
        assert_eq!(result.added_samples().len(), 1);
        assert_eq!(result.removed_samples().len(), 1);
        assert!(result
            .added_samples()
            .iter()
            .all(|id| id.labels() == [("x".to_string(), "3".to_string())]));
        assert!(result
            .removed_samples()
            .iter()
            .all(|id| id.labels() == [("x".to_string(), "1".to_string())]));
    }

    #[test]
    fn test_wholly_added_family_reported_once() {
        let a = dump(r#"foo{hello="world"} 0 0"#);
        let b = dump("foo{hello=\"world\"} 0 0\nbar{x=\"1\"} 0 0");

        let result = diff(&a, &b);

        assert_eq!(
            result
                .added_families()
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>(),
            vec!["bar"]
        );
        assert!(result.added_samples().is_empty());
    }

    #[test]
    fn test_anti_symmetry() {
        let a = dump("foo{x=\"1\"} 0\nbar 1");
        let b = dump("foo{x=\"1\"} 0\nfoo{x=\"2\"} 0\nqux 2");

        let ab = diff(&a, &b);
        let ba = diff(&b, &a);

        assert_eq!(ab.added_families(), ba.removed_families());
        assert_eq!(ab.removed_families(), ba.added_families());
        assert_eq!(ab.added_samples(), ba.removed_samples());
        assert_eq!(ab.removed_samples(), ba.added_samples());
    }
}
