use std::fmt;

use super::labels::{LabelName, LabelValue, Labels, LabelsTrait};
use super::timestamp::Timestamp;
use crate::model::MetricName;

pub type SampleValue = f64;

/// One observed data point: a metric name, a label set, a value, and an
/// optional timestamp (milliseconds).
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    name: MetricName,
    labels: Labels,
    value: SampleValue,
    timestamp: Option<Timestamp>,
}

impl Sample {
    pub fn new(
        name: MetricName,
        labels: Labels,
        value: SampleValue,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self {
            name,
            labels,
            value,
            timestamp,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// The comparison identity of this sample: (name, label set). Two samples
    /// with the same identity are the same series regardless of value or
    /// timestamp.
    pub fn id(&self) -> SampleId {
        SampleId {
            name: self.name.clone(),
            labels: self.labels.to_pairs(),
        }
    }
}

/// A sample identity: the metric name plus the label set as a sorted list of
/// key-value pairs.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleId {
    name: MetricName,
    labels: Vec<(LabelName, LabelValue)>,
}

impl SampleId {
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    pub fn labels(&self) -> &[(LabelName, LabelValue)] {
        &self.labels
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (i, (name, value)) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_id_ignores_value_and_timestamp() {
        let mut labels = Labels::new();
        labels.insert("hello".into(), "world".into());

        let a = Sample::new("foo".into(), labels.clone(), 1.0, Some(1000));
        let b = Sample::new("foo".into(), labels, 42.0, None);

        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_sample_id_display_is_sorted() {
        let mut labels = Labels::new();
        labels.insert("zeta".into(), "1".into());
        labels.insert("alpha".into(), "2".into());

        let sample = Sample::new("foo".into(), labels, 0.0, None);
        assert_eq!(sample.id().to_string(), r#"foo{alpha="2",zeta="1"}"#);
    }
}
