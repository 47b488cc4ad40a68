use std::convert::TryFrom;
use std::fmt;

use super::sample::Sample;
use crate::error::Error;
use crate::model::MetricName;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FamilyType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
}

impl TryFrom<&str> for FamilyType {
    type Error = Error;

    fn try_from(kind: &str) -> std::result::Result<Self, Error> {
        match kind {
            "counter" => Ok(FamilyType::Counter),
            "gauge" => Ok(FamilyType::Gauge),
            "histogram" => Ok(FamilyType::Histogram),
            "summary" => Ok(FamilyType::Summary),
            "untyped" => Ok(FamilyType::Untyped),
            _ => Err(Error::new(&format!("unknown metric type \"{}\"", kind))),
        }
    }
}

impl fmt::Display for FamilyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            FamilyType::Counter => "counter",
            FamilyType::Gauge => "gauge",
            FamilyType::Histogram => "histogram",
            FamilyType::Summary => "summary",
            FamilyType::Untyped => "untyped",
        };
        write!(f, "{}", kind)
    }
}

/// A named group of samples sharing a declared type. The type is fixed once
/// the family is materialized from input; samples keep their order of
/// appearance. A family with zero samples is legal.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricFamily {
    name: MetricName,
    family_type: FamilyType,
    help: Option<String>,
    samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn new(
        name: MetricName,
        family_type: FamilyType,
        help: Option<String>,
        samples: Vec<Sample>,
    ) -> Self {
        Self {
            name,
            family_type,
            help,
            samples,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn family_type(&self) -> FamilyType {
        self.family_type
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_type_from_str() {
        assert_eq!(FamilyType::try_from("counter").unwrap(), FamilyType::Counter);
        assert_eq!(FamilyType::try_from("untyped").unwrap(), FamilyType::Untyped);
        assert!(FamilyType::try_from("gaugehistogram").is_err());
    }
}
