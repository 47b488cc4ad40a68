use std::collections::BTreeMap;

use serde::Serialize;
use serde_json;

use super::formatter::Formatter;
use crate::dump::MetricsDump;
use crate::engine::{DiffResult, ValidationResult};
use crate::error::Result;
use crate::model::{Labels, MetricFamily, Sample, Timestamp};

#[derive(Serialize)]
struct SampleRepr<'a> {
    name: &'a str,
    labels: &'a Labels,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
}

impl<'a> SampleRepr<'a> {
    fn new(sample: &'a Sample) -> Self {
        Self {
            name: sample.name(),
            labels: sample.labels(),
            value: sample.value(),
            timestamp: sample.timestamp(),
        }
    }
}

#[derive(Serialize)]
struct FamilyRepr<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    family_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
    samples: Vec<SampleRepr<'a>>,
}

impl<'a> FamilyRepr<'a> {
    fn new(family: &'a MetricFamily) -> Self {
        Self {
            name: family.name(),
            family_type: family.family_type().to_string(),
            help: family.help(),
            samples: family.samples().iter().map(SampleRepr::new).collect(),
        }
    }
}

#[derive(Serialize)]
struct DumpRepr<'a> {
    source: String,
    families: Vec<FamilyRepr<'a>>,
}

#[derive(Serialize)]
struct ValidationRepr<'a> {
    source: String,
    duplicate_families: BTreeMap<&'a str, Vec<FamilyRepr<'a>>>,
    duplicate_samples: Vec<String>,
}

#[derive(Serialize)]
struct DiffRepr<'a> {
    added_families: Vec<&'a str>,
    removed_families: Vec<&'a str>,
    added_samples: Vec<String>,
    removed_samples: Vec<String>,
}

pub struct JSONFormatter;

impl JSONFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JSONFormatter {
    fn format_dump(&self, dump: &MetricsDump) -> Result<Vec<u8>> {
        serde_json::to_vec(&DumpRepr {
            source: dump.source().to_string(),
            families: dump.families().iter().map(FamilyRepr::new).collect(),
        })
        .map_err(|e| ("JSON serialization failed", e).into())
    }

    fn format_validation(
        &self,
        dump: &MetricsDump,
        result: &ValidationResult<'_>,
    ) -> Result<Vec<u8>> {
        serde_json::to_vec(&ValidationRepr {
            source: dump.source().to_string(),
            duplicate_families: result
                .duplicate_families()
                .iter()
                .map(|(name, entries)| {
                    (
                        name.as_str(),
                        entries.iter().map(|family| FamilyRepr::new(*family)).collect(),
                    )
                })
                .collect(),
            duplicate_samples: result
                .duplicate_samples()
                .iter()
                .map(|id| id.to_string())
                .collect(),
        })
        .map_err(|e| ("JSON serialization failed", e).into())
    }

    fn format_diff(&self, result: &DiffResult) -> Result<Vec<u8>> {
        serde_json::to_vec(&DiffRepr {
            added_families: result
                .added_families()
                .iter()
                .map(|name| name.as_str())
                .collect(),
            removed_families: result
                .removed_families()
                .iter()
                .map(|name| name.as_str())
                .collect(),
            added_samples: result
                .added_samples()
                .iter()
                .map(|id| id.to_string())
                .collect(),
            removed_samples: result
                .removed_samples()
                .iter()
                .map(|id| id.to_string())
                .collect(),
        })
        .map_err(|e| ("JSON serialization failed", e).into())
    }
}
