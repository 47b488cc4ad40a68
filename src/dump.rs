use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json;

use crate::engine::{diff, validate, DiffResult, ValidationResult};
use crate::error::{Error, Result};
use crate::model::MetricFamily;
use crate::parser::parse_dump;

/// Where a dump came from: a file on disk or an in-memory string.
#[derive(Clone, Debug, PartialEq)]
pub enum DumpSource {
    File(PathBuf),
    Memory,
}

impl fmt::Display for DumpSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DumpSource::File(path) => write!(f, "{}", path.display()),
            DumpSource::Memory => write!(f, "<memory>"),
        }
    }
}

/// A parsed snapshot of one exposition-format text source. Families keep the
/// order of first appearance; the dump is never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsDump {
    source: DumpSource,
    families: Vec<MetricFamily>,
}

impl MetricsDump {
    /// Reads and parses an exposition-format file. A `.json` extension
    /// selects the structured input path: a JSON document whose root must be
    /// a sequence of strings, one exposition line per element.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::from((format!("couldn't read {}", path.display()), e)))?;

        let families = if path.extension().map_or(false, |ext| ext == "json") {
            parse_dump(json_lines(&text)?)?
        } else {
            parse_dump(text.lines())?
        };

        Ok(Self {
            source: DumpSource::File(path.to_path_buf()),
            families,
        })
    }

    /// Parses a JSON document whose root must be a sequence of strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self {
            source: DumpSource::Memory,
            families: parse_dump(json_lines(json)?)?,
        })
    }

    /// Parses an already-split sequence of exposition-format lines.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            source: DumpSource::Memory,
            families: parse_dump(lines)?,
        })
    }

    pub fn source(&self) -> &DumpSource {
        &self.source
    }

    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    /// Checks this dump for internal consistency: duplicate families and
    /// duplicate samples.
    pub fn validate(&self) -> ValidationResult<'_> {
        validate(self)
    }

    /// Computes what changed between this dump and `other`: `self` is the
    /// "from" side, `other` the "to" side.
    pub fn diff(&self, other: &MetricsDump) -> DiffResult {
        diff(self, other)
    }
}

impl FromStr for MetricsDump {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_lines(s.lines())
    }
}

fn json_lines(json: &str) -> Result<Vec<String>> {
    let root: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::from(("couldn't parse the structured dump input", e)))?;

    let items = match root {
        serde_json::Value::Array(items) => items,
        _ => {
            return Err(Error::new(
                "the root of a structured dump input must be a sequence of strings",
            ))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Ok(s),
            _ => Err(Error::new(
                "the root of a structured dump input must be a sequence of strings",
            )),
        })
        .collect()
}
