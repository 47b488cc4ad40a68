use crate::dump::MetricsDump;
use crate::engine::{DiffResult, ValidationResult};
use crate::error::Result;

pub trait Formatter {
    fn format_dump(&self, dump: &MetricsDump) -> Result<Vec<u8>>;

    fn format_validation(&self, dump: &MetricsDump, result: &ValidationResult<'_>)
        -> Result<Vec<u8>>;

    fn format_diff(&self, result: &DiffResult) -> Result<Vec<u8>>;
}
