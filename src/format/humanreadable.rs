use super::formatter::Formatter;
use crate::dump::MetricsDump;
use crate::engine::{DiffResult, ValidationResult};
use crate::error::Result;
use crate::model::{MetricFamily, TimestampTrait};

pub struct HumanReadableFormatter;

impl HumanReadableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn format_family(&self, out: &mut String, family: &MetricFamily) {
        out.push_str(&format!(
            "{} ({}): {} samples\n",
            family.name(),
            family.family_type(),
            family.samples().len()
        ));
        if let Some(help) = family.help() {
            out.push_str(&format!("  # {}\n", help.replace('\n', " ")));
        }
        for sample in family.samples() {
            match sample.timestamp() {
                Some(ts) => out.push_str(&format!(
                    "  {} {} @ {}\n",
                    sample.id(),
                    sample.value(),
                    ts.to_string_millis()
                )),
                None => out.push_str(&format!("  {} {}\n", sample.id(), sample.value())),
            }
        }
    }
}

impl Formatter for HumanReadableFormatter {
    fn format_dump(&self, dump: &MetricsDump) -> Result<Vec<u8>> {
        let mut out = String::new();
        for family in dump.families() {
            self.format_family(&mut out, family);
        }
        Ok(out.into_bytes())
    }

    fn format_validation(
        &self,
        dump: &MetricsDump,
        result: &ValidationResult<'_>,
    ) -> Result<Vec<u8>> {
        if result.is_clean() {
            return Ok(format!("{}: no duplicate families or samples\n", dump.source()).into_bytes());
        }

        let mut out = String::new();
        for (name, entries) in result.duplicate_families() {
            let types: Vec<String> = entries
                .iter()
                .map(|family| family.family_type().to_string())
                .collect();
            out.push_str(&format!(
                "duplicate family: {} ({})\n",
                name,
                types.join(", ")
            ));
        }
        for id in result.duplicate_samples() {
            out.push_str(&format!("duplicate sample: {}\n", id));
        }
        Ok(out.into_bytes())
    }

    fn format_diff(&self, result: &DiffResult) -> Result<Vec<u8>> {
        if result.is_empty() {
            return Ok(b"no differences\n".to_vec());
        }

        let mut out = String::new();
        for name in result.added_families() {
            out.push_str(&format!("added family: {}\n", name));
        }
        for name in result.removed_families() {
            out.push_str(&format!("removed family: {}\n", name));
        }
        for id in result.added_samples() {
            out.push_str(&format!("added sample: {}\n", id));
        }
        for id in result.removed_samples() {
            out.push_str(&format!("removed sample: {}\n", id));
        }
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diff() {
        let from: MetricsDump = "foo 1\nqux 2".parse().unwrap();
        let to: MetricsDump = "foo 1\nbar 3".parse().unwrap();

        let out = HumanReadableFormatter::new()
            .format_diff(&from.diff(&to))
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "added family: bar\nremoved family: qux\n"
        );
    }

    #[test]
    fn test_format_validation_clean() {
        let dump: MetricsDump = "foo 1".parse().unwrap();
        let out = HumanReadableFormatter::new()
            .format_validation(&dump, &dump.validate())
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<memory>: no duplicate families or samples\n"
        );
    }
}
