use super::line::{self, Line};
use super::result::{ParseError, Span};
use crate::error::{Error, Result};
use crate::model::{FamilyType, MetricFamily, MetricName, Sample};

/// Turns a sequence of exposition-format lines into metric families, in
/// first-appearance order of each block. A family name that reappears in a
/// later block deliberately yields a separate entry; merging such blocks is
/// left to the validator, which reports them as duplicates.
pub fn parse_dump<I, S>(lines: I) -> Result<Vec<MetricFamily>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut families = Vec::new();
    let mut open: Option<FamilyBuilder> = None;

    for (idx, raw) in lines.into_iter().enumerate() {
        let text = raw.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        let parsed = match classify(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(Error::from(format!(
                    "invalid metrics text at line {}, column {}: {}",
                    idx + 1,
                    e.column(),
                    e.message()
                )))
            }
        };

        match parsed {
            Line::Comment => {}
            Line::Help { name, text } => {
                let reopen = !matches!(
                    &open,
                    Some(b) if b.name == name && b.help.is_none() && b.samples.is_empty()
                );
                if reopen {
                    if let Some(b) = open.take() {
                        families.push(b.build());
                    }
                    open = Some(FamilyBuilder::new(name));
                }
                if let Some(b) = open.as_mut() {
                    b.help = Some(text);
                }
            }
            Line::Type { name, kind } => {
                let reopen = !matches!(
                    &open,
                    Some(b) if b.name == name && b.kind.is_none() && b.samples.is_empty()
                );
                if reopen {
                    if let Some(b) = open.take() {
                        families.push(b.build());
                    }
                    open = Some(FamilyBuilder::new(name));
                }
                if let Some(b) = open.as_mut() {
                    b.kind = Some(kind);
                }
            }
            Line::Sample(sample) => {
                let belongs = matches!(&open, Some(b) if b.accepts(sample.name()));
                if !belongs {
                    if let Some(b) = open.take() {
                        families.push(b.build());
                    }
                    open = Some(FamilyBuilder::new(sample.name().clone()));
                }
                if let Some(b) = open.as_mut() {
                    b.samples.push(sample);
                }
            }
        }
    }

    if let Some(b) = open.take() {
        families.push(b.build());
    }

    Ok(families)
}

fn classify(text: &str) -> std::result::Result<Line, ParseError<'_>> {
    if text.starts_with('#') {
        let (_, parsed) = line::directive(Span::new(text)).map_err(ParseError::from)?;
        return Ok(parsed);
    }

    let (rest, sample) = line::sample(Span::new(text)).map_err(ParseError::from)?;
    if !rest.fragment().is_empty() {
        return Err(ParseError::new(
            "unexpected trailing characters".into(),
            rest,
        ));
    }

    Ok(Line::Sample(sample))
}

struct FamilyBuilder {
    name: MetricName,
    kind: Option<FamilyType>,
    help: Option<String>,
    samples: Vec<Sample>,
}

impl FamilyBuilder {
    fn new(name: MetricName) -> Self {
        Self {
            name,
            kind: None,
            help: None,
            samples: Vec::new(),
        }
    }

    // Whether a sample with this name belongs to the open family: either the
    // bare family name or a suffix the declared type defines. A histogram has
    // no bare-name samples of its own.
    fn accepts(&self, sample_name: &str) -> bool {
        let kind = self.kind.unwrap_or(FamilyType::Untyped);

        if sample_name == self.name {
            return kind != FamilyType::Histogram;
        }

        let suffix = match sample_name.strip_prefix(self.name.as_str()) {
            Some(suffix) => suffix,
            None => return false,
        };

        match kind {
            FamilyType::Counter => suffix == "_total",
            FamilyType::Histogram => matches!(suffix, "_bucket" | "_sum" | "_count"),
            FamilyType::Summary => matches!(suffix, "_sum" | "_count"),
            FamilyType::Gauge | FamilyType::Untyped => false,
        }
    }

    fn build(self) -> MetricFamily {
        MetricFamily::new(
            self.name,
            self.kind.unwrap_or(FamilyType::Untyped),
            self.help,
            self.samples,
        )
    }
}
