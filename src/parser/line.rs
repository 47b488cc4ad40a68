use std::convert::TryFrom;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, digit1, one_of, space0, space1},
    combinator::{cut, opt, recognize, rest as take_rest},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
};

use super::result::{IResult, ParseError, Span};
use super::string::{string_literal, unescape};
use crate::model::{
    FamilyType, LabelName, LabelValue, Labels, MetricName, Sample, SampleValue, Timestamp,
};

/// One classified line of exposition text. Blank lines are handled by the
/// caller; everything else is either a directive, a free-form comment, or a
/// sample.
#[derive(Debug)]
pub(super) enum Line {
    Comment,
    Help { name: MetricName, text: String },
    Type { name: MetricName, kind: FamilyType },
    Sample(Sample),
}

/// A `#`-prefixed line: `# HELP <name> <text>`, `# TYPE <name> <kind>`, or an
/// arbitrary comment. A recognized keyword commits the parse, so a malformed
/// directive body is an error rather than a comment.
pub(super) fn directive(input: Span) -> IResult<Line> {
    preceded(char('#'), alt((help_directive, type_directive, comment)))(input)
}

// A directive keyword right after the `#`. It must be followed by whitespace
// or end of line, otherwise the line is an ordinary comment (`# TYPEWRITER`
// does not open a TYPE directive).
fn keyword<'a>(kw: &'static str) -> impl Fn(Span<'a>) -> IResult<'a, Span<'a>> {
    move |input: Span<'a>| {
        let (rest, m) = preceded(space1, tag(kw))(input)?;
        match rest.fragment().chars().next() {
            None | Some(' ') | Some('\t') => Ok((rest, m)),
            _ => Err(nom::Err::Error(ParseError::new(
                format!("not a {} directive", kw),
                input,
            ))),
        }
    }
}

fn help_directive(input: Span) -> IResult<Line> {
    let (rest, _) = keyword("HELP")(input)?;
    cut(preceded(space1, help_body))(rest)
}

fn help_body(input: Span) -> IResult<Line> {
    let (rest, name) = metric_identifier(input)?;
    let (rest, text) = preceded(space0, take_rest)(rest)?;
    Ok((
        rest,
        Line::Help {
            name,
            text: unescape(text.fragment()),
        },
    ))
}

fn type_directive(input: Span) -> IResult<Line> {
    let (rest, _) = keyword("TYPE")(input)?;
    cut(preceded(space1, type_body))(rest)
}

fn type_body(input: Span) -> IResult<Line> {
    let (rest, name) = metric_identifier(input)?;
    let (rest, _) = space1(rest)?;
    let (rest, kind) = alpha1(rest)?;
    let (rest, _) = space0(rest)?;

    if !rest.fragment().is_empty() {
        return Err(nom::Err::Failure(ParseError::new(
            "unexpected trailing characters in # TYPE directive".into(),
            rest,
        )));
    }

    let kind = FamilyType::try_from(*kind.fragment())
        .map_err(|e| nom::Err::Failure(ParseError::new(e.message().into(), kind)))?;

    Ok((rest, Line::Type { name, kind }))
}

fn comment(input: Span) -> IResult<Line> {
    let (rest, _) = take_rest(input)?;
    Ok((rest, Line::Comment))
}

/// A sample line: `<name> [{<labels>}] <value> [<timestamp>]`. Whitespace
/// between the name and the label braces is tolerated.
pub(super) fn sample(input: Span) -> IResult<Sample> {
    let (rest, name) = metric_identifier(input)?;
    let (rest, labels) = opt(preceded(space0, label_set))(rest)?;
    let (rest, value) = preceded(space1, sample_value)(rest)?;
    let (rest, timestamp) = opt(preceded(space1, sample_timestamp))(rest)?;
    let (rest, _) = space0(rest)?;

    Ok((
        rest,
        Sample::new(name, labels.unwrap_or_default(), value, timestamp),
    ))
}

fn label_set(input: Span) -> IResult<Labels> {
    // {} | {name="value",...} | {name="value",...,}
    let (rest, m) = alt((
        delimited(tag("{"), many0(label_list), tag("}")),
        delimited(tag("{"), many1(label_list), tag(",}")),
    ))(input)?;

    let mut labels = Labels::new();
    for (name, value) in m.into_iter().flatten() {
        // Last occurrence wins when a label name repeats.
        labels.insert(name, value);
    }

    Ok((rest, labels))
}

fn label_list(input: Span) -> IResult<Vec<(LabelName, LabelValue)>> {
    separated_list1(tag(","), label_pair)(input)
}

fn label_pair(input: Span) -> IResult<(LabelName, LabelValue)> {
    let (rest, (_, name, _, _, _, value, _)) = tuple((
        space0,
        label_identifier,
        space0,
        char('='),
        space0,
        string_literal,
        space0,
    ))(input)?;
    Ok((rest, (name, value)))
}

fn sample_value(input: Span) -> IResult<SampleValue> {
    let (rest, m) = is_not(" \t")(input)?;
    match m.fragment().parse::<SampleValue>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(nom::Err::Failure(ParseError::new(
            format!("invalid sample value \"{}\"", m.fragment()),
            m,
        ))),
    }
}

fn sample_timestamp(input: Span) -> IResult<Timestamp> {
    let (rest, m) = recognize(pair(opt(one_of("+-")), digit1))(input)?;
    match m.fragment().parse::<Timestamp>() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(ParseError::new(
            format!("invalid timestamp \"{}\"", m.fragment()),
            m,
        ))),
    }
}

fn metric_identifier(input: Span) -> IResult<MetricName> {
    // [a-zA-Z_:][a-zA-Z0-9_:]*
    let (rest, m) = recognize(pair(
        alt((alpha1, tag("_"), tag(":"))),
        many0(alt((alphanumeric1, tag("_"), tag(":")))),
    ))(input)?;
    Ok((rest, String::from(*m.fragment())))
}

fn label_identifier(input: Span) -> IResult<LabelName> {
    // [a-zA-Z_][a-zA-Z0-9_]*
    let (rest, m) = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)?;
    Ok((rest, String::from(*m.fragment())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse_sample(input: &str) -> Sample {
        let (rest, sample) = sample(Span::new(input)).unwrap();
        assert_eq!(rest.fragment().len(), 0, "while parsing {}", input);
        sample
    }

    #[test]
    fn test_sample_valid() {
        let tests = [
            ("foo 1", Sample::new("foo".into(), labels(&[]), 1.0, None)),
            ("foo{} 0 0", Sample::new("foo".into(), labels(&[]), 0.0, Some(0))),
            (
                "foo {hello=\"world\"} 0 0",
                Sample::new("foo".into(), labels(&[("hello", "world")]), 0.0, Some(0)),
            ),
            (
                "foo{a=\"1\",b=\"2\",} 3.14 -42",
                Sample::new(
                    "foo".into(),
                    labels(&[("a", "1"), ("b", "2")]),
                    3.14,
                    Some(-42),
                ),
            ),
            (
                "foo{a = \"1\", b = \"2\"} 1",
                Sample::new("foo".into(), labels(&[("a", "1"), ("b", "2")]), 1.0, None),
            ),
            (
                "foo:bar_total 2e-5",
                Sample::new("foo:bar_total".into(), labels(&[]), 0.00002, None),
            ),
            (
                r#"foo{msg="a\nb \"c\""} 1"#,
                Sample::new(
                    "foo".into(),
                    labels(&[("msg", "a\nb \"c\"")]),
                    1.0,
                    None,
                ),
            ),
        ];

        for (input, expected) in &tests {
            assert_eq!(&parse_sample(input), expected, "while parsing {}", input);
        }
    }

    #[test]
    fn test_sample_special_values() {
        assert_eq!(parse_sample("foo Inf").value(), f64::INFINITY);
        assert_eq!(parse_sample("foo +Inf").value(), f64::INFINITY);
        assert_eq!(parse_sample("foo -Inf").value(), f64::NEG_INFINITY);
        assert!(parse_sample("foo NaN").value().is_nan());
    }

    #[test]
    fn test_sample_invalid() {
        assert!(sample(Span::new("foo")).is_err());
        assert!(sample(Span::new("foo bar")).is_err());
        assert!(sample(Span::new("foo{a=} 1")).is_err());
        assert!(sample(Span::new("foo{a=\"1\" 1")).is_err());
        assert!(sample(Span::new("{} 1")).is_err());
    }

    #[test]
    fn test_sample_trailing_garbage_is_left_over() {
        let (rest, _) = sample(Span::new("foo 1 2 3")).unwrap();
        assert_eq!(*rest.fragment(), "3");
    }

    #[test]
    fn test_directive_help() {
        match directive(Span::new("# HELP foo Total disk \\\\IO\\n time")).unwrap() {
            (rest, Line::Help { name, text }) => {
                assert_eq!(rest.fragment().len(), 0);
                assert_eq!(name, "foo");
                assert_eq!(text, "Total disk \\IO\n time");
            }
            (_, line) => panic!("unexpected line {:?}", line),
        }
    }

    #[test]
    fn test_directive_type() {
        match directive(Span::new("# TYPE foo counter")).unwrap() {
            (_, Line::Type { name, kind }) => {
                assert_eq!(name, "foo");
                assert_eq!(kind, FamilyType::Counter);
            }
            (_, line) => panic!("unexpected line {:?}", line),
        }
    }

    #[test]
    fn test_directive_comment() {
        for input in &["#", "# arbitrary text", "# TYPEWRITER notes", "#HELP x"] {
            match directive(Span::new(input)).unwrap() {
                (_, Line::Comment) => {}
                (_, line) => panic!("unexpected line {:?} for {}", line, input),
            }
        }
    }

    #[test]
    fn test_directive_malformed() {
        assert!(directive(Span::new("# TYPE busted")).is_err());
        assert!(directive(Span::new("# TYPE foo widget")).is_err());
        assert!(directive(Span::new("# TYPE foo counter extra")).is_err());
        assert!(directive(Span::new("# HELP")).is_err());
    }
}
