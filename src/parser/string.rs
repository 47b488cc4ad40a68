use nom::{
    bytes::complete::{escaped, is_not},
    character::complete::{char, one_of},
    combinator::opt,
    sequence::delimited,
};

use super::result::{IResult, Span};

/// A double-quoted label value or help text fragment. The exposition format
/// escapes backslash, double quote, and line feed as `\\`, `\"`, and `\n`.
pub(super) fn string_literal(input: Span) -> IResult<String> {
    let (rest, m) = delimited(
        char('"'),
        opt(escaped(is_not("\\\""), '\\', one_of("\\\"n"))),
        char('"'),
    )(input)?;

    Ok((rest, unescape(m.map(|s| *s.fragment()).unwrap_or(""))))
}

pub(super) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            // Unknown escapes are kept verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal() {
        let tests = [
            (r#""""#, ""),
            (r#""foo""#, "foo"),
            (r#""foo bar""#, "foo bar"),
            (r#""say \"hi\"""#, "say \"hi\""),
            (r#""back\\slash""#, "back\\slash"),
            (r#""line\nfeed""#, "line\nfeed"),
        ];

        for (input, expected) in &tests {
            let (rest, actual) = string_literal(Span::new(input)).unwrap();
            assert_eq!(&actual, expected, "while parsing {}", input);
            assert_eq!(rest.fragment().len(), 0);
        }
    }

    #[test]
    fn test_string_literal_invalid() {
        assert!(string_literal(Span::new(r#""unterminated"#)).is_err());
        assert!(string_literal(Span::new("no quotes")).is_err());
    }
}
