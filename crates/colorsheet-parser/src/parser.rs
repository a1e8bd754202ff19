//! colorsheet grammar, written with `nom` combinators.
//!
//! The grammar relies on ordered choice rather than being unambiguous, so
//! the alternatives are always tried in this order:
//!
//! - document items: variable declaration, ruleset, declaration
//! - ruleset items: ruleset, declaration
//! - values: single color value (`#hex`, `rgba(..)`, `$var`), then colorset
//!
//! Whitespace inside an item never spans lines. Items end at a line break,
//! optionally preceded by inline whitespace and a `// comment`; any number of
//! blank or comment-only lines may follow.
//!
//! Once a construct has been recognised by its leading token (`$`, `#`,
//! `rgba(`, `(`, `{`, or `name:`) the rest of it is parsed under `cut`, so a
//! mistake inside it is reported where it happens instead of being hidden
//! behind the next alternative.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{
    alphanumeric1, char, digit1, line_ending, multispace1, not_line_ending, space0, space1,
};
use nom::combinator::{cut, eof, map, map_res, opt, peek};
use nom::error::{context, ContextError, ErrorKind, FromExternalError};
use nom::multi::{many0_count, many_till};
use nom::number::complete::float;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated, tuple};
use nom::IResult;

use crate::ast::{
    Color, ColorSet, ColorSetValue, Declaration, Document, DocumentItem, RuleSet, RuleSetItem,
    Value, Variable,
};
use crate::error::ParseError;

/// Deepest ruleset nesting accepted.
pub const MAX_NESTING: usize = 64;

/// Parses colorsheet source text into a [`Document`].
///
/// The whole input must match; trailing content that is not whitespace or a
/// comment is an error.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    match document(source) {
        Ok((_, document)) => Ok(document),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => Err(err.into_parse_error(source)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(source, source.len(), "more input")),
    }
}

type PResult<'a, T> = IResult<&'a str, T, Expected<'a>>;

/// Parser error: the remaining input where a rule failed and what it wanted.
///
/// Between alternatives the one that got further wins; alternatives failing
/// at the same spot pool their expectations.
#[derive(Debug, Clone, PartialEq)]
struct Expected<'a> {
    rest: &'a str,
    labels: Vec<String>,
}

impl<'a> Expected<'a> {
    fn new(rest: &'a str, label: impl Into<String>) -> Self {
        Self {
            rest,
            labels: vec![label.into()],
        }
    }

    fn into_parse_error(self, source: &str) -> ParseError {
        let expected = match self.labels.as_slice() {
            [] => "valid input".to_string(),
            [one] => one.clone(),
            many => format!("one of {}", many.join(", ")),
        };
        ParseError::new(source, source.len() - self.rest.len(), expected)
    }
}

impl<'a> nom::error::ParseError<&'a str> for Expected<'a> {
    fn from_error_kind(rest: &'a str, _kind: ErrorKind) -> Self {
        Self {
            rest,
            labels: Vec::new(),
        }
    }

    fn append(_rest: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(rest: &'a str, c: char) -> Self {
        Self::new(rest, format!("'{c}'"))
    }

    fn or(mut self, other: Self) -> Self {
        match self.rest.len().cmp(&other.rest.len()) {
            std::cmp::Ordering::Less => self,
            std::cmp::Ordering::Greater => other,
            std::cmp::Ordering::Equal => {
                for label in other.labels {
                    if !self.labels.contains(&label) {
                        self.labels.push(label);
                    }
                }
                self
            }
        }
    }
}

impl<'a> ContextError<&'a str> for Expected<'a> {
    /// Keeps the innermost label.
    fn add_context(_rest: &'a str, ctx: &'static str, mut other: Self) -> Self {
        if other.labels.is_empty() {
            other.labels.push(ctx.to_string());
        }
        other
    }
}

impl<'a, E: std::fmt::Display> FromExternalError<&'a str, E> for Expected<'a> {
    fn from_external_error(rest: &'a str, _kind: ErrorKind, e: E) -> Self {
        Self::new(rest, e.to_string())
    }
}

// =============================================================================
// Whitespace and comments
// =============================================================================

fn comment(input: &str) -> PResult<'_, &str> {
    preceded(tag("//"), not_line_ending)(input)
}

/// Any run of whitespace, line breaks and comments.
fn trivia(input: &str) -> PResult<'_, ()> {
    map(many0_count(alt((multispace1, comment))), |_| ())(input)
}

/// End of an item: a line break plus trivia, or `closer` without consuming it.
fn item_end<'a, O>(
    closer: impl FnMut(&'a str) -> PResult<'a, O>,
) -> impl FnMut(&'a str) -> PResult<'a, ()> {
    preceded(
        pair(space0, opt(comment)),
        alt((
            map(pair(context("line break", line_ending), trivia), |_| ()),
            map(peek(closer), |_| ()),
        )),
    )
}

/// `c` with optional inline whitespace on both sides.
fn separator<'a>(c: char) -> impl FnMut(&'a str) -> PResult<'a, char> {
    delimited(space0, char(c), space0)
}

// =============================================================================
// Structure
// =============================================================================

fn document(input: &str) -> PResult<'_, Document> {
    map(
        preceded(
            trivia,
            many_till(
                terminated(document_item, item_end(context("end of input", eof))),
                context("end of input", eof),
            ),
        ),
        |(items, _)| Document { items },
    )(input)
}

fn document_item(input: &str) -> PResult<'_, DocumentItem> {
    alt((
        map(variable_declaration, DocumentItem::Variable),
        map(|i| ruleset(i, 1), DocumentItem::RuleSet),
        map(declaration(value), DocumentItem::Declaration),
    ))(input)
}

fn ruleset(input: &str, depth: usize) -> PResult<'_, RuleSet> {
    let (body, identifier) = terminated(identifier, pair(space0, char('{')))(input)?;
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(Expected::new(
            input,
            format!("at most {MAX_NESTING} nested rulesets"),
        )));
    }

    let (rest, (items, _)) = cut(preceded(
        trivia,
        many_till(
            terminated(|i| ruleset_item(i, depth), item_end(char('}'))),
            char('}'),
        ),
    ))(body)?;
    Ok((rest, RuleSet { identifier, items }))
}

fn ruleset_item(input: &str, depth: usize) -> PResult<'_, RuleSetItem> {
    alt((
        map(|i| ruleset(i, depth + 1), RuleSetItem::RuleSet),
        map(declaration(value), RuleSetItem::Declaration),
    ))(input)
}

fn variable_declaration(input: &str) -> PResult<'_, Declaration<Value>> {
    map(
        preceded(
            char('$'),
            cut(separated_pair(identifier, separator(':'), value)),
        ),
        |(identifier, value)| Declaration { identifier, value },
    )(input)
}

fn declaration<'a, T>(
    value: impl FnMut(&'a str) -> PResult<'a, T>,
) -> impl FnMut(&'a str) -> PResult<'a, Declaration<T>> {
    map(
        separated_pair(identifier, separator(':'), cut(value)),
        |(identifier, value)| Declaration { identifier, value },
    )
}

fn identifier(input: &str) -> PResult<'_, String> {
    context("identifier", map(alphanumeric1, String::from))(input)
}

// =============================================================================
// Values
// =============================================================================

fn value(input: &str) -> PResult<'_, Value> {
    alt((
        map(colorset_value, Value::from),
        map(colorset, Value::ColorSet),
    ))(input)
}

fn colorset_value(input: &str) -> PResult<'_, ColorSetValue> {
    alt((
        map(hex_color, ColorSetValue::Color),
        map(rgba_color, ColorSetValue::Color),
        map(variable_value, ColorSetValue::Variable),
    ))(input)
}

fn colorset(input: &str) -> PResult<'_, ColorSet> {
    let body = tuple((
        declaration(colorset_value),
        separator(','),
        declaration(colorset_value),
        pair(space0, char(')')),
    ));
    preceded(
        char('('),
        cut(preceded(
            space0,
            map_res(body, |(first, _, second, _)| colorset_from_labels(first, second)),
        )),
    )(input)
}

fn colorset_from_labels(
    first: Declaration<ColorSetValue>,
    second: Declaration<ColorSetValue>,
) -> Result<ColorSet, String> {
    match (first.identifier.as_str(), second.identifier.as_str()) {
        ("light", "dark") => Ok(ColorSet {
            light: first.value,
            dark: second.value,
        }),
        ("dark", "light") => Ok(ColorSet {
            light: second.value,
            dark: first.value,
        }),
        _ => Err(format!(
            "colorset labels 'light' and 'dark' (got '{}' and '{}')",
            first.identifier, second.identifier
        )),
    }
}

fn hex_color(input: &str) -> PResult<'_, Color> {
    map(
        pair(
            preceded(char('#'), cut(tuple((hex_byte, hex_byte, hex_byte)))),
            opt(opacity_suffix),
        ),
        |((red, green, blue), alpha)| Color {
            red,
            green,
            blue,
            alpha: alpha.unwrap_or(1.0),
        },
    )(input)
}

fn hex_byte(input: &str) -> PResult<'_, u8> {
    context(
        "two hex digits",
        map_res(
            take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
            |digits: &str| u8::from_str_radix(digits, 16),
        ),
    )(input)
}

fn rgba_color(input: &str) -> PResult<'_, Color> {
    let channels = tuple((
        channel,
        separator(','),
        channel,
        separator(','),
        channel,
        separator(','),
        unit_float,
    ));
    map(
        preceded(
            context("'rgba('", tag("rgba(")),
            cut(delimited(space0, channels, pair(space0, char(')')))),
        ),
        |(red, _, green, _, blue, _, alpha)| Color {
            red,
            green,
            blue,
            alpha,
        },
    )(input)
}

fn variable_value(input: &str) -> PResult<'_, Variable> {
    map(
        pair(preceded(char('$'), cut(identifier)), opt(opacity_suffix)),
        |(identifier, opacity)| Variable {
            identifier,
            opacity: opacity.unwrap_or(1.0),
        },
    )(input)
}

/// ` NN%` after a color or variable.
fn opacity_suffix(input: &str) -> PResult<'_, f32> {
    preceded(space1, percentage)(input)
}

fn percentage(input: &str) -> PResult<'_, f32> {
    let parsed: PResult<'_, &str> = terminated(digit1, char('%'))(input);
    let (rest, digits) = parsed?;
    match digits.parse::<u32>() {
        Ok(percent) if percent <= 100 => Ok((rest, percent as f32 / 100.0)),
        _ => Err(nom::Err::Failure(Expected::new(
            input,
            "percentage between 0% and 100%",
        ))),
    }
}

fn channel(input: &str) -> PResult<'_, u8> {
    map_res(digit1, |digits: &str| {
        digits
            .parse::<u8>()
            .map_err(|_| "integer between 0 and 255")
    })(input)
}

/// A float in `0.0..=1.0` such as `1`, `1.`, `0.5` or `.25`.
fn unit_float(input: &str) -> PResult<'_, f32> {
    let parsed: PResult<'_, f32> = context("alpha value", float)(input);
    let (rest, alpha) = parsed?;
    if (0.0..=1.0).contains(&alpha) {
        Ok((rest, alpha))
    } else {
        Err(nom::Err::Failure(Expected::new(
            input,
            "alpha value between 0 and 1",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_value(source: &str) -> Value {
        let doc = parse(source).unwrap();
        match doc.items.into_iter().next() {
            Some(DocumentItem::Declaration(d)) | Some(DocumentItem::Variable(d)) => d.value,
            other => panic!("Expected a declaration, got {:?}", other),
        }
    }

    // =========================================================================
    // Document structure
    // =========================================================================

    #[test]
    fn test_empty_document() {
        assert_eq!(parse("").unwrap(), Document::default());
        assert_eq!(parse("  \n\n  ").unwrap(), Document::default());
    }

    #[test]
    fn test_item_kinds_are_distinguished() {
        let doc = parse("$var: #ff00ff\na {}\na: $var").unwrap();
        assert!(matches!(doc.items[0], DocumentItem::Variable(_)));
        assert!(matches!(doc.items[1], DocumentItem::RuleSet(_)));
        assert!(matches!(doc.items[2], DocumentItem::Declaration(_)));
    }

    #[test]
    fn test_blank_lines_between_items() {
        let doc = parse("\n\n  a: #000000\n\n\n   b: #ffffff\n\n").unwrap();
        assert_eq!(doc.items.len(), 2);
    }

    #[test]
    fn test_items_on_one_line_fail() {
        assert!(parse("a: #000000 b: #ffffff").is_err());
    }

    #[test]
    fn test_empty_rulesets() {
        let doc = parse("a {}").unwrap();
        assert_eq!(
            doc.items[0],
            DocumentItem::RuleSet(RuleSet {
                identifier: "a".into(),
                items: vec![]
            })
        );
        let doc = parse("a { b {}\n}").unwrap();
        match &doc.items[0] {
            DocumentItem::RuleSet(r) => assert!(matches!(r.items[0], RuleSetItem::RuleSet(_))),
            other => panic!("Expected ruleset, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_ruleset_on_one_line() {
        let doc = parse("A { B { C: #000000 } }").unwrap();
        let DocumentItem::RuleSet(a) = &doc.items[0] else {
            panic!("Expected ruleset");
        };
        let RuleSetItem::RuleSet(b) = &a.items[0] else {
            panic!("Expected nested ruleset");
        };
        assert_eq!(b.identifier, "B");
        assert!(matches!(&b.items[0], RuleSetItem::Declaration(d) if d.identifier == "C"));
    }

    #[test]
    fn test_items_do_not_span_lines() {
        assert!(parse("a:\n#000000").is_err());
        assert!(parse("a\n: #000000").is_err());
        assert!(parse("A\n{\n}").is_err());
    }

    #[test]
    fn test_garbage_documents() {
        for source in ["something", ".", "{}", "$", "a:", "a {", "a: #ffffff }"] {
            assert!(parse(source).is_err(), "{:?} should not parse", source);
        }
    }

    #[test]
    fn test_variables_inside_rulesets_are_rejected() {
        assert!(parse("a {\n  $b: #000000\n}").is_err());
    }

    #[test]
    fn test_comments() {
        let source = "// palette\n$a: #000000 // black\n\n\
                      // group\nA {\n  // inside\n  B: $a // trailing\n}\n// end";
        let doc = parse(source).unwrap();
        assert_eq!(doc.items.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("a: #000000\r\nb: #ffffff\r\n").unwrap();
        assert_eq!(doc.items.len(), 2);
    }

    // =========================================================================
    // Colors
    // =========================================================================

    #[test]
    fn test_hex_color() {
        assert_eq!(
            single_value("a: #4B0FC6"),
            Value::Color(Color::rgb(0x4b, 0x0f, 0xc6))
        );
    }

    #[test]
    fn test_hex_color_with_alpha() {
        assert_eq!(
            single_value("$myColor : #ff00ff 44%"),
            Value::Color(Color::rgba(255, 0, 255, 0.44))
        );
    }

    #[test]
    fn test_hex_garbage() {
        for source in [
            "a: #ff0zff",
            "a: #fff",
            "a: #ffffff 33?",
            "a: #fffffff",
            "a: #ffffff 101%",
        ] {
            assert!(parse(source).is_err(), "{:?} should not parse", source);
        }
    }

    #[test]
    fn test_rgba_color() {
        assert_eq!(
            single_value("$a: rgba(0, 127, 255, 0.5)"),
            Value::Color(Color::rgba(0, 127, 255, 0.5))
        );
        assert_eq!(
            single_value("$a: rgba(0,127 ,  255,1 )"),
            Value::Color(Color::rgba(0, 127, 255, 1.0))
        );
    }

    #[test]
    fn test_rgba_alpha_float_forms() {
        assert_eq!(
            single_value("a: rgba(0,0,0,1.)"),
            Value::Color(Color::rgba(0, 0, 0, 1.0))
        );
        assert_eq!(
            single_value("a: rgba(0, 0, 0, .25)"),
            Value::Color(Color::rgba(0, 0, 0, 0.25))
        );
    }

    #[test]
    fn test_rgba_garbage() {
        for source in [
            "a: rgba(256, 0, 0, 1)",
            "a: rgba(0, 0, 0)",
            "a: rgba(0, 0, 0, 1.5)",
            "a: rgba(-1, 0, 0, 1)",
            "a: rgba (0, 0, 0, 1)",
        ] {
            assert!(parse(source).is_err(), "{:?} should not parse", source);
        }
    }

    #[test]
    fn test_variable_value_with_opacity() {
        assert_eq!(
            single_value("$a: $b 50%"),
            Value::Variable(Variable::new("b").with_opacity(0.5))
        );
    }

    // =========================================================================
    // Colorsets
    // =========================================================================

    #[test]
    fn test_colorset_either_label_order() {
        let expected = Value::ColorSet(ColorSet {
            light: ColorSetValue::Color(Color::rgb(255, 0, 255)),
            dark: ColorSetValue::Variable(Variable::new("b")),
        });
        assert_eq!(single_value("a: (light: #ff00ff, dark: $b)"), expected);
        assert_eq!(single_value("a: (dark: $b, light: #ff00ff)"), expected);
    }

    #[test]
    fn test_colorset_wrong_labels() {
        let err = parse("a: (foo: #000000, bar: #ffffff)").unwrap_err();
        assert!(err.expected.contains("light"));
        assert_eq!(err.span.column, 5);
        assert!(parse("a: (light: #000000, light: #ffffff)").is_err());
    }

    #[test]
    fn test_colorset_cannot_nest() {
        assert!(parse("a: (light: (light: #000000, dark: #000000), dark: #ffffff)").is_err());
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    #[test]
    fn test_error_points_at_furthest_failure() {
        let err = parse("a: #000000\nb: #00zz00").unwrap_err();
        assert_eq!(err.span.line, 2);
        assert_eq!(err.span.column, 7);
        assert!(err.expected.contains("hex"));
    }

    #[test]
    fn test_out_of_range_channel_reports_position() {
        let err = parse("a: rgba(0, 300, 0, 1)").unwrap_err();
        assert_eq!(err.span.column, 12);
        assert!(err.expected.contains("255"));
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "A {\n".repeat(depth), "}\n".repeat(depth))
    }

    fn ruleset_depth(ruleset: &RuleSet) -> usize {
        1 + ruleset
            .items
            .iter()
            .filter_map(|item| match item {
                RuleSetItem::RuleSet(child) => Some(ruleset_depth(child)),
                RuleSetItem::Declaration(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_nesting_up_to_limit() {
        let doc = parse(&nested(MAX_NESTING)).unwrap();
        let DocumentItem::RuleSet(outer) = &doc.items[0] else {
            panic!("Expected ruleset");
        };
        assert_eq!(ruleset_depth(outer), MAX_NESTING);
    }

    #[test]
    fn test_nesting_beyond_limit_is_an_error() {
        let err = parse(&nested(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(err.span.line, MAX_NESTING + 1);
        assert!(err.expected.contains("nested"));

        assert!(parse(&nested(1000)).is_err());
    }
}
